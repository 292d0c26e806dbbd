/// Address fragment of `address`, including the leading `#`.
///
/// Everything from the first `#` onward belongs to the fragment; an address
/// without `#` has an empty fragment.
pub fn fragment_of(address: &str) -> &str {
    split_address(address).1
}

/// Split an address into the part before the fragment and the fragment.
pub fn split_address(address: &str) -> (&str, &str) {
    match address.find('#') {
        Some(idx) => address.split_at(idx),
        None => (address, ""),
    }
}
