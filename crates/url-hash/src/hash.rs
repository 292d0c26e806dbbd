use std::borrow::Cow;

use crate::address::fragment_of;
use crate::decode::HashDecoding;

/// Strip the single leading `#` from an address fragment.
///
/// Input without a leading `#` is returned untouched, and only the first
/// `#` is removed, so `"##a"` yields `"#a"`.
pub fn url_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// Reads hash values under a fixed decoding policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashReader {
    decoding: HashDecoding,
}

impl HashReader {
    pub fn new(decoding: HashDecoding) -> Self {
        Self { decoding }
    }

    pub fn decoding(&self) -> HashDecoding {
        self.decoding
    }

    /// Hash value of an address fragment such as `location.hash`.
    pub fn read<'a>(&self, fragment: &'a str) -> Cow<'a, str> {
        self.decoding.apply(url_hash(fragment))
    }

    /// Hash value of a full address; empty when the address has no fragment.
    pub fn read_address<'a>(&self, address: &'a str) -> Cow<'a, str> {
        self.read(fragment_of(address))
    }
}
