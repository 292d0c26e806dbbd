//! Hash value extraction for browser address fragments.
//!
//! The fragment is always passed in explicitly; nothing here reads ambient
//! location state, so callers hand over `location.hash` (or a whole address)
//! and get back the decoded hash value.

mod address;
mod decode;
mod hash;

pub use address::{fragment_of, split_address};
pub use decode::HashDecoding;
pub use hash::{url_hash, HashReader};
