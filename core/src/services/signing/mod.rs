//! Provider request signing (HMAC-SHA1 over a doubly percent-encoded
//! canonical query string).

mod encoding;
mod signer;

pub use encoding::{canonical_query_string, percent_encode};
pub use signer::{sign, string_to_sign, RequestSigner, HTTP_METHOD};
