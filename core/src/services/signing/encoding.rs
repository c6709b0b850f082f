//! Percent-encoding rules of the provider's signature algorithm.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// URI component encoding: everything but `A-Z a-z 0-9 - _ .` is escaped
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Percent-encode a key, value or whole query string for signing
///
/// Applies the URI component encoding with uppercase hex, then the provider's
/// post-substitutions in order: `+` to `%20`, `*` to `%2A`, `%7E` to `~`.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT)
        .to_string()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Serialise parameters as `key=value` pairs joined by `&`, sorted by key
///
/// Keys and values are each passed through [`percent_encode`]. The map's
/// ordering is byte-wise on the raw keys.
pub fn canonical_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
