//! Percent-encoded field parsing for inbound callbacks.
//!
//! Both the query string of a GET callback and the body of a form-encoded
//! POST carry the same flat field set, percent-escaped over the gateway's
//! single-byte charset. Values are decoded to bytes first and then through
//! the charset table; running them through a UTF-8 decoder instead would
//! mangle every non-ASCII body.

use std::collections::BTreeMap;

use crate::transport::charset;
use crate::transport::ucs2::hex_val;

/// Flat field set of one callback, keyed by wire field name.
pub type WireFields = BTreeMap<String, String>;

/// Parse a raw query string or form body into decoded wire fields.
///
/// Later duplicates of a key win. Malformed percent escapes pass through
/// literally rather than failing the whole callback.
pub fn parse_wire_fields(raw: &[u8]) -> WireFields {
    let mut fields = BTreeMap::new();
    for pair in raw.split(|&b| b == b'&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.iter().position(|&b| b == b'=') {
            Some(idx) => (&pair[..idx], &pair[idx + 1..]),
            None => (pair, &[][..]),
        };
        fields.insert(
            charset::decode_text(&percent_decode(key)),
            charset::decode_text(&percent_decode(value)),
        );
    }
    fields
}

fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < input.len() => {
                match (hex_val(input[i + 1]), hex_val(input[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    out
}
