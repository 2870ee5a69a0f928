//! Hex-encoded UCS2 body codec.
//!
//! When a body exceeds the single-byte repertoire, the gateway accepts it as
//! a sequence of 16-bit big-endian UTF-16 code units rendered as lowercase
//! hex, four digits per unit, no separators. Characters outside the Basic
//! Multilingual Plane occupy two units (a surrogate pair).

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Ucs2Error {
    #[error("hex payload length {0} is not a multiple of 4")]
    UnevenLength(usize),

    #[error("invalid hex digit in UCS2 payload: {0:?}")]
    InvalidDigit(char),

    #[error("unpaired UTF-16 surrogate in UCS2 payload")]
    UnpairedSurrogate,
}

/// Encode `text` as lowercase hex UTF-16 code units.
///
/// The output length is always `4 * code_unit_count(text)`.
pub fn encode_ucs2_hex(text: &str) -> String {
    let mut hex = String::with_capacity(text.len() * 4);
    for unit in text.encode_utf16() {
        hex.push(HEX_DIGITS[usize::from(unit >> 12 & 0xf)] as char);
        hex.push(HEX_DIGITS[usize::from(unit >> 8 & 0xf)] as char);
        hex.push(HEX_DIGITS[usize::from(unit >> 4 & 0xf)] as char);
        hex.push(HEX_DIGITS[usize::from(unit & 0xf)] as char);
    }
    hex
}

/// Decode a hex UCS2 payload back into text.
///
/// Accepts upper- and lowercase digits. Fails on uneven length, non-hex
/// input, and code unit sequences with unpaired surrogates.
pub fn decode_ucs2_hex(hex: &str) -> Result<String, Ucs2Error> {
    let bytes = hex.as_bytes();
    if bytes.len() % 4 != 0 {
        return Err(Ucs2Error::UnevenLength(bytes.len()));
    }

    let mut units = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks(4) {
        let mut unit = 0u16;
        for &b in chunk {
            let digit = hex_val(b).ok_or(Ucs2Error::InvalidDigit(b as char))?;
            unit = unit << 4 | u16::from(digit);
        }
        units.push(unit);
    }

    String::from_utf16(&units).map_err(|_| Ucs2Error::UnpairedSurrogate)
}

pub(crate) fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
