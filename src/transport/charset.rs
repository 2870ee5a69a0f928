//! Gateway single-byte character set.
//!
//! PSWin transmits plain-text bodies (in both directions) in its own
//! Latin-1-like single-byte charset. The repertoire is embedded here as an
//! explicit byte-indexed table instead of delegating to a general-purpose
//! codec: the set of transmittable characters is whatever the gateway
//! accepts, and that table is the contract. Defined entries occupy the slot
//! of their own code point, so the reverse direction (char to byte) is a
//! bounds check plus a table probe.
//!
//! Text the gateway could not represent on its side arrives already
//! substituted with [`SUBSTITUTE`]; decoding keeps such runs untouched.

/// Substitution character the gateway uses for unrepresentable text.
pub const SUBSTITUTE: char = '?';

/// Marker for byte values with no character assigned.
const NA: char = '\u{fffd}';

/// Character assigned to each byte value. TAB, LF and CR are the only
/// transmittable controls; DEL and the 0x80..=0x9F range carry nothing.
#[rustfmt::skip]
static BYTE_TO_CHAR: [char; 256] = [
    NA, NA, NA, NA, NA, NA, NA, NA, NA, '\t', '\n', NA, NA, '\r', NA, NA,
    NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA,
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', NA,
    NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA,
    NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA, NA,
    '\u{a0}', '¡', '¢', '£', '¤', '¥', '¦', '§', '¨', '©', 'ª', '«', '¬', '\u{ad}', '®', '¯',
    '°', '±', '²', '³', '´', 'µ', '¶', '·', '¸', '¹', 'º', '»', '¼', '½', '¾', '¿',
    'À', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Æ', 'Ç', 'È', 'É', 'Ê', 'Ë', 'Ì', 'Í', 'Î', 'Ï',
    'Ð', 'Ñ', 'Ò', 'Ó', 'Ô', 'Õ', 'Ö', '×', 'Ø', 'Ù', 'Ú', 'Û', 'Ü', 'Ý', 'Þ', 'ß',
    'à', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'ç', 'è', 'é', 'ê', 'ë', 'ì', 'í', 'î', 'ï',
    'ð', 'ñ', 'ò', 'ó', 'ô', 'õ', 'ö', '÷', 'ø', 'ù', 'ú', 'û', 'ü', 'ý', 'þ', 'ÿ',
];

fn char_to_byte(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp < 256 && BYTE_TO_CHAR[cp as usize] == ch {
        Some(cp as u8)
    } else {
        None
    }
}

/// Whether every character of `text` is in the gateway repertoire.
///
/// Anything outside the table fails the check, including all code points
/// above the Latin-1 range.
pub fn is_representable(text: &str) -> bool {
    text.chars().all(|ch| char_to_byte(ch).is_some())
}

/// Encode `text` in the gateway's single-byte charset.
///
/// Returns `None` as soon as any character falls outside the repertoire;
/// output is never partial.
pub fn encode_text(text: &str) -> Option<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        bytes.push(char_to_byte(ch)?);
    }
    Some(bytes)
}

/// Decode gateway bytes into text.
///
/// Total: byte values with no table entry decode to [`SUBSTITUTE`], the same
/// character the gateway itself falls back to.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            let ch = BYTE_TO_CHAR[b as usize];
            if ch == NA { SUBSTITUTE } else { ch }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_nordic_text_is_representable() {
        assert!(is_representable("hello there"));
        assert!(is_representable("Æ E A Å Edø."));
        assert!(is_representable(
            "RaLejaLe hemmat i høssøLæssom å naumøLa spikkjipørse."
        ));
        assert!(is_representable(
            "Ñoño Yáñez come ñame en las mañanas con el niño."
        ));
    }

    #[test]
    fn text_outside_the_repertoire_is_rejected() {
        assert!(!is_representable("Vamos a aprender chino \u{73a9}."));
        assert!(!is_representable("מה קורה?"));
        assert!(!is_representable("Привет"));
        // One bad character is enough.
        assert!(!is_representable("ok €"));
    }

    #[test]
    fn encode_produces_single_byte_values() {
        assert_eq!(
            encode_text("Æ E A Å Edø.").unwrap(),
            b"\xc6 E A \xc5 Ed\xf8.".to_vec()
        );
        assert_eq!(
            encode_text("Ñoño Yáñez come ñame en las mañanas con el niño.").unwrap(),
            b"\xd1o\xf1o Y\xe1\xf1ez come \xf1ame en las ma\xf1anas con el ni\xf1o.".to_vec()
        );
    }

    #[test]
    fn encode_is_all_or_nothing() {
        assert_eq!(encode_text("abc\u{73a9}def"), None);
    }

    #[test]
    fn decode_round_trips_plain_text() {
        let text = "Hei på deg ØØØ";
        let bytes = encode_text(text).unwrap();
        assert_eq!(decode_text(&bytes), text);
    }

    #[test]
    fn decode_maps_unassigned_bytes_to_substitute() {
        assert_eq!(decode_text(b"\x90ok\x7f"), "?ok?");
    }

    #[test]
    fn decode_keeps_gateway_substitutions_untouched() {
        // The gateway itself replaces unrepresentable inbound text with '?'.
        assert_eq!(decode_text(b"\x3f\x3f\x3f\x3f\x3f\x3f"), "??????");
    }

    #[test]
    fn line_break_controls_survive_both_directions() {
        let text = "line one\r\nline two\ttabbed";
        let bytes = encode_text(text).unwrap();
        assert_eq!(decode_text(&bytes), text);
    }
}
