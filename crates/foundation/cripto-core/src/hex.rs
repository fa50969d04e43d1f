//! Hex text in and out of the XOR tools
//!
//! Parsing is lenient: whitespace is ignored, bytes are read two digits at a
//! time, a bad pair is skipped with a warning and a dangling final digit is
//! dropped.

use tracing::warn;

/// Parse hex text such as `"32 07 00 13"` or `"32070013"` into bytes.
pub fn parse_lenient(input: &str) -> Vec<u8> {
    let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut bytes = Vec::with_capacity(digits.len() / 2);

    for pair in digits.chunks_exact(2) {
        let text: String = pair.iter().collect();
        // from_str_radix alone would accept a leading '+'
        let byte = pair.iter()
            .all(char::is_ascii_hexdigit)
            .then(|| u8::from_str_radix(&text, 16).ok())
            .flatten();

        match byte {
            Some(byte) => bytes.push(byte),
            None => warn!(pair = %text, "skipping invalid hex pair"),
        }
    }

    bytes
}

/// Lowercase hex, one space between bytes.
pub fn to_spaced(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}
