//! Plausible-plaintext heuristic shared by every XOR strategy.

/// True when `data` is non-empty and made only of printable ASCII or
/// whitespace (space, tab, newline, vertical tab, form feed, carriage return).
pub fn is_plausible_plaintext(data: &[u8]) -> bool {
    !data.is_empty() && data.iter().all(|&b| is_printable(b) || is_whitespace(b))
}

fn is_printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert!(!is_plausible_plaintext(b""));
    }

    #[test]
    fn test_printable_and_whitespace_accepted() {
        assert!(is_plausible_plaintext(b"Secreto"));
        assert!(is_plausible_plaintext(b"line one\nline two\r\n\ttabbed ~!"));
        assert!(is_plausible_plaintext(&[0x0b, 0x0c, b' ']));
        assert!(is_plausible_plaintext(b" "));
    }

    #[test]
    fn test_control_and_high_bytes_rejected() {
        assert!(!is_plausible_plaintext(b"almost\x00there"));
        assert!(!is_plausible_plaintext(&[b'a', 0x7f]));
        assert!(!is_plausible_plaintext(&[b'a', 0x80]));
        assert!(!is_plausible_plaintext("año".as_bytes()));
    }
}
