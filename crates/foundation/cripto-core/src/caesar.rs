//! Shift Cipher
//!
//! Caesar-style substitution over two independent alphabets: ASCII letters
//! wrap modulo 26 and ASCII digits wrap modulo 10. Both shifts are derived
//! from the same integer key. Everything else passes through untouched.

use crate::{DIGITS, LETTERS};

pub struct ShiftCipher;

impl ShiftCipher {
    // ═══════════════════════════════════════════════════════════
    // ENCODE / DECODE
    // ═══════════════════════════════════════════════════════════

    pub fn encode(input: &str, shift: i32) -> String {
        Self::apply(input, letter_shift(shift), digit_shift(shift))
    }

    /// Reverse the letter shift: `encode(input, (26 - shift mod 26) mod 26)`.
    ///
    /// Digits are not inverted on their own; they move by the derived letter
    /// inverse mod 10, so only letters are guaranteed to round-trip. See
    /// [`invert`](Self::invert) for the exact inverse.
    pub fn decode(input: &str, shift: i32) -> String {
        Self::encode(input, (LETTERS - letter_shift(shift)) % LETTERS)
    }

    /// Exact inverse of [`encode`](Self::encode): letters move back by
    /// `shift mod 26` and digits by `shift mod 10`.
    pub fn invert(input: &str, shift: i32) -> String {
        let letters = (LETTERS - letter_shift(shift)) % LETTERS;
        let digits = (DIGITS - digit_shift(shift)) % DIGITS;
        Self::apply(input, letters, digits)
    }

    fn apply(input: &str, letters: i32, digits: i32) -> String {
        input.chars().map(|c| {
            if c.is_ascii_uppercase() {
                rotate(c, b'A', letters, LETTERS)
            } else if c.is_ascii_lowercase() {
                rotate(c, b'a', letters, LETTERS)
            } else if c.is_ascii_digit() {
                rotate(c, b'0', digits, DIGITS)
            } else {
                c
            }
        }).collect()
    }
}

/// Normalized letter shift in `[0, 26)`.
pub fn letter_shift(shift: i32) -> i32 {
    shift.rem_euclid(LETTERS)
}

/// Normalized digit shift in `[0, 10)`.
pub fn digit_shift(shift: i32) -> i32 {
    shift.rem_euclid(DIGITS)
}

fn rotate(c: char, base: u8, by: i32, modulus: i32) -> char {
    (((c as u8 - base) as i32 + by) % modulus + base as i32) as u8 as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_letters() {
        assert_eq!(ShiftCipher::encode("HELLO", 3), "KHOOR");
        assert_eq!(ShiftCipher::encode("xyz", 3), "abc");
        assert_eq!(ShiftCipher::encode("attack at dawn", 5), "fyyfhp fy ifbs");
    }

    #[test]
    fn test_encode_digits_use_modulo_ten() {
        assert_eq!(ShiftCipher::encode("0189", 3), "3412");
        assert_eq!(ShiftCipher::encode("A1", 13), "N4");
    }

    #[test]
    fn test_negative_and_large_shifts_normalize() {
        assert_eq!(ShiftCipher::encode("abc", -1), "zab");
        assert_eq!(ShiftCipher::encode("abc", 27), "bcd");
        assert_eq!(ShiftCipher::encode("5", -7), "8");
    }

    #[test]
    fn test_decode() {
        assert_eq!(ShiftCipher::decode("KHOOR", 3), "HELLO");
        assert_eq!(ShiftCipher::decode("fyyfhp fy ifbs", 5), "attack at dawn");
    }

    #[test]
    fn test_decode_roundtrips_letters_across_shifts() {
        let text = "Mensaje: prueba local de cifrado Cesar ñ!";
        for shift in -60..60 {
            let encoded = ShiftCipher::encode(text, shift);
            assert_eq!(ShiftCipher::decode(&encoded, shift), text, "shift {}", shift);
        }
    }

    #[test]
    fn test_decode_moves_digits_by_letter_inverse() {
        // 26 - 5 = 21, and 21 mod 10 = 1
        assert_eq!(ShiftCipher::decode("8", 5), "9");
        assert_eq!(ShiftCipher::decode("8", 5), ShiftCipher::encode("8", (26 - 5 % 26) % 26));
        assert_eq!(ShiftCipher::decode("3412", 3), "6745");
        assert_eq!(ShiftCipher::decode("A1", -3), "D4");
    }

    #[test]
    fn test_invert_roundtrips_digits_across_shifts() {
        let text = "Mensaje 2024: prueba local de cifrado Cesar #7 ñ!";
        for shift in -60..60 {
            let encoded = ShiftCipher::encode(text, shift);
            assert_eq!(ShiftCipher::invert(&encoded, shift), text, "shift {}", shift);
        }
    }

    #[test]
    fn test_non_alphanumeric_unchanged() {
        let text = " .,;:!?-_()[]{}@#$%^&*ñé\t\n";
        for shift in [1, 7, 13, 25, -4] {
            assert_eq!(ShiftCipher::encode(text, shift), text);
        }
    }

    #[test]
    fn test_shift_zero_is_identity() {
        assert_eq!(ShiftCipher::encode("Hola 123", 0), "Hola 123");
    }

    #[test]
    fn test_full_letter_cycle_still_moves_digits() {
        // 26 wraps the letters but is 6 modulo 10 for digits
        assert_eq!(ShiftCipher::encode("Hola 123", 26), "Hola 789");
        assert_eq!(ShiftCipher::decode("Hola 789", 26), "Hola 789");
        assert_eq!(ShiftCipher::invert("Hola 789", 26), "Hola 123");
    }
}
