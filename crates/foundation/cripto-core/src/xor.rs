//! Repeating-Key XOR
//!
//! `out[i] = data[i] ^ key[i % key.len()]`. The transform is its own inverse.

pub struct XorCipher;

impl XorCipher {
    /// Encode or decode `input` under `key`.
    ///
    /// An empty key is a defined no-op and returns the input unchanged.
    pub fn transform(input: &[u8], key: &[u8]) -> Vec<u8> {
        if key.is_empty() {
            return input.to_vec();
        }

        input.iter()
            .zip(key.iter().cycle())
            .map(|(a, b)| a ^ b)
            .collect()
    }

    /// Single-byte specialization used by the 256-key sweep.
    pub fn transform_byte(input: &[u8], key: u8) -> Vec<u8> {
        input.iter().map(|b| b ^ key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_known_vector() {
        let encrypted = XorCipher::transform(b"Secreto", b"abc");
        assert_eq!(encrypted, vec![0x32, 0x07, 0x00, 0x13, 0x07, 0x17, 0x0e]);
    }

    #[test]
    fn test_xor_symmetric() {
        let inputs: [&[u8]; 4] = [b"", b"HELLO", b"Hola Mundo!", &[0x00, 0xff, 0x80, 0x7f, 0x10]];
        let keys: [&[u8]; 4] = [b"K", b"KEY", b"clave", &[0xff, 0x00]];

        for input in inputs {
            for key in keys {
                let encrypted = XorCipher::transform(input, key);
                assert_eq!(XorCipher::transform(&encrypted, key), input);
            }
        }
    }

    #[test]
    fn test_xor_empty_key_is_noop() {
        assert_eq!(XorCipher::transform(b"untouched", b""), b"untouched");
        assert_eq!(XorCipher::transform(b"", b""), b"");
    }

    #[test]
    fn test_transform_byte_matches_repeating_key() {
        let data = b"some plaintext";
        assert_eq!(XorCipher::transform_byte(data, 0x2a), XorCipher::transform(data, &[0x2a]));
    }
}
