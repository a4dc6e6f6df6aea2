//! VAPID public key decoding.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decode a URL-safe base64 application server key to raw bytes.
///
/// Servers hand the key out in the URL-safe alphabet with padding stripped;
/// push APIs want the raw bytes. Normalizes `-`/`_` back to the standard
/// alphabet, restores padding to a multiple of four, then runs an ordinary
/// 4-to-3 decode.
pub fn decode_public_key(key: &str) -> Result<Vec<u8>> {
    let mut normalized: String = key
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    STANDARD
        .decode(normalized.as_bytes())
        .map_err(|e| Error::KeyDecode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    #[test]
    fn test_round_trips_url_safe_unpadded() {
        // Sequences chosen so the standard encoding exercises '+', '/',
        // and both one- and two-byte padding tails.
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![0x00],
            vec![0xff, 0xfe],
            vec![0xfb, 0xef, 0xbe],
            vec![0x04, 0x8a, 0x7d, 0x3c, 0x11, 0x90, 0xaa],
            (0u8..=255).collect(),
        ];

        for bytes in cases {
            let encoded = URL_SAFE_NO_PAD.encode(&bytes);
            let decoded = decode_public_key(&encoded).unwrap();
            assert_eq!(decoded, bytes, "round-trip failed for {encoded:?}");
        }
    }

    #[test]
    fn test_accepts_already_padded_input() {
        let encoded = base64::engine::general_purpose::URL_SAFE.encode([1u8, 2, 3, 4]);
        assert_eq!(decode_public_key(&encoded).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_accepts_standard_alphabet_input() {
        let encoded = STANDARD.encode([0xfb, 0xff, 0x00]);
        assert_eq!(decode_public_key(&encoded).unwrap(), vec![0xfb, 0xff, 0x00]);
    }

    #[test]
    fn test_decodes_p256_sized_key() {
        // Uncompressed P-256 points are 65 bytes and start with 0x04.
        let mut point = vec![0x04u8];
        point.extend((0u8..64).map(|i| i.wrapping_mul(7)));
        let encoded = URL_SAFE_NO_PAD.encode(&point);

        let decoded = decode_public_key(&encoded).unwrap();
        assert_eq!(decoded.len(), 65);
        assert_eq!(decoded[0], 0x04);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(
            decode_public_key("not valid base64!!"),
            Err(Error::KeyDecode(_))
        ));
    }
}
