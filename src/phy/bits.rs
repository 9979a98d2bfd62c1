use crate::error::{SimError, SimResult};
use tracing::debug;

pub const BITS_PER_CHAR: usize = 8;

/// Text -> bits, 8 bits per character, MSB first.
///
/// Every character must fit in one byte (code point <= 255); anything
/// wider is rejected instead of being truncated.
pub fn text_to_bits(text: &str) -> SimResult<Vec<u8>> {
    let mut bits = Vec::with_capacity(text.chars().count() * BITS_PER_CHAR);

    for (position, character) in text.chars().enumerate() {
        let byte = u8::try_from(u32::from(character))
            .map_err(|_| SimError::InputDomain { character, position })?;
        for i in (0..BITS_PER_CHAR).rev() {
            bits.push((byte >> i) & 1);
        }
    }

    debug!("Text {:?} converted to {} bits", text, bits.len());
    Ok(bits)
}

/// Bits -> text, inverse of [`text_to_bits`]. A trailing partial byte is dropped.
pub fn bits_to_text(bits: &[u8]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|chunk| {
            let byte = chunk
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
            char::from(byte)
        })
        .collect()
}

/// Render the first `limit` bits as a `0`/`1` string for log previews
pub fn format_bits(bits: &[u8], limit: usize) -> String {
    let mut out: String = bits
        .iter()
        .take(limit)
        .map(|&bit| if bit == 0 { '0' } else { '1' })
        .collect();
    if bits.len() > limit {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_bits_hi() {
        let bits = text_to_bits("HI").unwrap();
        assert_eq!(format_bits(&bits, 16), "0100100001001001");
        assert_eq!(bits.len(), 16);
    }

    #[test]
    fn test_empty_text() {
        assert!(text_to_bits("").unwrap().is_empty());
    }

    #[test]
    fn test_latin1_accepted() {
        // 'é' is U+00E9, still a single byte
        let bits = text_to_bits("é").unwrap();
        assert_eq!(bits, vec![1, 1, 1, 0, 1, 0, 0, 1]);
        assert_eq!(bits_to_text(&bits), "é");
    }

    #[test]
    fn test_wide_character_rejected() {
        match text_to_bits("ok你") {
            Err(SimError::InputDomain { character, position }) => {
                assert_eq!(character, '你');
                assert_eq!(position, 2);
            }
            other => panic!("expected InputDomain error, got {:?}", other),
        }
    }

    #[test]
    fn test_bits_to_text_drops_partial_byte() {
        let mut bits = text_to_bits("OK").unwrap();
        bits.extend_from_slice(&[1, 0, 1]);
        assert_eq!(bits_to_text(&bits), "OK");
    }

    #[test]
    fn test_format_bits_truncates() {
        assert_eq!(format_bits(&[1, 0, 1, 1], 2), "10...");
        assert_eq!(format_bits(&[1, 0], 40), "10");
    }
}
