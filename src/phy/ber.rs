use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitErrors {
    pub errors: usize,
    pub compared: usize,
}

impl BitErrors {
    pub fn ber(&self) -> f64 {
        if self.compared == 0 {
            0.0
        } else {
            self.errors as f64 / self.compared as f64
        }
    }
}

/// Position-by-position comparison over the shorter of the two sequences.
/// Extra bits on either side are ignored rather than counted as errors.
pub fn count_bit_errors(original: &[u8], received: &[u8]) -> BitErrors {
    let compared = original.len().min(received.len());
    let errors = original
        .iter()
        .zip(received.iter())
        .filter(|(a, b)| a != b)
        .count();
    BitErrors { errors, compared }
}

pub fn compute_ber(original: &[u8], received: &[u8]) -> f64 {
    count_bit_errors(original, received).ber()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(compute_ber(&[1, 0, 1, 1], &[1, 0, 1, 1]), 0.0);
    }

    #[test]
    fn test_partial_errors() {
        let result = count_bit_errors(&[1, 0, 1, 1], &[0, 0, 1, 0]);
        assert_eq!(result, BitErrors { errors: 2, compared: 4 });
        assert_eq!(result.ber(), 0.5);
    }

    #[test]
    fn test_truncates_to_shorter() {
        // trailing mismatch beyond the shorter length is not counted
        assert_eq!(compute_ber(&[1, 0], &[1, 0, 1, 1, 1]), 0.0);
        assert_eq!(compute_ber(&[1, 0, 1], &[0]), 1.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(compute_ber(&[], &[]), 0.0);
        assert_eq!(compute_ber(&[1, 1], &[]), 0.0);
    }
}
