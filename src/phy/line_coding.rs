use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Bit-level line code applied before modulation
pub trait LineCode: Send {
    fn encode(&self, bits: &[u8]) -> Vec<u8>;
    fn decode(&self, coded: &[u8]) -> Vec<u8>;
    /// Coded bits emitted per source bit
    fn expansion(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineCodingKind {
    #[default]
    Manchester,
    Nrz,
}

impl LineCodingKind {
    pub fn create(self) -> Box<dyn LineCode> {
        match self {
            LineCodingKind::Manchester => Box::new(Manchester),
            LineCodingKind::Nrz => Box::new(Nrz),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LineCodingKind::Manchester => "Manchester",
            LineCodingKind::Nrz => "NRZ",
        }
    }
}

// Manchester encoding: 0 -> [0, 1], 1 -> [1, 0]
pub struct Manchester;

impl LineCode for Manchester {
    fn encode(&self, bits: &[u8]) -> Vec<u8> {
        let mut coded = Vec::with_capacity(bits.len() * 2);
        for &bit in bits {
            if bit == 0 {
                coded.extend_from_slice(&[0, 1]);
            } else {
                coded.extend_from_slice(&[1, 0]);
            }
        }
        coded
    }

    /// Invalid pairs (00, 11) decode to 0; a dangling last bit is dropped.
    fn decode(&self, coded: &[u8]) -> Vec<u8> {
        coded
            .chunks_exact(2)
            .map(|pair| match pair {
                [1, 0] => 1,
                _ => 0,
            })
            .collect()
    }

    fn expansion(&self) -> usize {
        2
    }
}

/// No line coding, bits go out as-is
pub struct Nrz;

impl LineCode for Nrz {
    fn encode(&self, bits: &[u8]) -> Vec<u8> {
        bits.to_vec()
    }

    fn decode(&self, coded: &[u8]) -> Vec<u8> {
        coded.to_vec()
    }

    fn expansion(&self) -> usize {
        1
    }
}
