// Physical layer: bit conversion, line coding, modulation and error scoring

pub mod ber;
pub mod bits;
pub mod line_coding;
pub mod modulation;

pub use ber::{BitErrors, compute_ber, count_bit_errors};
pub use bits::{bits_to_text, format_bits, text_to_bits};
pub use line_coding::{LineCode, LineCodingKind};
pub use modulation::{ModulatedSignal, Modem, Modulation};
