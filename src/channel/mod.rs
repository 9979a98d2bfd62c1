pub mod awgn;

pub use awgn::{AwgnChannel, noise_std, signal_power};
