pub mod channel;
pub mod error;
pub mod phy;
pub mod sim;
pub mod ui;
pub mod utils;

pub use error::{SimError, SimResult};
