/// Simulation layer modules
pub mod config;
pub mod log;
pub mod run;
pub mod simulator;

pub use config::*;
pub use log::*;
pub use run::*;
pub use simulator::*;
