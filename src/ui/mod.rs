pub mod menu;
pub mod progress;
pub mod report;

use crate::utils::consts::LOG_RULE_WIDTH;

pub fn print_banner() {
    let rule = "=".repeat(LOG_RULE_WIDTH);
    println!("{}", rule);
    println!("bitlink-rs: Manchester + BPSK/QPSK over AWGN");
    println!("{}", rule);
}
