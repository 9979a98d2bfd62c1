/// Averaged BER curves for every modulation / line coding pair, as CSV on stdout
use bitlink_rs::phy::{LineCodingKind, Modulation};
use bitlink_rs::sim::{SimulationConfig, Simulator, SnrSweep};
use bitlink_rs::utils::logging::init_logging;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "HELLO")]
    message: String,
    #[arg(long, default_value_t = -6, allow_hyphen_values = true)]
    snr_min: i32,
    #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
    snr_max: i32,
    #[arg(long, default_value_t = 1)]
    snr_step: i32,
    /// Runs averaged per curve
    #[arg(short, long, default_value_t = 100)]
    trials: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let sweep = SnrSweep::new(cli.snr_min, cli.snr_max, cli.snr_step);
    if let Err(e) = sweep.validate() {
        error!("{}", e);
        std::process::exit(1);
    }
    let snr_values = sweep.values();

    let mut header = vec!["snr_db".to_string()];
    let mut columns = Vec::new();
    for modulation in [Modulation::Bpsk, Modulation::Qpsk] {
        for line_coding in [LineCodingKind::Manchester, LineCodingKind::Nrz] {
            header.push(format!("{}_{}", modulation.name(), line_coding.name()));

            let mut sums = vec![0.0; snr_values.len()];
            let mut simulator = Simulator::new();
            for trial in 0..cli.trials {
                let config = SimulationConfig {
                    message: cli.message.clone(),
                    modulation,
                    line_coding,
                    sweep,
                    seed: Some(cli.seed.wrapping_add(trial)),
                };
                let run = match simulator.run(&config) {
                    Ok(run) => run,
                    Err(e) => {
                        error!("{}", e);
                        std::process::exit(1);
                    }
                };
                for (sum, ber) in sums.iter_mut().zip(run.ber_values()) {
                    *sum += ber;
                }
            }
            info!(
                "{} + {}: {} trials done",
                modulation.name(),
                line_coding.name(),
                cli.trials
            );
            let trials = cli.trials.max(1) as f64;
            columns.push(sums.into_iter().map(|s| s / trials).collect::<Vec<_>>());
        }
    }

    println!("{}", header.join(","));
    for (row, snr_db) in snr_values.iter().enumerate() {
        let values: Vec<String> = columns
            .iter()
            .map(|column| format!("{:.6e}", column[row]))
            .collect();
        println!("{},{}", snr_db, values.join(","));
    }
}
