use bitlink_rs::SimResult;
use bitlink_rs::phy::{LineCodingKind, Modulation, bits_to_text};
use bitlink_rs::sim::{SimulationConfig, SimulationRun, Simulator};
use bitlink_rs::ui::progress::{ProgressManager, templates};
use bitlink_rs::ui::{menu, print_banner, report};
use bitlink_rs::utils::consts::*;
use bitlink_rs::utils::dump::{load_results_json, save_run};
use bitlink_rs::utils::logging::init_logging;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "BER simulation of a Manchester-coded BPSK/QPSK link over AWGN", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sweep from flags and/or a JSON config file
    Run(RunArgs),
    /// Prompt for the parameters, repeat until declined
    Interactive {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, default_value_t = DEFAULT_THREADS)]
        threads: usize,
        #[arg(long)]
        no_save: bool,
    },
    /// Print the BER table and statistics of a saved results JSON
    Show { results: PathBuf },
}

#[derive(Args)]
struct RunArgs {
    /// JSON file with a SimulationConfig; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    message: Option<String>,
    #[arg(long, value_enum)]
    modulation: Option<Modulation>,
    #[arg(long, value_enum)]
    line_coding: Option<LineCodingKind>,
    #[arg(long, allow_hyphen_values = true)]
    snr_min: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    snr_max: Option<i32>,
    #[arg(long)]
    snr_step: Option<i32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long, default_value_t = DEFAULT_THREADS)]
    threads: usize,
    #[arg(long)]
    no_save: bool,
}

impl RunArgs {
    fn to_config(&self) -> SimResult<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        if let Some(modulation) = self.modulation {
            config.modulation = modulation;
        }
        if let Some(line_coding) = self.line_coding {
            config.line_coding = line_coding;
        }
        if let Some(min_db) = self.snr_min {
            config.sweep.min_db = min_db;
        }
        if let Some(max_db) = self.snr_max {
            config.sweep.max_db = max_db;
        }
        if let Some(step_db) = self.snr_step {
            config.sweep.step_db = step_db;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn execute(config: &SimulationConfig, threads: usize, save: bool) -> SimResult<SimulationRun> {
    config.validate()?;

    let progress_manager = ProgressManager::new();
    let total = config.sweep.values().len() as u64;
    let bar_ready = progress_manager
        .create_bar("sweep", total, templates::SWEEP, config.modulation.name())
        .is_ok();
    let on_point = |p: &bitlink_rs::sim::BerPoint| {
        if bar_ready {
            let _ = progress_manager.inc("sweep", 1);
            let _ = progress_manager.set_message("sweep", &format!("SNR {} dB", p.snr_db));
        }
    };

    let mut simulator = Simulator::new();
    let run = if threads > 1 {
        simulator.run_parallel(config, threads, on_point)?
    } else {
        simulator.run_with_progress(config, on_point)?
    };
    if bar_ready {
        let _ = progress_manager.finish("sweep", "done");
    }
    progress_manager.finish_all();

    print_report(&run);

    if save {
        let artifacts = save_run(&run, Path::new(LOG_DIR), Path::new(RESULTS_DIR))?;
        info!("Log: {}", artifacts.log_path.display());
        info!("Results: {}", artifacts.json_path.display());
        if let Some(wav) = &artifacts.wav_path {
            info!("Signal snapshot: {}", wav.display());
        }
    }

    Ok(run)
}

fn print_report(run: &SimulationRun) {
    println!();
    print!("{}", report::format_ber_table(run));
    println!();
    println!("{}", report::format_summary(run));
    if let Some(last) = run.points.last() {
        println!(
            "Recovered at {} dB: {:?}",
            last.snr_db,
            bits_to_text(&run.last_recovered)
        );
    }
}

fn show(path: &Path) -> SimResult<()> {
    let run = load_results_json(path)?;
    info!(
        "Loaded {} points ({} + {}) from {}",
        run.points.len(),
        run.config.modulation.name(),
        run.config.line_coding.name(),
        path.display()
    );
    print_report(&run);
    Ok(())
}

fn interactive(seed: Option<u64>, threads: usize, save: bool) -> SimResult<()> {
    let mut defaults = SimulationConfig {
        seed,
        ..Default::default()
    };
    loop {
        let config = menu::prompt_config(&defaults)?;
        execute(&config, threads, save)?;
        if !menu::ask_run_again()? {
            break;
        }
        defaults = config;
    }
    Ok(())
}

fn main() {
    init_logging();
    print_banner();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => args
            .to_config()
            .and_then(|config| execute(&config, args.threads, !args.no_save))
            .map(|_| ()),
        Some(Commands::Interactive {
            seed,
            threads,
            no_save,
        }) => interactive(seed, threads, !no_save),
        Some(Commands::Show { results }) => show(&results),
        None => interactive(None, DEFAULT_THREADS, true),
    };

    match result {
        Ok(()) => info!("Exiting gracefully..."),
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}
