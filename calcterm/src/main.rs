use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Config;

mod app;
mod config;
mod feedback;
mod keypad;
mod keys;
mod page;
mod utils;

/// File name of the log inside the data directory
const LOG_FILE: &str = "calcterm.log";

/// A calculator for your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Use a different configuration directory
    #[arg(short, long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Print the default settings and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.print_config {
        return match Config::default_settings_toml() {
            Ok(settings) => {
                print!("{settings}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("Failed to serialize settings: {error}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match Config::get(cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = init_logging(&config.data_dir) {
        eprintln!("Failed to set up logging: {error}");
        return ExitCode::FAILURE;
    }
    tracing::info!(data_dir = %config.data_dir.display(), "starting");

    if let Err(error) = App::new(config).run() {
        tracing::error!(%error, "terminal failure");
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Send logs to a file in the data directory, as the terminal is taken by the UI
fn init_logging(data_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_env("CALCTERM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
