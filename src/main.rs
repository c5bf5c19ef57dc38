//! labelprint - a category picker with autocomplete suggestions.

use labelprint::cli::Cli;
use labelprint::config::Config;
use labelprint::error::Result;
use labelprint::{logging, tui};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Headless output goes to stdout, so its logs go to stderr
    if cli.is_headless() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    if cli.is_headless() {
        return tui::headless::run_headless(cli, &config).await;
    }

    tui::run(&config)?;
    Ok(0)
}
