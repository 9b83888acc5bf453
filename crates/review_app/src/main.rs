use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod platform;

use platform::logging::LogDestination;

/// Review the result of a bookmark validation run from a command script.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script to replay; reads standard input when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// RON configuration file
    #[arg(short, long, default_value = platform::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Append outbound JSON messages to this file instead of standard output
    #[arg(short, long)]
    outbound: Option<PathBuf>,

    /// Override the configured log destination
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_problem) = match platform::config::load_config(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (platform::config::ReviewConfig::default(), Some(err)),
    };

    let destination = cli.log.unwrap_or(config.log_destination);
    platform::logging::initialize(destination, config.level_filter());
    if let Some(err) = config_problem {
        review_logging::review_warn!("Using default configuration: {:#}", err);
    }

    platform::app::run_app(platform::app::AppOptions {
        script: cli.script,
        outbound: cli.outbound,
        config,
    })
}
