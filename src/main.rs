use clap::Parser;
use tracing::error;

use contact_manager::cli::{self, Cli};
use contact_manager::config::AppConfig;
use contact_manager::logging;

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => cli::effective_config(&cli, config),
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.logging.level, cli.verbose);

    if let Err(e) = cli::run(cli.command, config) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
