mod cli;
mod config;
mod helper;

use clap::Parser;
use cli::{Cli, Handler, Result};
use log::LevelFilter;

fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    log::debug!("using volume group {}", config.volume_group);

    cli.command().handler(&config)
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Info).parse_default_env();
    if cli.quiet {
        logger.filter_level(LevelFilter::Off);
    }
    logger.init();

    if let Err(e) = run(cli) {
        eprintln!("thinsnap: {}", e);
        std::process::exit(1);
    }
}
