//! CLI entry point for the raster maze solver

use clap::Parser;
use mazenav::io::cli::{Cli, FileProcessor};

fn main() -> mazenav::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
