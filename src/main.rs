//! CLI entry point for building photo collages

use clap::Parser;
use photocollage::io::cli::{Cli, CollageRunner};

fn main() -> photocollage::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let runner = CollageRunner::new(cli);
    runner.run().map(drop)
}
