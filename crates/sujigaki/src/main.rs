use clap::Parser;

use sujigaki::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
