use std::io;

use anyhow::Result;
use clap::Parser;
use eons_graph::config::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    eons_graph::run(&args, &mut stdout.lock())
}
