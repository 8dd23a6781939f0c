use std::process;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use jira_sync::{app, cli::Args};

fn main() {
    setup_logging();

    let args = Args::parse();

    if let Err(err) = app::run(args) {
        eprintln!("{} {}", "x".red(), err);
        process::exit(1);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
