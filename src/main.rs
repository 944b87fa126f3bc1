use clap::Parser;
use tracing_subscriber::EnvFilter;
use wealthdesk::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    run(Cli::parse())
}
