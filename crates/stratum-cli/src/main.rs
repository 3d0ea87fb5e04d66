//! `stratum`: a manual driver for the streaming parser core, not a
//! product in its own right — no config file loading beyond CLI flags,
//! no filesystem watching, no editor-protocol surface.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let code = match cli.command {
        cli::Command::Lex(args) => commands::lex::run(args),
        cli::Command::Parse(args) => commands::parse::run(args),
        cli::Command::Facts(args) => commands::facts::run(args),
        cli::Command::Roundtrip(args) => commands::roundtrip::run(args),
        cli::Command::Check(args) => commands::check::run(args),
    };

    std::process::exit(code);
}
