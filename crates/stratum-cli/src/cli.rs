//! Argument surface: one `clap` derive enum per subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stratum", about = "Streaming lexer/parser/fact-stream toolkit for JSON and ZON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dump the generic token stream for a source file
    Lex(LexArgs),
    /// Parse a source file and print its syntax tree
    Parse(ParseArgs),
    /// Dump the fact stream derived from a source file
    Facts(FactsArgs),
    /// Re-emit and re-parse a source file, checking the round-trip invariant
    Roundtrip(RoundtripArgs),
    /// Print diagnostics for a source file
    Check(CheckArgs),
}

#[derive(Args)]
pub struct LexArgs {
    /// Source file to lex
    pub file: PathBuf,
    /// Language (inferred from extension if not specified)
    #[arg(short, long)]
    pub lang: Option<String>,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Source file to parse
    pub file: PathBuf,
    #[arg(short, long)]
    pub lang: Option<String>,
    /// Print a serialized tree instead of the s-expression dump
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FactsArgs {
    /// Source file to analyze
    pub file: PathBuf,
    #[arg(short, long)]
    pub lang: Option<String>,
    /// Only dump facts from one predicate category
    /// (lexical, structural, syntactic, semantic, editor, meta)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct RoundtripArgs {
    /// Source file to round-trip
    pub file: PathBuf,
    #[arg(short, long)]
    pub lang: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Source file to check
    pub file: PathBuf,
    #[arg(short, long)]
    pub lang: Option<String>,
    /// Colorize diagnostic output
    #[arg(long, value_parser = ["auto", "always", "never"], default_value = "auto")]
    pub color: String,
}
