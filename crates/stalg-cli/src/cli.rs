//! CLI definitions for stalg.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "stalg",
    version,
    about = "Structured Text algorithm and method checker",
    infer_subcommands = true,
    after_help = "Examples:\n  stalg check                       # check files matched by stalg.toml\n  stalg check src/Motor.st          # check one file\n  stalg dump --entry method m.st    # print the AST as JSON\n  stalg tokens m.st                 # print the token stream"
)]
pub struct Cli {
    /// Show debug logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file (defaults to stalg.toml or .stalg.toml in the working directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Grammar entry point used to parse each file.
    #[arg(long, global = true, value_enum)]
    pub entry: Option<Entry>,
    /// Diagnostic output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// When to colour terminal output.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse files and report diagnostics.
    Check {
        /// Files or directories (defaults to the configured include patterns).
        paths: Vec<PathBuf>,
    },
    /// Print the syntax tree of a file as JSON.
    Dump {
        /// File to parse.
        path: PathBuf,
        /// Print compact JSON on a single line.
        #[arg(long)]
        compact: bool,
    },
    /// Print the token stream of a file.
    Tokens {
        /// File to lex.
        path: PathBuf,
        /// Include whitespace, comments and pragmas.
        #[arg(long)]
        trivia: bool,
    },
}

/// Which construct a whole file is parsed as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entry {
    /// Any number of `ALGORITHM` and `METHOD` units.
    #[default]
    Source,
    /// A single `ALGORITHM`.
    Algorithm,
    /// A single `METHOD`.
    Method,
    /// A bare statement list.
    Statements,
    /// A single expression.
    Expression,
    /// `[name :=] initializer`.
    Initializer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `path:line:col: error[E001]: message`
    #[default]
    Text,
    /// One JSON object per diagnostic.
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}
