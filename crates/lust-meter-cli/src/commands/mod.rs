//! CLI command definitions and handlers.

pub mod predict;
pub mod sparkles;

use clap::{Parser, Subcommand};

/// Lust Meter - Discover your irresistible magnetism
#[derive(Parser)]
#[command(name = "lust-meter")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Shared predict arguments (paths, limits, output flags).
    #[command(flatten)]
    pub predict: predict::PredictArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Predict the lust level of one or more photos
    Predict(predict::PredictArgs),
    /// Print the decorative sparkle layout as JSON lines
    Sparkles,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every input produced a prediction.
    Success = 0,
    /// At least one input was rejected, ignored, or unreadable.
    Rejected = 1,
    /// The command could not run.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
