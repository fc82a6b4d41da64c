//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::classifier::OptimizerKind;
use crate::pipeline::DEFAULT_DATA_PATH;

/// Polarity - binary sentiment classification for short texts
#[derive(Parser, Debug, Clone)]
#[command(name = "polarity")]
#[command(about = "Train, evaluate and apply a binary text sentiment classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PolarityArgs {
    /// Verbosity level (-v normal, -vv info logs, -vvv debug logs)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Corpus used by the demo run when no subcommand is given
    #[arg(long = "data", value_name = "DATA_FILE", env = "POLARITY_DATA", default_value = DEFAULT_DATA_PATH)]
    pub demo_data: PathBuf,

    /// Subcommand to execute; without one the demo runs
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl PolarityArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split a corpus, train a model and report held-out metrics
    Train(TrainArgs),

    /// Evaluate a saved model on a labeled corpus
    Evaluate(EvaluateArgs),

    /// Predict the sentiment of one or more texts
    Predict(PredictArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Tab-separated `<text>\t<label>` corpus
    #[arg(short, long, value_name = "DATA_FILE", env = "POLARITY_DATA")]
    pub data: PathBuf,

    /// Fraction of examples held out for evaluation
    #[arg(short, long)]
    pub test_fraction: Option<f64>,

    /// Seed for the split and the optimizer
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Optimizer used for training
    #[arg(long)]
    pub optimizer: Option<OptimizerKind>,

    /// Pipeline configuration file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Save the trained model (.json or .bin)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Saved model (.json or .bin)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Labeled corpus to evaluate on
    #[arg(short, long, value_name = "DATA_FILE", env = "POLARITY_DATA")]
    pub data: PathBuf,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Saved model (.json or .bin)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Text to classify (repeatable)
    #[arg(short, long = "text", value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
