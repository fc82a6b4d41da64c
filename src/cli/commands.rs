//! Command implementations for the polarity CLI.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::classifier::Model;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::load_examples;
use crate::evaluation::evaluate_examples;
use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
use crate::prediction::Predictor;

/// Single text scored by the demo.
pub const DEMO_SINGLE_TEXT: &str = "This was a very bad steak";

/// Texts batch-scored by the demo.
pub const DEMO_BATCH_TEXTS: [&str; 2] = ["This was a horrible meal", "I love this spaghetti."];

/// Execute the parsed command line; runs the demo without a subcommand.
pub fn execute_command(args: PolarityArgs) -> Result<()> {
    match &args.command {
        Some(Command::Train(train_args)) => train(train_args, &args),
        Some(Command::Evaluate(evaluate_args)) => evaluate(evaluate_args, &args),
        Some(Command::Predict(predict_args)) => predict(predict_args, &args),
        None => run_demo(&args),
    }
}

fn load_model(path: &Path) -> Result<Model> {
    Model::load(path).with_context(|| format!("failed to load model from {}", path.display()))
}

fn run_pipeline(config: PipelineConfig) -> Result<PipelineOutcome> {
    let data_path = config.data_path.clone();
    Pipeline::new(config)
        .run()
        .with_context(|| format!("training on {} failed", data_path.display()))
}

/// Build the pipeline configuration from an optional file plus flag overrides.
fn training_config(args: &TrainArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    config.data_path = args.data.clone();
    if let Some(test_fraction) = args.test_fraction {
        config.test_fraction = test_fraction;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
        config.trainer.seed = seed;
    }
    if let Some(optimizer) = args.optimizer {
        config.trainer.optimizer = optimizer;
    }
    config.validate().context("invalid training configuration")?;
    Ok(config)
}

fn train(args: &TrainArgs, cli_args: &PolarityArgs) -> Result<()> {
    let outcome = run_pipeline(training_config(args)?)?;

    let model_path = match &args.output {
        Some(path) => {
            outcome
                .model
                .save(path)
                .with_context(|| format!("failed to save model to {}", path.display()))?;
            Some(path.display().to_string())
        }
        None => None,
    };

    output_training(
        &TrainingSummary {
            train_size: outcome.train_size,
            test_size: outcome.test_size,
            report: outcome.report,
            metrics: outcome.metrics,
            model_path,
        },
        cli_args,
    )?;
    Ok(())
}

fn evaluate(args: &EvaluateArgs, cli_args: &PolarityArgs) -> Result<()> {
    let model = load_model(&args.model)?;
    let examples = load_examples(&args.data)
        .with_context(|| format!("failed to load examples from {}", args.data.display()))?;
    let metrics = evaluate_examples(&model, &examples)
        .with_context(|| format!("failed to evaluate on {}", args.data.display()))?;

    output_evaluation(
        &EvaluationSummary {
            examples: examples.len(),
            metrics,
        },
        cli_args,
    )?;
    Ok(())
}

fn predict(args: &PredictArgs, cli_args: &PolarityArgs) -> Result<()> {
    let predictor = Predictor::new(Arc::new(load_model(&args.model)?));
    let results = predictor.predict_batch(&args.texts)?;
    output_predictions(None, &results, cli_args)?;
    Ok(())
}

/// Train on the sample corpus with default settings, print held-out metrics,
/// then score one text and a small batch.
fn run_demo(args: &PolarityArgs) -> Result<()> {
    let config = PipelineConfig {
        data_path: args.demo_data.clone(),
        ..PipelineConfig::default()
    };
    let outcome = run_pipeline(config)?;

    output_training(
        &TrainingSummary {
            train_size: outcome.train_size,
            test_size: outcome.test_size,
            report: outcome.report,
            metrics: outcome.metrics,
            model_path: None,
        },
        args,
    )?;

    let predictor = Predictor::new(Arc::new(outcome.model));

    let single = predictor.predict(DEMO_SINGLE_TEXT)?;
    output_predictions(
        Some("Prediction test with a single example"),
        std::slice::from_ref(&single),
        args,
    )?;

    let batch = predictor.predict_batch(&DEMO_BATCH_TEXTS)?;
    output_predictions(Some("Prediction test with multiple examples"), &batch, args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn train_args(config: Option<PathBuf>) -> TrainArgs {
        TrainArgs {
            data: PathBuf::from("reviews.tsv"),
            test_fraction: Some(0.3),
            seed: Some(9),
            optimizer: None,
            config,
            output: None,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"test_fraction": 0.1, "trainer": {"l2": 0.05}}"#).unwrap();

        let config = training_config(&train_args(Some(path))).unwrap();
        assert_eq!(config.data_path, PathBuf::from("reviews.tsv"));
        assert_eq!(config.test_fraction, 0.3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.trainer.seed, 9);
        assert_eq!(config.trainer.l2, 0.05);
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let err = training_config(&train_args(Some(PathBuf::from("/nonexistent/polarity.json"))))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/polarity.json"));
    }

    #[test]
    fn test_invalid_fraction_flag() {
        let mut args = train_args(None);
        args.test_fraction = Some(0.0);
        assert!(training_config(&args).is_err());
    }
}
