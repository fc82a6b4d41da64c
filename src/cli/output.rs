//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::classifier::TrainingReport;
use crate::cli::args::{OutputFormat, PolarityArgs};
use crate::error::Result;
use crate::evaluation::Metrics;
use crate::prediction::PredictionResult;

/// Result of the `train` command and of the demo's training stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub train_size: usize,
    pub test_size: usize,
    pub report: TrainingReport,
    pub metrics: Metrics,
    pub model_path: Option<String>,
}

/// Result of the `evaluate` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub examples: usize,
    pub metrics: Metrics,
}

/// Render a value as JSON according to `--pretty`.
fn to_json<T: Serialize>(value: &T, args: &PolarityArgs) -> Result<String> {
    Ok(if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "=============== {title} ===============")
}

/// Percentage with two decimals, e.g. `83.50%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// The three headline metrics, one per line.
pub fn write_metrics(out: &mut impl Write, metrics: &Metrics) -> io::Result<()> {
    writeln!(out, "Model quality metrics evaluation")?;
    writeln!(out, "--------------------------------")?;
    writeln!(out, "Accuracy: {}", percent(metrics.accuracy))?;
    writeln!(out, "Auc: {}", percent(metrics.auc))?;
    writeln!(out, "F1Score: {}", percent(metrics.f1))
}

/// Supplementary metrics shown at higher verbosity.
fn write_detailed_metrics(out: &mut impl Write, metrics: &Metrics) -> io::Result<()> {
    writeln!(out, "Auprc: {}", percent(metrics.auprc))?;
    writeln!(
        out,
        "Positive precision/recall: {} / {}",
        percent(metrics.positive_precision),
        percent(metrics.positive_recall)
    )?;
    writeln!(
        out,
        "Negative precision/recall: {} / {}",
        percent(metrics.negative_precision),
        percent(metrics.negative_recall)
    )?;
    writeln!(out, "LogLoss: {:.4}", metrics.log_loss)?;
    writeln!(out, "LogLossReduction: {:.4}", metrics.log_loss_reduction)?;
    writeln!(out, "Entropy: {:.4}", metrics.entropy)?;
    let c = &metrics.confusion;
    writeln!(
        out,
        "Confusion: TP={} FP={} TN={} FN={}",
        c.true_positive, c.false_positive, c.true_negative, c.false_negative
    )
}

/// One `Sentiment: ... | Prediction: ... | Probability: ...` line.
pub fn format_prediction(result: &PredictionResult) -> String {
    format!(
        "Sentiment: {} | Prediction: {} | Probability: {}",
        result.text,
        result.sentiment(),
        result.probability
    )
}

/// Output the result of a training run.
pub fn output_training(summary: &TrainingSummary, args: &PolarityArgs) -> Result<()> {
    let mut out = io::stdout().lock();
    match args.output_format {
        OutputFormat::Json => writeln!(out, "{}", to_json(summary, args)?)?,
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                banner(&mut out, "Create and Train the Model")?;
                writeln!(
                    out,
                    "Trained on {} examples, held out {} ({} epochs, {})",
                    summary.train_size,
                    summary.test_size,
                    summary.report.epochs,
                    summary.report.optimizer
                )?;
                if let Some(warning) = &summary.report.warning {
                    writeln!(out, "Warning: {warning}")?;
                }
                banner(&mut out, "End of training")?;
                writeln!(out)?;
                banner(&mut out, "Evaluating Model accuracy with Test data")?;
            }
            write_metrics(&mut out, &summary.metrics)?;
            if args.verbosity() > 1 {
                write_detailed_metrics(&mut out, &summary.metrics)?;
            }
            if let Some(path) = &summary.model_path {
                writeln!(out, "Model saved to {path}")?;
            }
            if args.verbosity() > 0 {
                banner(&mut out, "End of model evaluation")?;
            }
        }
    }
    Ok(())
}

/// Output the result of evaluating a saved model.
pub fn output_evaluation(summary: &EvaluationSummary, args: &PolarityArgs) -> Result<()> {
    let mut out = io::stdout().lock();
    match args.output_format {
        OutputFormat::Json => writeln!(out, "{}", to_json(summary, args)?)?,
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                writeln!(out, "Evaluated on {} examples", summary.examples)?;
            }
            write_metrics(&mut out, &summary.metrics)?;
            if args.verbosity() > 1 {
                write_detailed_metrics(&mut out, &summary.metrics)?;
            }
        }
    }
    Ok(())
}

/// Output predictions under an optional banner title.
pub fn output_predictions(
    title: Option<&str>,
    results: &[PredictionResult],
    args: &PolarityArgs,
) -> Result<()> {
    let mut out = io::stdout().lock();
    match args.output_format {
        OutputFormat::Json => writeln!(out, "{}", to_json(&results, args)?)?,
        OutputFormat::Human => {
            let title = title.filter(|_| args.verbosity() > 0);
            if let Some(title) = title {
                writeln!(out)?;
                banner(&mut out, title)?;
                writeln!(out)?;
            }
            for result in results {
                writeln!(out, "{}", format_prediction(result))?;
            }
            if title.is_some() {
                banner(&mut out, "End of predictions")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Metrics;

    #[test]
    fn test_metrics_block() {
        let metrics = Metrics::compute(&[0.9, 0.2, 0.7, 0.4], &[true, false, false, true]).unwrap();
        let mut buffer = Vec::new();
        write_metrics(&mut buffer, &metrics).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Accuracy: 50.00%"));
        assert!(text.contains("Auc: 75.00%"));
        assert!(text.contains("F1Score: 50.00%"));
    }

    #[test]
    fn test_prediction_line() {
        let result = PredictionResult {
            text: "This was a very bad steak".to_string(),
            predicted_label: false,
            probability: 0.25,
            score: -1.0986,
        };
        assert_eq!(
            format_prediction(&result),
            "Sentiment: This was a very bad steak | Prediction: Negative | Probability: 0.25"
        );
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.8351), "83.51%");
        assert_eq!(percent(1.0), "100.00%");
    }
}
