//! End-to-end training runs on corpora written to disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use polarity::classifier::OptimizerKind;
use polarity::prelude::*;
use tempfile::TempDir;

/// Write a separable good/bad corpus with some lexical variation.
fn write_corpus(path: &Path) {
    let subjects = ["the food", "the service", "our waiter", "the pasta", "this place"];
    let mut lines = Vec::new();
    for i in 0..60 {
        let subject = subjects[i % subjects.len()];
        lines.push(format!("{subject} was good\t1"));
        lines.push(format!("{subject} was bad\t0"));
    }
    fs::write(path, lines.join("\n")).unwrap();
}

fn config_for(path: &Path, optimizer: OptimizerKind) -> PipelineConfig {
    PipelineConfig {
        data_path: path.to_path_buf(),
        trainer: TrainerConfig {
            optimizer,
            max_epochs: 300,
            ..TrainerConfig::default()
        },
        ..PipelineConfig::default()
    }
}

#[test]
fn test_separable_corpus_for_both_optimizers() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("reviews.tsv");
    write_corpus(&data);

    for optimizer in [OptimizerKind::Sdca, OptimizerKind::Sgd] {
        let outcome = Pipeline::new(config_for(&data, optimizer)).run()?;

        assert_eq!(outcome.train_size + outcome.test_size, 120);
        assert_eq!(outcome.test_size, 24);
        assert!(
            outcome.metrics.accuracy >= 0.95,
            "{optimizer}: accuracy {}",
            outcome.metrics.accuracy
        );
        assert!(outcome.metrics.auc >= 0.95);
        assert_eq!(outcome.report.optimizer, optimizer.as_str());
    }
    Ok(())
}

#[test]
fn test_same_seed_gives_same_model() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("reviews.tsv");
    write_corpus(&data);

    let first = Pipeline::new(config_for(&data, OptimizerKind::Sdca)).run()?;
    let second = Pipeline::new(config_for(&data, OptimizerKind::Sdca)).run()?;

    assert_eq!(first.model.weights(), second.model.weights());
    assert_eq!(first.model.bias(), second.model.bias());
    assert_eq!(first.metrics, second.metrics);
    Ok(())
}

#[test]
fn test_tiny_epoch_budget_still_yields_a_model() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("reviews.tsv");
    write_corpus(&data);

    let mut config = config_for(&data, OptimizerKind::Sdca);
    config.trainer.max_epochs = 1;
    config.trainer.tolerance = 1e-12;
    let outcome = Pipeline::new(config).run()?;

    assert!(outcome.report.warning.is_some());
    assert!(!outcome.report.converged);
    let predictor = Predictor::new(Arc::new(outcome.model));
    let result = predictor.predict("the food was good")?;
    assert!((0.0..=1.0).contains(&result.probability));
    Ok(())
}

#[test]
fn test_missing_corpus_is_file_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&temp_dir.path().join("absent.tsv"), OptimizerKind::Sdca);

    let err = Pipeline::new(config).run().unwrap_err();
    assert!(matches!(err, PolarityError::FileNotFound { .. }));
}

#[test]
fn test_one_class_test_split_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("positive.tsv");
    fs::write(&data, "nice\t1\ngreat\t1\nlovely\t1\nsuperb\t1\nfine\t1\n").unwrap();

    let err = Pipeline::new(config_for(&data, OptimizerKind::Sdca))
        .run()
        .unwrap_err();
    assert!(matches!(err, PolarityError::InvalidInput(_)));
}

#[test]
fn test_bundled_sample_corpus() -> Result<()> {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/yelp_labelled.txt");
    let outcome = Pipeline::new(PipelineConfig {
        data_path: data,
        ..PipelineConfig::default()
    })
    .run()?;

    assert_eq!(outcome.train_size, 240);
    assert_eq!(outcome.test_size, 60);
    assert!(outcome.metrics.accuracy > 0.7);
    assert!(outcome.metrics.auc > 0.8);
    Ok(())
}
