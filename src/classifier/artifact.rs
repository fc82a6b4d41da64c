//! On-disk model representation.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::model::ModelMetadata;
use crate::error::{PolarityError, Result};
use crate::featurize::FeaturizerConfig;

/// Bumped whenever the artifact layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// Serialization format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Pretty-printed JSON (`.json`).
    Json,
    /// bincode (`.bin`).
    Binary,
}

impl ModelFormat {
    /// Pick the format for `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ModelFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Ok(ModelFormat::Binary),
            _ => Err(PolarityError::invalid_input(format!(
                "unsupported model file extension: {} (expected .json or .bin)",
                path.display()
            ))),
        }
    }
}

/// Everything needed to rebuild a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub metadata: ModelMetadata,
    pub featurizer: FeaturizerConfig,
    pub terms: Vec<String>,
    pub document_frequency: Vec<u32>,
    pub n_documents: usize,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl ModelArtifact {
    /// Write the artifact to `path` in the format implied by its extension.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ModelFormat::from_path(path)?;

        let file = File::create(path).map_err(|e| PolarityError::from_io_at(e, path))?;
        let mut writer = BufWriter::new(file);
        match format {
            ModelFormat::Json => serde_json::to_writer_pretty(&mut writer, self)?,
            ModelFormat::Binary => bincode::serialize_into(&mut writer, self)?,
        }
        writer.flush()?;
        Ok(())
    }

    /// Read an artifact from `path`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ModelFormat::from_path(path)?;

        let file = File::open(path).map_err(|e| PolarityError::from_io_at(e, path))?;
        let reader = BufReader::new(file);
        let artifact: ModelArtifact = match format {
            ModelFormat::Json => serde_json::from_reader(reader)?,
            ModelFormat::Binary => bincode::deserialize_from(reader)?,
        };

        if artifact.format_version != FORMAT_VERSION {
            return Err(PolarityError::model(format!(
                "unsupported model format version {} (expected {FORMAT_VERSION})",
                artifact.format_version
            )));
        }
        Ok(artifact)
    }
}
