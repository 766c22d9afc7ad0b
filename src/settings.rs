use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::warn;

use crate::pdf::Capabilities;

const FILE_STEM: &str = "cv_extract";
const ENV_PREFIX: &str = "CV_EXTRACT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub lopdf: bool,
    pub pdf_extract: bool,
    pub min_chars: usize,
    pub db_path: String,
    pub batch_chunk: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lopdf: true,
            pdf_extract: true,
            min_chars: 1,
            db_path: "data/resumes.sqlite".into(),
            batch_chunk: 200,
        }
    }
}

impl Settings {
    /// Defaults, then `cv_extract.toml` if present, then `CV_EXTRACT_*` env vars.
    pub fn load() -> Self {
        Self::build(None, ENV_PREFIX).unwrap_or_else(|e| {
            warn!(error = %e, "invalid settings, using defaults");
            Self::default()
        })
    }

    pub fn build(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let d = Self::default();
        let file = match file {
            Some(path) => File::from(path),
            None => File::with_name(FILE_STEM),
        };
        let settings = Config::builder()
            .set_default("lopdf", d.lopdf)?
            .set_default("pdf_extract", d.pdf_extract)?
            .set_default("min_chars", d.min_chars as u64)?
            .set_default("db_path", d.db_path)?
            .set_default("batch_chunk", d.batch_chunk as u64)?
            .add_source(file.required(false))
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            lopdf: self.lopdf,
            pdf_extract: self.pdf_extract,
            min_chars: self.min_chars,
        }
    }
}
