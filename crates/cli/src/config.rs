use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI configuration. Every field has a default, so both a missing file
/// and an empty table are fine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language pack.
    pub lang: String,
    /// Tesseract data directory; engine default when unset.
    pub tessdata: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig { lang: "tur".to_string(), tessdata: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_width: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig { max_width: tahsilat_ocr::DEFAULT_MAX_WIDTH }
    }
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(CliConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
