use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Coarse layout hint for the engine — how to partition the page into text
/// regions before recognizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentationMode {
    Auto,
    SingleBlock,
    SingleColumn,
}

impl SegmentationMode {
    /// Tesseract page segmentation mode number.
    pub fn psm(self) -> u8 {
        match self {
            SegmentationMode::Auto => 3,
            SegmentationMode::SingleBlock => 6,
            SegmentationMode::SingleColumn => 4,
        }
    }
}

/// Which recognition backend the engine should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Fast LSTM-based recognizer.
    LstmOnly,
    /// Legacy character classifier.
    Legacy,
}

impl EngineMode {
    pub fn oem(self) -> u8 {
        match self {
            EngineMode::LstmOnly => 1,
            EngineMode::Legacy => 0,
        }
    }
}

/// Symbols the engine may emit: digits, Latin and Turkish letters, and the
/// punctuation that shows up in currency, date and document-number fields.
pub const FULL_WHITELIST: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyzÇĞİÖŞÜçğıöşü.,:/-₺ ";

/// Whitelist for the degraded numeric-only fallback pass.
pub const NUMERIC_WHITELIST: &str = "0123456789.,:/- ";

/// One recognition attempt's engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizeConfig {
    pub segmentation: SegmentationMode,
    pub whitelist: &'static str,
    pub engine: EngineMode,
}

impl RecognizeConfig {
    /// Full-alphabet pass with the given layout hint.
    pub fn full(segmentation: SegmentationMode) -> Self {
        RecognizeConfig {
            segmentation,
            whitelist: FULL_WHITELIST,
            engine: EngineMode::LstmOnly,
        }
    }

    /// Digits-and-punctuation fallback pass, always single-block.
    pub fn numeric_fallback() -> Self {
        RecognizeConfig {
            segmentation: SegmentationMode::SingleBlock,
            whitelist: NUMERIC_WHITELIST,
            engine: EngineMode::LstmOnly,
        }
    }

    /// Whether this is the degraded numeric-only configuration.
    pub fn is_numeric_fallback(&self) -> bool {
        self.whitelist == NUMERIC_WHITELIST
    }
}

/// Abstraction over a text-recognition engine.
/// Implementations accept preprocessed PNG bytes plus a configuration and
/// return the recognized text. No retries here — that is the multi-pass
/// strategy's job.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8], config: &RecognizeConfig) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Scripted backend: a default response, optional per-segmentation-mode
/// overrides, and an optional override for the numeric fallback pass. Each
/// script may be a failure, so every strategy path is drivable without a
/// real engine.
pub struct MockRecognizer {
    default: Result<String, String>,
    by_mode: Vec<(SegmentationMode, Result<String, String>)>,
    fallback: Option<Result<String, String>>,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        MockRecognizer { default: Ok(text.into()), by_mode: Vec::new(), fallback: None }
    }

    /// A backend whose every pass fails with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        MockRecognizer { default: Err(reason.into()), by_mode: Vec::new(), fallback: None }
    }

    /// Override the response for one segmentation mode.
    pub fn respond(mut self, mode: SegmentationMode, text: impl Into<String>) -> Self {
        self.by_mode.push((mode, Ok(text.into())));
        self
    }

    /// Make one segmentation mode fail with an engine error.
    pub fn fail(mut self, mode: SegmentationMode, reason: impl Into<String>) -> Self {
        self.by_mode.push((mode, Err(reason.into())));
        self
    }

    /// Override the response for the numeric fallback pass specifically.
    pub fn respond_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(Ok(text.into()));
        self
    }

    /// Make the numeric fallback pass fail too.
    pub fn fail_fallback(mut self, reason: impl Into<String>) -> Self {
        self.fallback = Some(Err(reason.into()));
        self
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8], config: &RecognizeConfig) -> Result<String, OcrError> {
        let scripted = if config.is_numeric_fallback() && self.fallback.is_some() {
            self.fallback.as_ref().unwrap()
        } else {
            self.by_mode
                .iter()
                .find(|(mode, _)| *mode == config.segmentation)
                .map(|(_, r)| r)
                .unwrap_or(&self.default)
        };
        scripted.clone().map_err(OcrError::Engine)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError, RecognizeConfig};
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(
            &self,
            image_bytes: &[u8],
            config: &RecognizeConfig,
        ) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_variable(Variable::TesseditPagesegMode, &config.segmentation.psm().to_string())
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_variable(Variable::TesseditOcrEngineMode, &config.engine.oem().to_string())
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_variable(Variable::TesseditCharWhitelist, config.whitelist)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}
