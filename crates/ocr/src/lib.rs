pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod strategy;
pub mod types;
pub mod upload;

pub use extract::Extractor;
pub use pipeline::{PipelineError, ScanPipeline, ScanResult};
pub use preprocess::{prepare_for_recognition, PreprocessError};
pub use recognizer::{
    EngineMode, MockRecognizer, OcrBackend, OcrError, RecognizeConfig, SegmentationMode,
    FULL_WHITELIST, NUMERIC_WHITELIST,
};
pub use strategy::{PassOutcome, StrategyError};
pub use types::ExtractedFields;
pub use upload::{resize_for_storage, DEFAULT_MAX_WIDTH};
