use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::preprocess::{self, PreprocessError};
use crate::recognizer::OcrBackend;
use crate::strategy::{self, StrategyError};
use crate::types::ExtractedFields;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The input buffer is corrupt or not an image — a client error, never
    /// retried.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] PreprocessError),
    #[error(transparent)]
    Recognition(#[from] StrategyError),
}

/// The payload handed back to the caller: the raw text of whichever
/// attempt was selected, plus the structured fields read out of it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub raw_text: String,
    pub extracted_data: ExtractedFields,
    pub confidence: u8,
}

/// Orchestrates: preprocess → multi-pass recognition → field extraction.
///
/// Each scan owns its buffers exclusively; the pipeline holds no mutable
/// state, so one instance can serve concurrent requests.
pub struct ScanPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ScanPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process raw image bytes (multipart upload or camera capture).
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanResult, PipelineError> {
        let image = preprocess::prepare_for_recognition(data)?;
        let outcome = strategy::run(&self.recognizer, &image)?;
        let confidence = outcome.fields.confidence;
        Ok(ScanResult {
            raw_text: outcome.raw_text,
            extracted_data: outcome.fields,
            confidence,
        })
    }

    /// Process an image file on disk.
    pub async fn scan_file(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.scan_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{MockRecognizer, SegmentationMode};
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(8, 8, |_, _| Luma([200u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn scan_bytes_produces_full_payload() {
        let pipeline = ScanPipeline::new(MockRecognizer::new(
            "FİŞ No: 84213\nToplam: 125,50 TL\n04.08.2025\nNAKİT ödeme",
        ));
        let result = pipeline.scan_bytes(&tiny_png()).unwrap();
        assert_eq!(result.extracted_data.document_number.as_deref(), Some("84213"));
        assert_eq!(result.confidence, 90);
        assert_eq!(result.confidence, result.extracted_data.confidence);
    }

    #[test]
    fn scan_bytes_rejects_non_image_input() {
        let pipeline = ScanPipeline::new(MockRecognizer::new("irrelevant"));
        let err = pipeline.scan_bytes(b"not an image at all").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage(_)));
    }

    #[test]
    fn scan_bytes_surfaces_exhausted_recognition() {
        let pipeline = ScanPipeline::new(MockRecognizer::failing("engine offline"));
        let err = pipeline.scan_bytes(&tiny_png()).unwrap_err();
        assert!(matches!(err, PipelineError::Recognition(_)));
        assert!(err.to_string().contains("engine offline"));
    }

    #[test]
    fn empty_extraction_is_a_result_not_an_error() {
        // Unreadable-but-valid image: all-None fields with zero confidence
        // go back to the caller, who treats it as "nothing could be read".
        let pipeline = ScanPipeline::new(MockRecognizer::new("xyz garbled noise"));
        let result = pipeline.scan_bytes(&tiny_png()).unwrap();
        assert!(result.extracted_data.is_empty());
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn result_serializes_with_api_field_names() {
        let pipeline = ScanPipeline::new(
            MockRecognizer::new("boş").respond(SegmentationMode::Auto, "No: 12345"),
        );
        let result = pipeline.scan_bytes(&tiny_png()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"rawText\""));
        assert!(json.contains("\"extractedData\""));
        assert!(json.contains("\"evrakNo\":\"12345\""));
    }

    #[tokio::test]
    async fn scan_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let pipeline = ScanPipeline::new(MockRecognizer::new("Evrak No: 4821"));
        let result = pipeline.scan_file(&path).await.unwrap();
        assert_eq!(result.extracted_data.document_number.as_deref(), Some("4821"));
    }

    #[tokio::test]
    async fn scan_file_missing_path_is_io_error() {
        let pipeline = ScanPipeline::new(MockRecognizer::new(""));
        let err = pipeline.scan_file(Path::new("/nonexistent/receipt.png")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
