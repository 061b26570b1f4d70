use thiserror::Error;
use tracing::{debug, warn};

use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError, RecognizeConfig, SegmentationMode};
use crate::types::ExtractedFields;

/// Confidence penalty on results recovered through the numeric-only
/// fallback pass, floored at zero.
const FALLBACK_PENALTY: u8 = 20;

/// Layout hints tried in priority order on the primary path.
const PRIMARY_MODES: [SegmentationMode; 3] = [
    SegmentationMode::Auto,
    SegmentationMode::SingleBlock,
    SegmentationMode::SingleColumn,
];

#[derive(Debug, Error)]
pub enum StrategyError {
    /// Primary and fallback recognition both failed.
    #[error("recognition failed: {primary}; fallback: {fallback}")]
    Exhausted { primary: OcrError, fallback: OcrError },
}

/// One recognition pass and what was read out of it.
#[derive(Debug)]
pub struct PassOutcome {
    pub config: RecognizeConfig,
    pub raw_text: String,
    pub fields: ExtractedFields,
}

/// Drive the backend across segmentation modes until an attempt yields a
/// document number.
///
/// Attempts run strictly in sequence — each one is only issued after the
/// previous attempt's extraction failed the stopping condition. When no
/// attempt produces a document number the first attempt's result is
/// returned as the best effort. An engine error on any primary attempt
/// switches to a single numeric-only pass; if that fails too, both failure
/// reasons surface together. At most four recognition calls are issued.
pub fn run<R: OcrBackend>(backend: &R, image: &[u8]) -> Result<PassOutcome, StrategyError> {
    let mut first: Option<PassOutcome> = None;

    for mode in PRIMARY_MODES {
        let config = RecognizeConfig::full(mode);
        let raw_text = match backend.recognize(image, &config) {
            Ok(text) => text,
            Err(err) => {
                warn!(?mode, error = %err, "recognition attempt failed, trying numeric fallback");
                return run_fallback(backend, image, err);
            }
        };
        let fields = Extractor::extract(&raw_text);
        debug!(
            ?mode,
            confidence = fields.confidence,
            found_document = fields.document_number.is_some(),
            "recognition attempt finished"
        );
        let outcome = PassOutcome { config, raw_text, fields };
        if outcome.fields.document_number.is_some() {
            return Ok(outcome);
        }
        if first.is_none() {
            first = Some(outcome);
        }
    }

    // No attempt found a document number; best effort is attempt 1.
    Ok(first.expect("primary mode list is non-empty"))
}

fn run_fallback<R: OcrBackend>(
    backend: &R,
    image: &[u8],
    primary: OcrError,
) -> Result<PassOutcome, StrategyError> {
    let config = RecognizeConfig::numeric_fallback();
    match backend.recognize(image, &config) {
        Ok(raw_text) => {
            let mut fields = Extractor::extract(&raw_text);
            fields.confidence = fields.confidence.saturating_sub(FALLBACK_PENALTY);
            debug!(confidence = fields.confidence, "numeric fallback recovered a result");
            Ok(PassOutcome { config, raw_text, fields })
        }
        Err(fallback) => Err(StrategyError::Exhausted { primary, fallback }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::MockRecognizer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RECEIPT: &str = "FİŞ No: 84213\nToplam: 125,50 TL\n04.08.2025\nNAKİT ödeme";
    const NO_DOC: &str = "Toplam: 125,50 TL\n04.08.2025";

    /// Wraps a backend and counts how many recognition calls it receives.
    struct Counting<R: OcrBackend> {
        inner: R,
        calls: AtomicUsize,
    }

    impl<R: OcrBackend> Counting<R> {
        fn new(inner: R) -> Self {
            Counting { inner, calls: AtomicUsize::new(0) }
        }
    }

    impl<R: OcrBackend> OcrBackend for Counting<R> {
        fn recognize(
            &self,
            image_bytes: &[u8],
            config: &RecognizeConfig,
        ) -> Result<String, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.recognize(image_bytes, config)
        }
    }

    #[test]
    fn first_attempt_with_document_number_wins() {
        let backend = MockRecognizer::new(RECEIPT);
        let outcome = run(&backend, b"img").unwrap();
        assert_eq!(outcome.config.segmentation, SegmentationMode::Auto);
        assert_eq!(outcome.fields.document_number.as_deref(), Some("84213"));
        assert_eq!(outcome.fields.confidence, 90);
    }

    #[test]
    fn falls_through_to_single_block_result() {
        // Auto finds no document number; SingleBlock does. The SingleBlock
        // attempt's full result is returned — raw text included, no merge.
        let backend = MockRecognizer::new(NO_DOC).respond(SegmentationMode::SingleBlock, RECEIPT);
        let outcome = run(&backend, b"img").unwrap();
        assert_eq!(outcome.config.segmentation, SegmentationMode::SingleBlock);
        assert_eq!(outcome.raw_text, RECEIPT);
        assert_eq!(outcome.fields.document_number.as_deref(), Some("84213"));
    }

    #[test]
    fn exhausted_modes_return_first_attempt() {
        let backend = MockRecognizer::new(NO_DOC)
            .respond(SegmentationMode::SingleBlock, "ikinci deneme")
            .respond(SegmentationMode::SingleColumn, "üçüncü deneme");
        let outcome = run(&backend, b"img").unwrap();
        assert_eq!(outcome.config.segmentation, SegmentationMode::Auto);
        assert_eq!(outcome.raw_text, NO_DOC);
        assert!(outcome.fields.document_number.is_none());
        // Amount and date still extracted from attempt 1.
        assert_eq!(outcome.fields.confidence, 45);
    }

    #[test]
    fn engine_error_switches_to_numeric_fallback() {
        let backend = MockRecognizer::new(RECEIPT)
            .fail(SegmentationMode::Auto, "engine timeout")
            .respond_fallback("84213\n125,50 TL\n04.08.2025");
        let outcome = run(&backend, b"img").unwrap();
        assert!(outcome.config.is_numeric_fallback());
        assert_eq!(outcome.fields.document_number.as_deref(), Some("84213"));
        // 30 + 25 + 20 = 75, minus the fallback penalty of 20.
        assert_eq!(outcome.fields.confidence, 55);
    }

    #[test]
    fn fallback_penalty_floors_at_zero() {
        let backend = MockRecognizer::new("")
            .fail(SegmentationMode::Auto, "boom")
            .respond_fallback("hiçbir şey");
        let outcome = run(&backend, b"img").unwrap();
        assert_eq!(outcome.fields.confidence, 0);
    }

    #[test]
    fn fallback_confidence_stays_within_bounds() {
        // Numeric fallback can at most match document number + amount +
        // date (75), so after the penalty the score is ≤ 55 — comfortably
        // inside the documented 0–70 fallback bound.
        let backend = MockRecognizer::failing("down").respond_fallback("84213 125,50 TL 1.1.24");
        let outcome = run(&backend, b"img").unwrap();
        assert!(outcome.fields.confidence <= 70);
    }

    #[test]
    fn both_paths_failing_surfaces_both_reasons() {
        let backend = MockRecognizer::new(RECEIPT)
            .fail(SegmentationMode::Auto, "primary down")
            .fail_fallback("fallback down");
        let err = run(&backend, b"img").unwrap_err();
        let StrategyError::Exhausted { primary, fallback } = err;
        assert!(primary.to_string().contains("primary down"));
        assert!(fallback.to_string().contains("fallback down"));
    }

    #[test]
    fn early_exit_issues_a_single_call() {
        let backend = Counting::new(MockRecognizer::new(RECEIPT));
        run(&backend, b"img").unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exhausting_all_modes_issues_three_calls() {
        let backend = Counting::new(MockRecognizer::new(NO_DOC));
        run(&backend, b"img").unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn worst_case_is_four_calls() {
        // Two document-free passes, an engine error on the third, then the
        // numeric fallback: the longest path the strategy can take.
        let backend = Counting::new(
            MockRecognizer::new(NO_DOC)
                .fail(SegmentationMode::SingleColumn, "late failure")
                .respond_fallback("84213"),
        );
        let outcome = run(&backend, b"img").unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);
        assert!(outcome.config.is_numeric_fallback());
    }

    #[test]
    fn error_on_later_attempt_also_falls_back() {
        // Auto succeeds without a document number, SingleBlock errors: the
        // strategy still degrades to the numeric pass.
        let backend = MockRecognizer::new(NO_DOC)
            .fail(SegmentationMode::SingleBlock, "mid-run failure")
            .respond_fallback("54321");
        let outcome = run(&backend, b"img").unwrap();
        assert!(outcome.config.is_numeric_fallback());
        assert_eq!(outcome.fields.document_number.as_deref(), Some("54321"));
        assert_eq!(outcome.fields.confidence, 10);
    }
}
