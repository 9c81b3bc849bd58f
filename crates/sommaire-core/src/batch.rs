use serde::Serialize;
use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::extraction::PdfExtractor;
use crate::unify::UnifiedDocument;
use crate::{extract_pdf, ExtractOptions};

/// One document to process.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub file_id: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub file_id: String,
    pub reason: String,
}

/// Successes and failures of a batch, each in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub documents: Vec<UnifiedDocument>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.documents.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn record_count(&self) -> usize {
        self.documents.iter().map(|d| d.records.len()).sum()
    }
}

/// Number of workers used when none is requested.
pub fn default_jobs() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Extract every item on up to `jobs` worker threads.
///
/// A document that fails, or panics, is reported in `failures` and does not
/// affect the others.
pub fn process_batch(
    items: &[BatchItem],
    extractor: &dyn PdfExtractor,
    options: &ExtractOptions,
    jobs: usize,
) -> BatchReport {
    let jobs = jobs.clamp(1, items.len().max(1));
    let next = &AtomicUsize::new(0);
    let mut outcomes: Vec<Option<Result<UnifiedDocument, String>>> =
        (0..items.len()).map(|_| None).collect();

    thread::scope(|s| {
        let workers: Vec<_> = (0..jobs)
            .map(|_| {
                s.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(item) = items.get(index) else {
                            break;
                        };
                        done.push((index, process_one(item, extractor, options)));
                    }
                    done
                })
            })
            .collect();

        for worker in workers {
            if let Ok(done) = worker.join() {
                for (index, outcome) in done {
                    outcomes[index] = Some(outcome);
                }
            }
        }
    });

    let mut report = BatchReport::default();
    for (item, outcome) in items.iter().zip(outcomes) {
        match outcome {
            Some(Ok(document)) => report.documents.push(document),
            Some(Err(reason)) => report.failures.push(BatchFailure {
                file_id: item.file_id.clone(),
                reason,
            }),
            None => report.failures.push(BatchFailure {
                file_id: item.file_id.clone(),
                reason: "worker thread stopped before processing".into(),
            }),
        }
    }

    tracing::debug!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        jobs,
        "batch finished"
    );
    report
}

fn process_one(
    item: &BatchItem,
    extractor: &dyn PdfExtractor,
    options: &ExtractOptions,
) -> Result<UnifiedDocument, String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        extract_pdf(&item.bytes, extractor, &item.file_id, options)
    }));

    match result {
        Ok(Ok(document)) => {
            tracing::debug!(
                file = %item.file_id,
                records = document.records.len(),
                "document extracted"
            );
            Ok(document)
        }
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => {
            let reason = format!("panicked: {}", panic_message(payload.as_ref()));
            tracing::warn!(file = %item.file_id, %reason, "document extraction panicked");
            Err(reason)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SommaireError;
    use crate::extraction::PageContent;

    /// Fails on "bad", panics on "boom", otherwise yields an anchorless page.
    struct StubExtractor;

    impl PdfExtractor for StubExtractor {
        fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, SommaireError> {
            match pdf_bytes {
                b"bad" => Err(SommaireError::Extraction("corrupt".into())),
                b"boom" => panic!("layout provider crashed"),
                _ => Ok(vec![PageContent::default()]),
            }
        }

        fn backend_name(&self) -> &str {
            "stub"
        }
    }

    fn item(id: &str, bytes: &[u8]) -> BatchItem {
        BatchItem {
            file_id: id.into(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_failures_keep_input_order() {
        let items = vec![item("a.pdf", b"bad"), item("b.pdf", b"x"), item("c.pdf", b"bad")];
        let options = ExtractOptions::builtin().unwrap();
        let report = process_batch(&items, &StubExtractor, &options, 2);
        assert_eq!(report.succeeded(), 0);
        let ids: Vec<_> = report.failures.iter().map(|f| f.file_id.as_str()).collect();
        assert_eq!(ids, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert!(report.failures[0].reason.contains("corrupt"));
        assert!(report.failures[1].reason.contains("unknown source variant"));
    }

    #[test]
    fn test_panic_is_isolated() {
        let items = vec![item("a.pdf", b"boom"), item("b.pdf", b"bad")];
        let options = ExtractOptions::builtin().unwrap();
        let report = process_batch(&items, &StubExtractor, &options, 4);
        assert_eq!(report.failed(), 2);
        assert!(report.failures[0].reason.contains("layout provider crashed"));
        assert!(report.failures[1].reason.contains("corrupt"));
    }

    #[test]
    fn test_empty_batch() {
        let options = ExtractOptions::builtin().unwrap();
        let report = process_batch(&[], &StubExtractor, &options, 0);
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.record_count(), 0);
    }

    #[test]
    fn test_default_jobs_is_positive() {
        assert!(default_jobs() >= 1);
    }
}
