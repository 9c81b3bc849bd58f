use serde_json::json;
use sommaire_core::batch::{default_jobs, process_batch, BatchFailure, BatchItem};
use sommaire_core::error::SommaireError;
use sommaire_core::extraction::pdftotext::PdftotextExtractor;
use sommaire_core::report::BatchSummary;
use std::path::{Path, PathBuf};

use super::build_options;
use crate::output;

pub fn run(
    directory: PathBuf,
    recursive: bool,
    source: Option<&str>,
    layout_files: &[PathBuf],
    jobs: Option<usize>,
    output_format: &str,
) -> Result<(), SommaireError> {
    let options = build_options(source, layout_files)?;
    if !PdftotextExtractor::is_available() {
        return Err(SommaireError::PdftotextNotFound);
    }

    let mut files = Vec::new();
    collect_pdfs(&directory, recursive, &mut files)?;
    files.sort();

    if files.is_empty() {
        eprintln!("No PDF files found in {}", directory.display());
        return Ok(());
    }

    let mut items = Vec::with_capacity(files.len());
    let mut unreadable = Vec::new();
    for path in &files {
        let file_id = path
            .strip_prefix(&directory)
            .unwrap_or(path)
            .display()
            .to_string();
        match std::fs::read(path) {
            Ok(bytes) => items.push(BatchItem { file_id, bytes }),
            Err(e) => unreadable.push(BatchFailure {
                file_id,
                reason: e.to_string(),
            }),
        }
    }

    let extractor = PdftotextExtractor::new();
    let mut report = process_batch(
        &items,
        &extractor,
        &options,
        jobs.unwrap_or_else(default_jobs),
    );
    report.failures.extend(unreadable);
    let summary = BatchSummary::from_documents(&report.documents);

    match output_format {
        "json" => output::json::print(&json!({
            "documents": report.documents,
            "failures": report.failures,
            "summary": summary,
        }))?,
        _ => {
            for doc in &report.documents {
                println!("OK      {} ({} record(s))", doc.file_id, doc.records.len());
            }
            for failure in &report.failures {
                println!("FAILED  {}: {}", failure.file_id, failure.reason);
            }
            println!(
                "\nProcessed: {} success, {} failed\n",
                report.succeeded(),
                report.failed()
            );
            output::table::print_summary(&summary);
        }
    }

    Ok(())
}

fn collect_pdfs(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> Result<(), SommaireError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                collect_pdfs(&path, recursive, out)?;
            }
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        {
            out.push(path);
        }
    }
    Ok(())
}
