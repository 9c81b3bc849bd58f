use sommaire_core::error::SommaireError;
use sommaire_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use super::build_options;
use crate::output;

pub fn run(
    pdf_file: PathBuf,
    source: Option<&str>,
    layout_files: &[PathBuf],
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), SommaireError> {
    let options = build_options(source, layout_files)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let file_id = pdf_file.display().to_string();
    let document = sommaire_core::extract_pdf(&pdf_bytes, &extractor, &file_id, &options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            std::fs::write(&path, output::json::to_pretty(&document)?)?;
            eprintln!(
                "Extracted {} record(s) from {}, written to {}",
                document.records.len(),
                document.pdf_filename,
                path.display()
            );
            for w in &document.warnings {
                eprintln!("  warning: {} {:?} could not be read as an amount", w.field, w.raw);
            }
            if !document.skipped_lines.is_empty() {
                eprintln!(
                    "  {} table line(s) skipped",
                    document.skipped_lines.len()
                );
            }
        }
        None => match output_format {
            "json" => output::json::print(&document)?,
            _ => output::table::print_document(&document),
        },
    }

    Ok(())
}
