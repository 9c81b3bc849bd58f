pub mod batch;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod report;
pub mod unify;

use error::SommaireError;
use extraction::{PageContent, PdfExtractor};
use layout::schema::LayoutDef;
use layout::LayoutSet;
use model::SourceVariant;
use unify::UnifiedDocument;

/// How documents are routed and calibrated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Forced source; detected from the document when `None`.
    pub source: Option<SourceVariant>,
    pub layouts: LayoutSet,
}

impl ExtractOptions {
    /// Source auto-detection with the built-in layouts.
    pub fn builtin() -> Result<Self, SommaireError> {
        Ok(ExtractOptions {
            source: None,
            layouts: LayoutSet::builtin()?,
        })
    }

    pub fn with_source(mut self, source: SourceVariant) -> Self {
        self.source = Some(source);
        self
    }

    /// Use `layout` for the variant it declares.
    pub fn with_layout(mut self, layout: LayoutDef) -> Self {
        self.layouts = self.layouts.with_override(layout);
        self
    }
}

/// Main API entry point: extract and unify the summary of one PDF.
///
/// `file_id` names the document in errors, logs and the unified records.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    file_id: &str,
    options: &ExtractOptions,
) -> Result<UnifiedDocument, SommaireError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    extract_pages(&pages, file_id, options)
}

/// Same as [`extract_pdf`], from pages already laid out.
pub fn extract_pages(
    pages: &[PageContent],
    file_id: &str,
    options: &ExtractOptions,
) -> Result<UnifiedDocument, SommaireError> {
    let variant = match options.source {
        Some(variant) => variant,
        None => parsing::detect_source(pages).ok_or_else(|| {
            tracing::warn!(file = file_id, "no known summary anchor in the first pages");
            SommaireError::UnknownSourceVariant(format!("not detected in {file_id}"))
        })?,
    };

    let extraction =
        parsing::parse_document(pages, variant, options.layouts.get(variant), file_id)?;
    Ok(unify::unify(&extraction))
}
