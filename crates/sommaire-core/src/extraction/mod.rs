pub mod lines;
pub mod pdftotext;
pub mod table;

use crate::error::SommaireError;

/// A word as placed on the page by the layout provider.
///
/// `x` is the left edge and `y` the top edge, in page units with the origin at
/// the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedWord {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl PositionedWord {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        PositionedWord {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Raw page text, used for anchor and metadata matching.
    pub text: String,
    pub words: Vec<PositionedWord>,
}

/// Trait for PDF layout backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text and word positions from PDF bytes, one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, SommaireError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
