pub mod assomption;
pub mod header;
pub mod normalize;
pub mod uv;
pub mod values;

use crate::error::SommaireError;
use crate::extraction::lines::{reconstruct_lines, TextLine};
use crate::extraction::table::{self, ColumnDef, ColumnRow};
use crate::extraction::PageContent;
use crate::layout::schema::LayoutDef;
use crate::model::{
    CoverageItem, DocumentExtraction, InsuredPerson, RawTotals, SkippedLine, SourceVariant,
};
use header::DocumentMetadata;
use normalize::normalize_date;
use values::is_numeric_amount;

/// Position of the line scan relative to the coverage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    BeforeTable,
    InTable,
    Done,
}

/// What a variant parser needs to know about the scan to classify a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanContext {
    pub state: ParseState,
    /// An item is open and can take continuation or detail lines.
    pub has_item: bool,
}

/// Outcome of classifying one reconstructed line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    EnterTable,
    LeaveTable,
    Item(CoverageItem),
    /// Text extending the open item's product name.
    Continuation(String),
    /// Parenthesized note attached to the open item.
    Detail(String),
    Total(RawTotals),
    /// Table row that carried amounts but none numeric.
    Rejected(String),
    Skip,
}

/// Per-insurer strategy driven by [`parse_document`].
pub trait VariantParser: Send + Sync {
    fn variant(&self) -> SourceVariant;

    /// Does this page text hold the summary table?
    fn detect_anchor(&self, page_text: &str) -> bool;

    /// Document date and advisor, searched over every page.
    fn extract_metadata(&self, pages: &[PageContent]) -> DocumentMetadata;

    /// Insured persons printed on the summary page, in reading order.
    fn extract_insured(&self, page_text: &str, lines: &[TextLine]) -> Vec<InsuredPerson>;

    fn classify_line(&self, ctx: ScanContext, line: &TextLine, row: &ColumnRow) -> LineEvent;

    /// Have enough totals been seen to stop scanning?
    fn totals_complete(&self, totals: &RawTotals) -> bool;
}

pub fn parser_for(variant: SourceVariant) -> &'static dyn VariantParser {
    match variant {
        SourceVariant::Uv => &uv::UvParser,
        SourceVariant::Assomption => &assomption::AssomptionParser,
    }
}

/// Pages inspected by [`detect_source`].
const DETECTION_PAGES: usize = 3;

/// Identify the insurer from the first pages' text.
///
/// UV is checked before Assomption on each page; the first hit wins.
pub fn detect_source(pages: &[PageContent]) -> Option<SourceVariant> {
    pages.iter().take(DETECTION_PAGES).find_map(|page| {
        if page.text.contains(uv::SUMMARY_ANCHOR) {
            Some(SourceVariant::Uv)
        } else if page.text.contains(assomption::SUMMARY_ANCHOR) {
            Some(SourceVariant::Assomption)
        } else {
            None
        }
    })
}

/// Items and totals collected from the summary page lines.
#[derive(Debug, Clone, Default)]
pub struct TableScan {
    pub items: Vec<CoverageItem>,
    pub totals: RawTotals,
    pub skipped_lines: Vec<SkippedLine>,
}

/// Parse one document with the given variant and calibration.
///
/// Fails when no page carries the variant's summary anchor or when no insured
/// person can be read from that page. The first anchored page is used.
pub fn parse_document(
    pages: &[PageContent],
    variant: SourceVariant,
    layout: &LayoutDef,
    file_id: &str,
) -> Result<DocumentExtraction, SommaireError> {
    let parser = parser_for(variant);
    let metadata = parser.extract_metadata(pages);

    let Some(page) = pages.iter().find(|p| parser.detect_anchor(&p.text)) else {
        tracing::warn!(file = file_id, %variant, "summary page not found");
        return Err(SommaireError::SummaryPageNotFound {
            file: file_id.to_string(),
            variant,
        });
    };

    let lines = reconstruct_lines(&page.words, layout.line_tolerance);
    let insured = parser.extract_insured(&page.text, &lines);
    if insured.is_empty() {
        tracing::warn!(file = file_id, %variant, page = page.page_number, "insured person not parsed");
        return Err(SommaireError::InsuredNotParsed {
            file: file_id.to_string(),
            variant,
        });
    }

    let scan = scan_table(parser, &lines, &layout.columns);
    tracing::debug!(
        file = file_id,
        %variant,
        page = page.page_number,
        lines = lines.len(),
        insured = insured.len(),
        items = scan.items.len(),
        skipped = scan.skipped_lines.len(),
        "parsed summary page"
    );

    Ok(DocumentExtraction {
        source: variant,
        file_id: file_id.to_string(),
        document_date: metadata.document_date.as_deref().map(normalize_date),
        document_date_raw: metadata.document_date,
        advisor_name: metadata.advisor_name,
        insured,
        items: scan.items,
        totals: scan.totals,
        skipped_lines: scan.skipped_lines,
    })
}

/// Run the table state machine over the reconstructed lines, top to bottom.
pub fn scan_table(
    parser: &dyn VariantParser,
    lines: &[TextLine],
    columns: &[ColumnDef],
) -> TableScan {
    let mut scan = TableScan::default();
    let mut state = ParseState::BeforeTable;
    let mut has_item = false;

    for line in lines {
        if state == ParseState::Done {
            break;
        }

        let row = table::classify_line(line, columns);
        let ctx = ScanContext { state, has_item };
        let event = parser.classify_line(ctx, line, &row);
        tracing::trace!(y = line.y, ?state, ?event, "classified line");

        match event {
            LineEvent::EnterTable => state = ParseState::InTable,
            LineEvent::LeaveTable => {
                state = ParseState::BeforeTable;
                has_item = false;
            }
            LineEvent::Item(item) => {
                scan.items.push(item);
                has_item = true;
            }
            LineEvent::Continuation(text) => {
                if let Some(item) = scan.items.last_mut().filter(|_| has_item) {
                    item.product_name.push(' ');
                    item.product_name.push_str(&text);
                }
            }
            LineEvent::Detail(text) => {
                if let Some(item) = scan.items.last_mut().filter(|_| has_item) {
                    item.details = Some(text);
                }
            }
            LineEvent::Total(totals) => {
                scan.totals.merge(totals);
                if parser.totals_complete(&scan.totals) {
                    state = ParseState::Done;
                }
            }
            LineEvent::Rejected(reason) => {
                let line_text = line.text();
                tracing::debug!(line = %line_text, %reason, "table row rejected");
                scan.skipped_lines.push(SkippedLine { line_text, reason });
            }
            LineEvent::Skip => {}
        }
    }

    scan
}

/// Shared decision for a table row once variant-specific lines are ruled out.
///
/// `coverage` is the coverage cell as the variant wants it classified.
pub(crate) fn table_row_event(ctx: ScanContext, row: &ColumnRow, coverage: &str) -> LineEvent {
    let desc = row.description.trim();
    if desc.is_empty() {
        return LineEvent::Skip;
    }

    if desc.starts_with('(') && ctx.has_item {
        return LineEvent::Detail(desc.to_string());
    }

    let coverage = coverage.trim();
    let annual = row.annual_premium.trim();

    if is_numeric_amount(coverage) || is_numeric_amount(annual) {
        return LineEvent::Item(CoverageItem {
            product_name: desc.to_string(),
            coverage_amount: non_empty(coverage),
            annual_premium: non_empty(annual),
            monthly_premium: non_empty(&row.monthly_premium),
            payment_duration: non_empty(&row.payment_duration),
            details: None,
        });
    }

    if coverage.is_empty() && annual.is_empty() {
        return if ctx.has_item {
            LineEvent::Continuation(desc.to_string())
        } else {
            LineEvent::Skip
        };
    }

    LineEvent::Rejected(format!(
        "no numeric coverage amount or premium (amount: {coverage:?}, premium: {annual:?})"
    ))
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
