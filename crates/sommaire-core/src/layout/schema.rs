use serde::{Deserialize, Serialize};

use crate::extraction::lines::DEFAULT_LINE_TOLERANCE;
use crate::extraction::table::{ColumnDef, ColumnKind};
use crate::model::SourceVariant;

/// Column calibration for one insurer's summary page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Variant whose parser consumes this layout.
    pub source: SourceVariant,
    /// Vertical tolerance, in points, for grouping words into lines.
    #[serde(default = "default_line_tolerance")]
    pub line_tolerance: f64,
    /// Checked in order; the first range containing a word's X takes it.
    pub columns: Vec<ColumnDef>,
}

fn default_line_tolerance() -> f64 {
    DEFAULT_LINE_TOLERANCE
}

impl LayoutDef {
    pub fn column(&self, kind: ColumnKind) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.column == kind)
    }
}
