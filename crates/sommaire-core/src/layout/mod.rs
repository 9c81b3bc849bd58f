pub mod builtin;
pub mod schema;

use crate::error::SommaireError;
use crate::extraction::table::ColumnKind;
use crate::model::SourceVariant;
use schema::LayoutDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<LayoutDef, SommaireError> {
    let content = std::fs::read_to_string(path).map_err(|e| SommaireError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string read from `source`.
pub fn parse_layout(json: &str, source: &Path) -> Result<LayoutDef, SommaireError> {
    let layout: LayoutDef = serde_json::from_str(json).map_err(|e| SommaireError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<LayoutDef, SommaireError> {
    let layout: LayoutDef = serde_json::from_str(json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
///
/// Ranges must be non-empty and must not overlap; each column kind appears at
/// most once and a description column is required.
pub fn validate_layout(layout: &LayoutDef) -> Result<(), SommaireError> {
    if layout.columns.is_empty() {
        return Err(SommaireError::LayoutInvalid(
            "columns must not be empty".into(),
        ));
    }

    if !layout.line_tolerance.is_finite() || layout.line_tolerance < 0.0 {
        return Err(SommaireError::LayoutInvalid(format!(
            "line_tolerance must be a non-negative number, got {}",
            layout.line_tolerance
        )));
    }

    let mut seen = HashSet::new();
    for col in &layout.columns {
        if !seen.insert(col.column) {
            return Err(SommaireError::LayoutInvalid(format!(
                "column '{}' is defined more than once",
                col.column
            )));
        }

        if !(col.x_min.is_finite() && col.x_max.is_finite()) || col.x_min >= col.x_max {
            return Err(SommaireError::LayoutInvalid(format!(
                "column '{}' has an empty range [{}, {})",
                col.column, col.x_min, col.x_max
            )));
        }
    }

    if layout.column(ColumnKind::Description).is_none() {
        return Err(SommaireError::LayoutInvalid(
            "a description column is required".into(),
        ));
    }

    let mut ranges: Vec<_> = layout.columns.iter().collect();
    ranges.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));
    for pair in ranges.windows(2) {
        if pair[1].x_min < pair[0].x_max {
            return Err(SommaireError::LayoutInvalid(format!(
                "columns '{}' and '{}' overlap",
                pair[0].column, pair[1].column
            )));
        }
    }

    Ok(())
}

/// The layout used for each source variant.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSet {
    pub uv: LayoutDef,
    pub assomption: LayoutDef,
}

impl LayoutSet {
    /// The built-in calibrations.
    pub fn builtin() -> Result<Self, SommaireError> {
        Ok(LayoutSet {
            uv: builtin::preset_for(SourceVariant::Uv)?,
            assomption: builtin::preset_for(SourceVariant::Assomption)?,
        })
    }

    pub fn get(&self, variant: SourceVariant) -> &LayoutDef {
        match variant {
            SourceVariant::Uv => &self.uv,
            SourceVariant::Assomption => &self.assomption,
        }
    }

    /// Replace the layout of the variant `layout` declares.
    pub fn with_override(mut self, layout: LayoutDef) -> Self {
        match layout.source {
            SourceVariant::Uv => self.uv = layout,
            SourceVariant::Assomption => self.assomption = layout,
        }
        self
    }
}
