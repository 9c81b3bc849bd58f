use crate::error::SommaireError;
use crate::layout::schema::LayoutDef;
use crate::layout::validate_layout;
use crate::model::SourceVariant;

const UV_JSON: &str = include_str!("../../../../layouts/uv.json");
const ASSOMPTION_JSON: &str = include_str!("../../../../layouts/assomption.json");

/// Available predefined layouts, one per source variant.
pub const PRESETS: &[&str] = &["uv", "assomption"];

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<LayoutDef, SommaireError> {
    let json = match name {
        "uv" => UV_JSON,
        "assomption" => ASSOMPTION_JSON,
        _ => {
            return Err(SommaireError::LayoutInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let layout: LayoutDef = serde_json::from_str(json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Built-in layout for a source variant.
pub fn preset_for(variant: SourceVariant) -> Result<LayoutDef, SommaireError> {
    load_preset(variant.key())
}
