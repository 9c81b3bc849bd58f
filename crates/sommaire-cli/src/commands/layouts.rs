use sommaire_core::error::SommaireError;
use sommaire_core::layout::builtin;
use sommaire_core::layout::schema::LayoutDef;
use std::path::Path;

use crate::output;

pub fn list() -> Result<(), SommaireError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        println!("  {:<12} {} (v{})", name, layout.name, layout.version);
        if let Some(ref desc) = layout.description {
            println!("               {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), SommaireError> {
    let layout = builtin::load_preset(preset)?;
    output::json::print(&layout)
}

pub fn validate(file: &Path) -> Result<(), SommaireError> {
    let layout = sommaire_core::layout::load_layout(file)?;

    println!(
        "Layout '{}' (v{}) for {} is valid.",
        layout.name, layout.version, layout.source
    );
    println!("  Line tolerance: {}", layout.line_tolerance);
    for col in &layout.columns {
        println!("  {:<18} [{}, {})", col.column.to_string(), col.x_min, col.x_max);
    }

    // Check for potential issues (warnings, not errors)
    let warnings = gaps(&layout);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Horizontal ranges no column covers; words there are dropped from rows.
fn gaps(layout: &LayoutDef) -> Vec<String> {
    let mut columns: Vec<_> = layout.columns.iter().collect();
    columns.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));
    columns
        .windows(2)
        .filter(|pair| pair[0].x_max < pair[1].x_min)
        .map(|pair| {
            format!(
                "no column covers [{}, {}) between '{}' and '{}'",
                pair[0].x_max, pair[1].x_min, pair[0].column, pair[1].column
            )
        })
        .collect()
}
