pub mod batch;
pub mod layouts;
pub mod parse;

use sommaire_core::error::SommaireError;
use sommaire_core::layout::load_layout;
use sommaire_core::ExtractOptions;
use std::path::PathBuf;

/// Built-in layouts with the user's overrides and forced source applied.
fn build_options(
    source: Option<&str>,
    layout_files: &[PathBuf],
) -> Result<ExtractOptions, SommaireError> {
    let mut options = ExtractOptions::builtin()?;
    if let Some(source) = source {
        options = options.with_source(source.parse()?);
    }
    for path in layout_files {
        let layout = load_layout(path)?;
        tracing::debug!(path = %path.display(), source = %layout.source, "layout override");
        options = options.with_layout(layout);
    }
    Ok(options)
}
