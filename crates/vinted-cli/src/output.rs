//! Writes retrieval results into the output directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use vinted_scraper::Retrieval;

/// Raw page saved here when no item record could be found in it.
pub(crate) const DIAGNOSTIC_FILENAME: &str = "item_details_not_found.html";

/// Writes `item.json`, `item_summary` and every asset under `dir`, creating
/// the directory if needed. Returns the paths written, in order.
pub(crate) fn write_retrieval(dir: &Path, retrieval: &Retrieval) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(retrieval.assets.len() + 2);

    let json = serde_json::to_string_pretty(retrieval.details.data())?;
    written.push(write_file(dir, "item.json", json.as_bytes())?);
    written.push(write_file(
        dir,
        "item_summary",
        retrieval.summary.render().as_bytes(),
    )?);

    for asset in &retrieval.assets {
        written.push(write_file(dir, &asset.filename, &asset.bytes)?);
    }

    Ok(written)
}

/// Saves the page that could not be parsed and returns its path.
pub(crate) fn write_diagnostic(dir: &Path, body: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    write_file(dir, DIAGNOSTIC_FILENAME, body.as_bytes())
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(path)
}
