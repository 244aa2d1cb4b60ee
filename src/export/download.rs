//! Export file persistence
//!
//! Saves a generated export as `{name}.md`. The content is written to
//! a named temporary file in the target directory first and then
//! persisted over the final path, so readers never observe a partial
//! file and the temporary file is released on every failure path.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Content type for delivered export files
pub const EXPORT_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Turn a document title into a safe export filename (no extension).
///
/// Alphanumerics (umlauts included), `-`, `_` and `.` pass through;
/// everything else becomes `_`. An empty result falls back to
/// "export".
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        "export".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Save export content as `{name}.md` in `dir`, overwriting any
/// existing file of that name. Returns the final path.
pub fn save(content: &str, name: &str, dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let target = dir.join(format!("{}.md", sanitize_filename(name)));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    // On persist failure the temporary file comes back in the error
    // and is removed when it drops.
    tmp.persist(&target).map_err(|e| e.error)?;

    Ok(target)
}
