//! Tournament store file handling.
//!
//! The store is a single pretty-printed JSON array of tournaments. A missing
//! store reads as empty; writes go through a sibling temp file and a rename
//! so an interrupted write never leaves half a store behind.

use std::path::{Path, PathBuf};

use crease_engine::model::Tournament;

use crate::error::CliError;

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let mut content = std::fs::read_to_string(path)?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Load every tournament from the store at `path`.
///
/// # Errors
///
/// `CliError::Io` when the file exists but cannot be read, and
/// `CliError::InvalidInput` when it is not a valid store.
pub fn load_store(path: &Path) -> Result<Vec<Tournament>, CliError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = read_text(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|e| {
        CliError::InvalidInput(format!("{} is not a tournament store: {}", path.display(), e))
    })
}

/// Replace the store at `path` with `tournaments`.
pub fn save_store(path: &Path, tournaments: &[Tournament]) -> Result<(), CliError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(tournaments)?;
    let tmp = temp_sibling(path);
    std::fs::write(&tmp, json + "\n")?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use crease_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new("data/leagues/store.json");
/// ensure_parent_dir(path).unwrap();
/// // Now "data/leagues/" exists
/// ```
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
