//! JSON export of the note collection.
//!
//! The export is the only artifact the application ever writes: a
//! pretty-printed JSON array of every note, named for the export date. The
//! write is atomic (temp file in the target directory, then persist) so a
//! failed export never leaves a truncated backup behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{Note, NotoError, Result};

/// Default directory for export files: downloads, then home, then the
/// current directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes the full note collection to `noto-backup-<YYYY-MM-DD>.json` in
/// `dir`, dated with the export instant's UTC date.
pub fn export_notes(notes: &[Note], dir: &Path) -> Result<PathBuf> {
    export_notes_on(notes, dir, Utc::now().date_naive())
}

/// Export with an explicit filename date.
pub fn export_notes_on(notes: &[Note], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(NotoError::ExportFailed {
            message: format!("not a directory: {}", dir.display()),
        });
    }

    let file_name = format!("noto-backup-{}.json", date.format("%Y-%m-%d"));
    let path = dir.join(file_name);

    let json = serde_json::to_string_pretty(notes)?;

    debug!("Writing export to temporary file in {}", dir.display());
    let mut temp_file = NamedTempFile::new_in(dir).map_err(NotoError::Io)?;
    temp_file.write_all(json.as_bytes()).map_err(NotoError::Io)?;
    temp_file.flush().map_err(NotoError::Io)?;
    temp_file.persist(&path).map_err(|e| NotoError::Io(e.error))?;

    info!("Exported {} notes to {}", notes.len(), path.display());
    Ok(path)
}
