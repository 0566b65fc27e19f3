//! Folder entity and its display palette.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Display color for a folder card, drawn from a small fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderColor {
    Blue,
    Pink,
    Yellow,
}

impl FolderColor {
    /// The full palette, in display order
    pub const PALETTE: [FolderColor; 3] =
        [FolderColor::Blue, FolderColor::Pink, FolderColor::Yellow];

    /// Draws a random palette color for a newly created folder
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::PALETTE
            .choose(&mut rng)
            .copied()
            .unwrap_or(FolderColor::Blue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderColor::Blue => "blue",
            FolderColor::Pink => "pink",
            FolderColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for FolderColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named grouping of notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique identifier, assigned by the owning notebook
    pub id: u64,
    /// User-editable folder name; non-empty after trimming
    pub name: String,
    /// Creation date, display-only
    pub created_at: DateTime<Utc>,
    /// Card color assigned at creation
    pub color: FolderColor,
    /// Incremented only when a note is created directly into the folder.
    /// A display hint; the live membership count is the authoritative value.
    pub note_count: u32,
}

impl Folder {
    pub fn new(id: u64, name: String, color: FolderColor, created_at: DateTime<Utc>) -> Self {
        Folder {
            id,
            name,
            created_at,
            color,
            note_count: 0,
        }
    }
}
