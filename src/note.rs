//! Core data structures for the noto application.
//!
//! This module contains the primary note entity used throughout the
//! application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length enforced by the input surface.
pub const MAX_TITLE_LEN: usize = 50;

/// Represents a single note in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, assigned by the owning notebook
    pub id: u64,
    /// Note title
    pub title: String,
    /// Free-form body text
    pub body: String,
    /// Whether the note has been archived
    pub archived: bool,
    /// When the note was created; rewritten by an edit that supplies a date
    pub created_at: DateTime<Utc>,
    /// Folder the note is filed in, if any
    pub folder_id: Option<u64>,
}

impl Note {
    /// Creates a new active note with the given title and body
    pub fn new(
        id: u64,
        title: String,
        body: String,
        created_at: DateTime<Utc>,
        folder_id: Option<u64>,
    ) -> Self {
        Note {
            id,
            title,
            body,
            archived: false,
            created_at,
            folder_id,
        }
    }
}
