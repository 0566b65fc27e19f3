//! Error types for the noto application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during note management operations.

use std::io;

use thiserror::Error;

/// The main error type for the noto application.
#[derive(Error, Debug)]
pub enum NotoError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: u64 },

    /// Folder was not found when performing an operation.
    #[error("Folder not found: {id}")]
    FolderNotFound { id: u64 },

    /// The note is locked and refuses destructive operations.
    #[error("Note {id} is locked; unlock it first")]
    NoteLocked { id: u64 },

    /// Errors related to the export path.
    #[error("Export failed: {message}")]
    ExportFailed { message: String },

    /// A session command that could not be understood.
    #[error("{message}")]
    InvalidCommand { message: String },
}
