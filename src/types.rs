//! Shared types for the noto application.
//!
//! This module contains the crate-wide `Result` alias and the session
//! command surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::{DateFilter, NotoError, SortMode, TagFilter};

/// A specialized Result type for noto operations.
pub type Result<T> = std::result::Result<T, NotoError>;

/// Commands accepted inside a noto session
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note, filed into the selected folder if one is set
    Add {
        /// Title of the note (trimmed, capped at 50 characters)
        #[clap(short = 'T', long)]
        title: String,

        /// Body text of the note
        #[clap(short, long)]
        body: String,
    },

    /// Show the current note view (active and archived sections)
    List {
        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Set the search keyword; omit it to clear the search
    Search {
        /// Substring matched against titles and bodies, case-insensitively
        keyword: Option<String>,
    },

    /// Change the sort order of the view
    Sort {
        #[clap(value_enum)]
        mode: SortMode,
    },

    /// Restrict the view to a creation-date window
    Filter {
        #[clap(value_enum)]
        date: DateFilter,
    },

    /// Restrict the view to all notes or favorites only
    Tag {
        #[clap(value_enum)]
        tag: TagFilter,
    },

    /// Toggle a note's favorite flag
    Fav {
        /// ID of the note
        id: u64,
    },

    /// Toggle a note's lock flag; locked notes refuse edit and delete
    Lock {
        /// ID of the note
        id: u64,
    },

    /// Archive an active note, or bring an archived note back
    Archive {
        /// ID of the note
        id: u64,
    },

    /// Expand an archived note card; any other expanded card collapses
    Expand {
        /// ID of the archived note
        id: u64,
    },

    /// Toggle the action menu of a note, or of a folder with --folder
    Menu {
        /// ID of the note or folder
        id: u64,

        /// Toggle a folder menu instead of a note menu
        #[clap(short, long)]
        folder: bool,
    },

    /// Edit a note's title, body, or creation date
    Edit {
        /// ID of the note to edit
        id: u64,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body for the note
        #[clap(short, long)]
        body: Option<String>,

        /// New creation date (YYYY-MM-DD)
        #[clap(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a note
    Delete {
        /// ID of the note to delete
        id: u64,
    },

    /// Locate notes with fuzzy matching and highlight the best hits
    Find {
        /// Search query text
        query: String,
    },

    /// Folder operations
    Folder {
        #[clap(subcommand)]
        action: FolderCommand,
    },

    /// Export all notes as a pretty-printed JSON backup
    Export {
        /// Directory for the export file (defaults to downloads, then home)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Show collection totals
    Stats,

    /// Leave the session
    Quit,
}

/// Folder subcommands
#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// Create a new folder
    Create {
        /// Folder name; must be non-empty after trimming
        name: String,
    },

    /// Rename a folder
    Rename {
        /// ID of the folder
        id: u64,

        /// New folder name
        name: String,
    },

    /// Delete a folder; its notes are kept and moved out of the folder
    Delete {
        /// ID of the folder
        id: u64,

        /// Skip the confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// List folders with their live note counts
    List,

    /// Show the notes filed in a folder
    Show {
        /// ID of the folder
        id: u64,
    },

    /// Select the folder new notes are filed into; omit the id to clear
    Select {
        /// ID of the folder
        id: Option<u64>,
    },

    /// Move a note into a folder; omit the folder to unfile it
    Move {
        /// ID of the note to move
        note: u64,

        /// ID of the destination folder
        folder: Option<u64>,
    },
}
