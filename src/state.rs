//! Application state and its reducer.
//!
//! All state lives in a single [`Notebook`] value: the note and folder
//! collections, the filter controls, the per-id flag sets, and the id
//! counters. Every user action is an [`Action`] variant; [`Notebook::apply`]
//! consumes the current state and returns the successor state. Transitions
//! are total and never panic: invalid input (blank titles, unknown ids)
//! leaves the state unchanged.
//!
//! Actions carry their own clock and color inputs, so `apply` is a pure
//! function of (state, action) and is deterministic under test.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::debug;

use crate::{
    DateFilter, ExclusiveToggle, FilterState, Folder, FolderColor, Note, SortMode, TagFilter,
    ToggleSet,
};

/// One variant per user action
#[derive(Debug, Clone)]
pub enum Action {
    /// Create a note filed into the currently selected folder
    AddNote {
        title: String,
        body: String,
        at: DateTime<Utc>,
    },
    /// Rewrite a note's title and body; a supplied date also rewrites the
    /// creation timestamp to midnight of that day
    EditNote {
        id: u64,
        title: String,
        body: String,
        date: Option<NaiveDate>,
    },
    DeleteNote {
        id: u64,
    },
    ToggleArchive {
        id: u64,
    },
    ToggleFavorite {
        id: u64,
    },
    ToggleLock {
        id: u64,
    },
    ToggleNoteMenu {
        id: u64,
    },
    ToggleFolderMenu {
        id: u64,
    },
    /// Expand or collapse an archived note card; at most one stays expanded
    ToggleExpanded {
        id: u64,
    },
    CreateFolder {
        name: String,
        color: FolderColor,
        at: DateTime<Utc>,
    },
    RenameFolder {
        id: u64,
        name: String,
    },
    /// Remove the folder and move its notes out of it
    DeleteFolder {
        id: u64,
    },
    /// Choose the folder new notes are filed into; `None` clears
    SelectFolder {
        id: Option<u64>,
    },
    /// Re-home a note; `None` removes it from its folder
    MoveNoteToFolder {
        note_id: u64,
        folder_id: Option<u64>,
    },
    SetSearch {
        keyword: String,
    },
    SetSort {
        mode: SortMode,
    },
    SetDateFilter {
        filter: DateFilter,
    },
    SetTagFilter {
        tag: TagFilter,
    },
}

/// The whole application state
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    pub filter: FilterState,
    /// Notes flagged as favorites
    pub favorites: ToggleSet,
    /// Notes that refuse edit and delete until unlocked
    pub locked: ToggleSet,
    /// Notes with their action menu open
    pub note_menus: ToggleSet,
    /// Folders with their action menu open
    pub folder_menus: ToggleSet,
    /// The one archived card currently expanded, if any
    pub expanded_archive: ExclusiveToggle,
    /// Folder new notes are filed into
    pub selected_folder: Option<u64>,
    next_note_id: u64,
    next_folder_id: u64,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Notebook {
    pub fn new() -> Self {
        Notebook {
            notes: Vec::new(),
            folders: Vec::new(),
            filter: FilterState::default(),
            favorites: ToggleSet::new(),
            locked: ToggleSet::new(),
            note_menus: ToggleSet::new(),
            folder_menus: ToggleSet::new(),
            expanded_archive: ExclusiveToggle::new(),
            selected_folder: None,
            next_note_id: 1,
            next_folder_id: 1,
        }
    }

    pub fn note(&self, id: u64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn folder(&self, id: u64) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == id)
    }

    /// Applies one user action, returning the successor state.
    pub fn apply(self, action: Action) -> Notebook {
        match action {
            Action::AddNote { title, body, at } => self.add_note(title, body, at),
            Action::EditNote {
                id,
                title,
                body,
                date,
            } => self.edit_note(id, title, body, date),
            Action::DeleteNote { id } => self.delete_note(id),
            Action::ToggleArchive { id } => self.toggle_archive(id),
            Action::ToggleFavorite { id } => self.toggle_flag(id, Flag::Favorite),
            Action::ToggleLock { id } => self.toggle_flag(id, Flag::Lock),
            Action::ToggleNoteMenu { id } => self.toggle_flag(id, Flag::NoteMenu),
            Action::ToggleFolderMenu { id } => self.toggle_flag(id, Flag::FolderMenu),
            Action::ToggleExpanded { id } => self.toggle_expanded(id),
            Action::CreateFolder { name, color, at } => self.create_folder(name, color, at),
            Action::RenameFolder { id, name } => self.rename_folder(id, name),
            Action::DeleteFolder { id } => self.delete_folder(id),
            Action::SelectFolder { id } => self.select_folder(id),
            Action::MoveNoteToFolder { note_id, folder_id } => {
                self.move_note_to_folder(note_id, folder_id)
            }
            Action::SetSearch { keyword } => self.set_filter(|f| f.search_keyword = keyword),
            Action::SetSort { mode } => self.set_filter(|f| f.sort = mode),
            Action::SetDateFilter { filter } => self.set_filter(|f| f.date = filter),
            Action::SetTagFilter { tag } => self.set_filter(|f| f.tag = tag),
        }
    }

    fn add_note(mut self, title: String, body: String, at: DateTime<Utc>) -> Self {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() || body.is_empty() {
            debug!("Ignoring note creation with blank title or body");
            return self;
        }
        let id = self.next_note_id;
        self.next_note_id += 1;
        let note = Note::new(id, title.to_string(), body.to_string(), at, self.selected_folder);
        if let Some(folder_id) = self.selected_folder {
            if let Some(folder) = self.folders.iter_mut().find(|f| f.id == folder_id) {
                folder.note_count += 1;
            }
        }
        debug!("Created note {} ({:?})", id, note.folder_id);
        self.notes.push(note);
        self
    }

    fn edit_note(
        mut self,
        id: u64,
        title: String,
        body: String,
        date: Option<NaiveDate>,
    ) -> Self {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() || body.is_empty() {
            debug!("Ignoring edit of note {} with blank title or body", id);
            return self;
        }
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.title = title.to_string();
            note.body = body.to_string();
            if let Some(date) = date {
                note.created_at = date.and_time(NaiveTime::MIN).and_utc();
            }
        }
        self
    }

    fn delete_note(mut self, id: u64) -> Self {
        self.notes.retain(|note| note.id != id);
        self.favorites.remove(id);
        self.locked.remove(id);
        self.note_menus.remove(id);
        self.expanded_archive.remove(id);
        self
    }

    fn toggle_archive(mut self, id: u64) -> Self {
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.archived = !note.archived;
        }
        self
    }

    fn toggle_expanded(mut self, id: u64) -> Self {
        self.expanded_archive.toggle(id);
        self
    }

    fn create_folder(mut self, name: String, color: FolderColor, at: DateTime<Utc>) -> Self {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring folder creation with blank name");
            return self;
        }
        let id = self.next_folder_id;
        self.next_folder_id += 1;
        self.folders.push(Folder::new(id, name.to_string(), color, at));
        self
    }

    fn rename_folder(mut self, id: u64, name: String) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return self;
        }
        if let Some(folder) = self.folders.iter_mut().find(|f| f.id == id) {
            folder.name = name.to_string();
        }
        self
    }

    fn delete_folder(mut self, id: u64) -> Self {
        if !self.folders.iter().any(|f| f.id == id) {
            return self;
        }
        // Cascade performed here explicitly; the data model itself does not
        // enforce referential integrity
        for note in self.notes.iter_mut() {
            if note.folder_id == Some(id) {
                note.folder_id = None;
            }
        }
        self.folders.retain(|folder| folder.id != id);
        self.folder_menus.remove(id);
        if self.selected_folder == Some(id) {
            self.selected_folder = None;
        }
        self
    }

    fn select_folder(mut self, id: Option<u64>) -> Self {
        match id {
            Some(folder_id) if self.folder(folder_id).is_none() => self,
            _ => {
                self.selected_folder = id;
                self
            }
        }
    }

    fn move_note_to_folder(mut self, note_id: u64, folder_id: Option<u64>) -> Self {
        if let Some(target) = folder_id {
            if self.folder(target).is_none() {
                return self;
            }
        }
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) {
            note.folder_id = folder_id;
        }
        self
    }

    fn toggle_flag(mut self, id: u64, flag: Flag) -> Self {
        match flag {
            Flag::Favorite => self.favorites.toggle(id),
            Flag::Lock => self.locked.toggle(id),
            Flag::NoteMenu => self.note_menus.toggle(id),
            Flag::FolderMenu => self.folder_menus.toggle(id),
        };
        self
    }

    fn set_filter(mut self, update: impl FnOnce(&mut FilterState)) -> Self {
        update(&mut self.filter);
        self
    }
}

enum Flag {
    Favorite,
    Lock,
    NoteMenu,
    FolderMenu,
}
