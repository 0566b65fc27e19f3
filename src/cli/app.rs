//! Interactive session for the noto application
//!
//! The session is the user-interface event loop: it reads one command per
//! line, applies the matching action to the notebook, and re-renders from
//! the freshly derived view. All state transitions happen synchronously
//! between reading one line and printing the next prompt.

use std::io::{stdin, stdout, Write};
use std::mem;

use chrono::{Local, Utc};
use clap::Parser;
use console::style;
use log::{debug, info};

use crate::{
    default_export_dir, derive_view, export_notes, fuzzy_locate, note_count_in_folder,
    notes_in_folder, Action, Command, DateFilter, FolderColor, FolderCommand, Note, Notebook,
    NotoError, Result, TagFilter, MAX_TITLE_LEN,
};

/// One session line: the shared command set without a binary name
#[derive(Parser)]
#[clap(name = "noto", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[clap(subcommand)]
    command: Command,
}

enum Flow {
    Continue,
    Quit,
}

/// Session handler - owns the notebook and processes commands against it
pub struct App {
    notebook: Notebook,
}

impl App {
    /// Create a new session over the given notebook
    pub fn new(notebook: Notebook) -> Self {
        Self { notebook }
    }

    /// Run the session until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Session opened with {} notes and {} folders",
            self.notebook.notes.len(),
            self.notebook.folders.len()
        );
        println!(
            "Noto - type {} for commands, {} to leave.",
            style("help").bold(),
            style("quit").bold()
        );

        loop {
            print!("noto> ");
            stdout().flush().map_err(NotoError::Io)?;

            let mut line = String::new();
            let bytes = stdin().read_line(&mut line).map_err(NotoError::Io)?;
            if bytes == 0 {
                // end of input
                println!();
                break;
            }

            let words = match shell_words::split(line.trim()) {
                Ok(words) => words,
                Err(e) => {
                    println!("{}", style(format!("error: {e}")).red());
                    continue;
                }
            };
            if words.is_empty() {
                continue;
            }

            match SessionLine::try_parse_from(&words) {
                Ok(parsed) => match self.dispatch(parsed.command) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => println!("{}", style(format!("error: {e}")).red()),
                },
                Err(e) => {
                    // clap renders its own help and usage output
                    let _ = e.print();
                }
            }
        }

        info!("Session closed");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        debug!("Dispatching command: {:?}", command);
        match command {
            Command::Add { title, body } => self.handle_add(title, body)?,
            Command::List { json } => self.render_view(json)?,
            Command::Search { keyword } => {
                let keyword = keyword.unwrap_or_default();
                let cleared = keyword.is_empty();
                self.apply(Action::SetSearch { keyword });
                if cleared {
                    println!("Search cleared");
                }
                self.render_view(false)?;
            }
            Command::Sort { mode } => {
                self.apply(Action::SetSort { mode });
                self.render_view(false)?;
            }
            Command::Filter { date } => {
                self.apply(Action::SetDateFilter { filter: date });
                self.render_view(false)?;
            }
            Command::Tag { tag } => {
                self.apply(Action::SetTagFilter { tag });
                self.render_view(false)?;
            }
            Command::Fav { id } => {
                self.require_note(id)?;
                self.apply(Action::ToggleFavorite { id });
                if self.notebook.favorites.contains(id) {
                    println!("Note {} added to favorites", id);
                } else {
                    println!("Note {} removed from favorites", id);
                }
            }
            Command::Lock { id } => {
                self.require_note(id)?;
                self.apply(Action::ToggleLock { id });
                if self.notebook.locked.contains(id) {
                    println!("Note {} locked", id);
                } else {
                    println!("Note {} unlocked", id);
                }
            }
            Command::Archive { id } => {
                self.require_note(id)?;
                self.apply(Action::ToggleArchive { id });
                let archived = self.notebook.note(id).map(|n| n.archived).unwrap_or(false);
                println!(
                    "Note {} {}",
                    id,
                    if archived { "archived" } else { "activated" }
                );
            }
            Command::Expand { id } => self.handle_expand(id)?,
            Command::Menu { id, folder } => self.handle_menu(id, folder)?,
            Command::Edit {
                id,
                title,
                body,
                date,
            } => self.handle_edit(id, title, body, date)?,
            Command::Delete { id } => self.handle_delete(id)?,
            Command::Find { query } => self.handle_find(&query),
            Command::Folder { action } => self.handle_folder(action)?,
            Command::Export { output } => {
                let dir = output.unwrap_or_else(default_export_dir);
                let path = export_notes(&self.notebook.notes, &dir)?;
                println!(
                    "Exported {} note{} to {}",
                    self.notebook.notes.len(),
                    plural(self.notebook.notes.len()),
                    path.display()
                );
            }
            Command::Stats => self.handle_stats(),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Applies one action and installs the successor state
    fn apply(&mut self, action: Action) {
        let notebook = mem::take(&mut self.notebook);
        self.notebook = notebook.apply(action);
    }

    fn require_note(&self, id: u64) -> Result<()> {
        if self.notebook.note(id).is_none() {
            return Err(NotoError::NoteNotFound { id });
        }
        Ok(())
    }

    fn require_folder(&self, id: u64) -> Result<()> {
        if self.notebook.folder(id).is_none() {
            return Err(NotoError::FolderNotFound { id });
        }
        Ok(())
    }

    fn handle_add(&mut self, title: String, body: String) -> Result<()> {
        let title: String = title.trim().chars().take(MAX_TITLE_LEN).collect();
        let before = self.notebook.notes.len();
        self.apply(Action::AddNote {
            title,
            body,
            at: Utc::now(),
        });
        if self.notebook.notes.len() > before {
            if let Some(note) = self.notebook.notes.last() {
                match note.folder_id.and_then(|id| self.notebook.folder(id)) {
                    Some(folder) => println!(
                        "Note created with ID: {} (filed in '{}')",
                        note.id, folder.name
                    ),
                    None => println!("Note created with ID: {}", note.id),
                }
            }
        } else {
            println!("Nothing created: a note needs a non-empty title and body");
        }
        Ok(())
    }

    fn handle_expand(&mut self, id: u64) -> Result<()> {
        let note = self
            .notebook
            .note(id)
            .ok_or(NotoError::NoteNotFound { id })?;
        if !note.archived {
            println!("Note {} is not archived; only archived cards expand", id);
            return Ok(());
        }
        self.apply(Action::ToggleExpanded { id });
        if self.notebook.expanded_archive.contains(id) {
            println!("Note {} expanded; any other card is collapsed", id);
        } else {
            println!("Note {} collapsed", id);
        }
        Ok(())
    }

    fn handle_menu(&mut self, id: u64, folder: bool) -> Result<()> {
        if folder {
            self.require_folder(id)?;
            self.apply(Action::ToggleFolderMenu { id });
            let open = self.notebook.folder_menus.contains(id);
            println!("Folder {} menu {}", id, if open { "opened" } else { "closed" });
        } else {
            self.require_note(id)?;
            self.apply(Action::ToggleNoteMenu { id });
            let open = self.notebook.note_menus.contains(id);
            println!("Note {} menu {}", id, if open { "opened" } else { "closed" });
        }
        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: u64,
        title: Option<String>,
        body: Option<String>,
        date: Option<chrono::NaiveDate>,
    ) -> Result<()> {
        let (current_title, current_body) = match self.notebook.note(id) {
            Some(note) => (note.title.clone(), note.body.clone()),
            None => return Err(NotoError::NoteNotFound { id }),
        };
        if self.notebook.locked.contains(id) {
            return Err(NotoError::NoteLocked { id });
        }

        let title = title.unwrap_or(current_title);
        let title: String = title.trim().chars().take(MAX_TITLE_LEN).collect();
        let body = body.unwrap_or(current_body);

        if title.trim().is_empty() || body.trim().is_empty() {
            println!("Nothing changed: a note needs a non-empty title and body");
            return Ok(());
        }

        self.apply(Action::EditNote {
            id,
            title,
            body,
            date,
        });
        println!("Note {} updated", id);
        Ok(())
    }

    fn handle_delete(&mut self, id: u64) -> Result<()> {
        let title = match self.notebook.note(id) {
            Some(note) => note.title.clone(),
            None => return Err(NotoError::NoteNotFound { id }),
        };
        if self.notebook.locked.contains(id) {
            return Err(NotoError::NoteLocked { id });
        }
        self.apply(Action::DeleteNote { id });
        println!("Note '{}' ({}) has been deleted", title, id);
        Ok(())
    }

    fn handle_find(&self, query: &str) {
        let hits = fuzzy_locate(&self.notebook.notes, query);
        if hits.is_empty() {
            println!("No notes found matching query: \"{}\"", query);
            return;
        }
        for (i, note) in hits.iter().take(5).enumerate() {
            if i == 0 {
                // the jump target
                println!(
                    "-> ID: {} | {}",
                    note.id,
                    style(&note.title).bold().underlined()
                );
            } else {
                println!("   ID: {} | {}", note.id, style(&note.title).bold());
            }
        }
        println!("\nFound {} matching note{}", hits.len(), plural(hits.len()));
    }

    fn handle_folder(&mut self, action: FolderCommand) -> Result<()> {
        match action {
            FolderCommand::Create { name } => {
                let before = self.notebook.folders.len();
                self.apply(Action::CreateFolder {
                    name,
                    color: FolderColor::random(),
                    at: Utc::now(),
                });
                if self.notebook.folders.len() > before {
                    if let Some(folder) = self.notebook.folders.last() {
                        println!(
                            "Folder '{}' created with ID: {} ({})",
                            folder.name, folder.id, folder.color
                        );
                    }
                } else {
                    println!("Nothing created: a folder needs a non-empty name");
                }
            }
            FolderCommand::Rename { id, name } => {
                self.require_folder(id)?;
                if name.trim().is_empty() {
                    println!("Nothing changed: a folder needs a non-empty name");
                    return Ok(());
                }
                self.apply(Action::RenameFolder { id, name });
                if let Some(folder) = self.notebook.folder(id) {
                    println!("Folder {} renamed to '{}'", id, folder.name);
                }
            }
            FolderCommand::Delete { id, force } => {
                let name = match self.notebook.folder(id) {
                    Some(folder) => folder.name.clone(),
                    None => return Err(NotoError::FolderNotFound { id }),
                };
                let members = note_count_in_folder(&self.notebook.notes, id);
                if !force {
                    println!(
                        "You are about to delete folder '{}' ({} note{}).",
                        name,
                        members,
                        plural(members)
                    );
                    println!("Its notes will be kept and moved out of the folder.");
                    if !confirm("Are you sure you want to delete this folder?")? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }
                self.apply(Action::DeleteFolder { id });
                println!(
                    "Folder '{}' deleted; {} note{} moved to no folder",
                    name,
                    members,
                    plural(members)
                );
            }
            FolderCommand::List => {
                if self.notebook.folders.is_empty() {
                    println!("No folders yet");
                    return Ok(());
                }
                for folder in &self.notebook.folders {
                    let live = note_count_in_folder(&self.notebook.notes, folder.id);
                    let selected = if self.notebook.selected_folder == Some(folder.id) {
                        " (selected)"
                    } else {
                        ""
                    };
                    println!(
                        "ID: {} | {} | {} | {} | {} note{}{}",
                        folder.id,
                        style(&folder.name).bold(),
                        folder.created_at.with_timezone(&Local).format("%Y-%m-%d"),
                        folder.color,
                        live,
                        plural(live),
                        selected
                    );
                }
            }
            FolderCommand::Show { id } => {
                self.require_folder(id)?;
                let members = notes_in_folder(&self.notebook.notes, id);
                if let Some(folder) = self.notebook.folder(id) {
                    println!(
                        "Notes in '{}' ({})",
                        style(&folder.name).bold(),
                        members.len()
                    );
                }
                if members.is_empty() {
                    println!("No notes in this folder");
                }
                for (i, note) in members.iter().enumerate() {
                    if i > 0 {
                        separator();
                    }
                    self.print_note(note);
                }
            }
            FolderCommand::Select { id } => match id {
                Some(folder_id) => {
                    self.require_folder(folder_id)?;
                    self.apply(Action::SelectFolder {
                        id: Some(folder_id),
                    });
                    if let Some(folder) = self.notebook.folder(folder_id) {
                        println!("New notes will be filed into '{}'", folder.name);
                    }
                }
                None => {
                    self.apply(Action::SelectFolder { id: None });
                    println!("Folder selection cleared");
                }
            },
            FolderCommand::Move { note, folder } => {
                self.require_note(note)?;
                if let Some(folder_id) = folder {
                    self.require_folder(folder_id)?;
                }
                self.apply(Action::MoveNoteToFolder {
                    note_id: note,
                    folder_id: folder,
                });
                match folder.and_then(|id| self.notebook.folder(id)) {
                    Some(target) => println!("Note {} moved to '{}'", note, target.name),
                    None => println!("Note {} removed from its folder", note),
                }
            }
        }
        Ok(())
    }

    fn handle_stats(&self) {
        let total = self.notebook.notes.len();
        let archived = self.notebook.notes.iter().filter(|n| n.archived).count();
        println!("Total notes:    {}", total);
        println!("Active notes:   {}", total - archived);
        println!("Archived notes: {}", archived);
        println!("Favorites:      {}", self.notebook.favorites.len());
        println!("Folders:        {}", self.notebook.folders.len());
    }

    /// Recomputes the derived view and renders both sections
    fn render_view(&self, json: bool) -> Result<()> {
        let view = derive_view(
            &self.notebook.notes,
            &self.notebook.filter,
            &self.notebook.favorites,
            Local::now(),
        );

        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        self.print_filter_line();

        println!("\n{} ({})", style("My Notes").bold(), view.active.len());
        if view.active.is_empty() {
            println!("No active notes yet");
        }
        for (i, note) in view.active.iter().enumerate() {
            if i > 0 {
                separator();
            }
            self.print_note(note);
        }

        println!(
            "\n{} ({})",
            style("Archived Notes").bold(),
            view.archived.len()
        );
        if view.archived.is_empty() {
            println!("No archived notes yet");
        }
        for note in &view.archived {
            if self.notebook.expanded_archive.contains(note.id) {
                self.print_note(note);
            } else {
                println!(
                    "ID: {} | {} {}",
                    note.id,
                    style(&note.title).bold(),
                    style("(collapsed)").dim()
                );
            }
        }
        Ok(())
    }

    fn print_filter_line(&self) {
        let filter = &self.notebook.filter;
        let mut parts = vec![format!("sort: {:?}", filter.sort).to_lowercase()];
        if !filter.search_keyword.is_empty() {
            parts.push(format!("search: \"{}\"", filter.search_keyword));
        }
        if filter.date != DateFilter::All {
            parts.push(format!("filter: {:?}", filter.date).to_lowercase());
        }
        if filter.tag != TagFilter::All {
            parts.push(format!("tag: {:?}", filter.tag).to_lowercase());
        }
        println!("{}", style(parts.join(" | ")).dim());
    }

    fn print_note(&self, note: &Note) {
        let created = note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        let mut markers = Vec::new();
        if self.notebook.favorites.contains(note.id) {
            markers.push("fav");
        }
        if self.notebook.locked.contains(note.id) {
            markers.push("locked");
        }
        let marker_text = if markers.is_empty() {
            String::new()
        } else {
            format!(" [{}]", markers.join(", "))
        };

        println!("ID: {} | Created: {}{}", note.id, created, marker_text);
        println!("Title: {}", style(&note.title).bold());
        if let Some(folder) = note.folder_id.and_then(|id| self.notebook.folder(id)) {
            println!("Folder: {}", style(&folder.name).cyan());
        }
        let preview = content_preview(&note.body, 100);
        if !preview.is_empty() {
            println!("{}", preview);
        }
    }
}

/// First non-empty line of the body, truncated to `max_len` characters
fn content_preview(body: &str, max_len: usize) -> String {
    let first_line = body
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_len).collect();
        format!("{}...", cut)
    }
}

fn separator() {
    let width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80);
    println!("{}", "-".repeat(width.min(50)));
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    stdout().flush().map_err(NotoError::Io)?;

    let mut input = String::new();
    stdin().read_line(&mut input).map_err(NotoError::Io)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::content_preview;

    #[test]
    fn preview_takes_first_non_empty_line() {
        assert_eq!(content_preview("\n\nsecond line\nthird", 100), "second line");
        assert_eq!(content_preview("", 100), "");
    }

    #[test]
    fn preview_truncates_on_character_boundaries() {
        let long = "x".repeat(120);
        let preview = content_preview(&long, 100);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 103);
    }
}
