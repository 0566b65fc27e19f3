//! Starter notebook behind the `--demo` startup flag.

use chrono::{DateTime, TimeZone, Utc};

use crate::{Action, FolderColor, Notebook};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Builds the sample notebook: three folders and a handful of notes,
/// created through the same actions a user session would issue.
pub fn seed_notebook() -> Notebook {
    let mut nb = Notebook::new();

    for (name, color) in [
        ("Film Log", FolderColor::Blue),
        ("Course Notes", FolderColor::Pink),
        ("Reading List", FolderColor::Yellow),
    ] {
        nb = nb.apply(Action::CreateFolder {
            name: name.to_string(),
            color,
            at: day(2024, 1, 2),
        });
    }

    let notes: &[(Option<u64>, &str, &str, (i32, u32, u32))] = &[
        (
            Some(1),
            "Blade Runner rewatch",
            "The final cut holds up; the pacing still sags in the middle act but the sound design carries it.",
            (2024, 1, 15),
        ),
        (
            Some(1),
            "Stalker first impressions",
            "Long takes everywhere. Worth a second viewing with better subtitles.",
            (2024, 1, 20),
        ),
        (
            Some(2),
            "Ownership and borrowing",
            "A value has one owner; borrows are either shared or exclusive, never both at once.",
            (2024, 1, 10),
        ),
        (
            Some(2),
            "Error handling patterns",
            "Typed errors at library boundaries, context at the call site. Avoid stringly errors.",
            (2024, 2, 5),
        ),
        (
            Some(3),
            "The Pragmatic Programmer",
            "The tracer bullet chapter maps well onto spike branches.",
            (2024, 1, 5),
        ),
        (
            None,
            "Groceries",
            "Oat milk, coffee beans, rye bread.",
            (2024, 2, 18),
        ),
    ];

    for (folder, title, body, (y, m, d)) in notes {
        nb = nb.apply(Action::SelectFolder { id: *folder });
        nb = nb.apply(Action::AddNote {
            title: (*title).to_string(),
            body: (*body).to_string(),
            at: day(*y, *m, *d),
        });
    }

    nb.apply(Action::SelectFolder { id: None })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::seed_notebook;
    use crate::note_count_in_folder;

    #[test]
    fn seed_builds_folders_and_notes_with_unique_ids() {
        let nb = seed_notebook();
        assert_eq!(nb.folders.len(), 3);
        assert_eq!(nb.notes.len(), 6);
        let ids: HashSet<u64> = nb.notes.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), nb.notes.len());
        assert_eq!(nb.selected_folder, None);
    }

    #[test]
    fn seed_files_notes_into_their_folders() {
        let nb = seed_notebook();
        assert_eq!(note_count_in_folder(&nb.notes, 1), 2);
        assert_eq!(note_count_in_folder(&nb.notes, 2), 2);
        assert_eq!(note_count_in_folder(&nb.notes, 3), 1);
        // notes created inside a folder also bump the display counter
        assert_eq!(nb.folder(1).map(|f| f.note_count), Some(2));
    }
}
