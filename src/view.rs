//! Derived note-view computation.
//!
//! The view engine is pure: given the full note collection, the current
//! filter state, the favorites set, and an explicit "now", it produces the
//! ordered active and archived note lists. It owns no state and never
//! mutates its inputs; the surrounding session recomputes it eagerly after
//! every state change.

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use serde::Serialize;

use crate::{Note, ToggleSet};

/// Sort order for the derived view
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Descending by creation time
    #[default]
    Newest,
    /// Ascending by creation time
    Oldest,
    /// Ascending case-insensitive title order
    Title,
}

/// Creation-date window filter
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    All,
    /// Created at or after local midnight today
    Today,
    /// Created within the half-open 24-hour window ending at local midnight
    Yesterday,
    /// Created within the last seven days
    Week,
}

/// Coarse view selector: everything, or favorites only
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Favorites,
}

/// The filter controls owned by the session and fed to [`derive_view`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Case-folded substring match over title and body; empty retains all
    pub search_keyword: String,
    pub tag: TagFilter,
    pub date: DateFilter,
    pub sort: SortMode,
}

/// The filtered, sorted, partitioned note lists
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteView {
    pub active: Vec<Note>,
    pub archived: Vec<Note>,
}

/// Recomputes the derived view from the full note collection.
///
/// The pipeline runs keyword filter, tag filter, date filter, sort, then
/// partitions into active and archived lists, preserving the sort order
/// inside each partition. `now` is passed explicitly so the date windows
/// are deterministic under test.
pub fn derive_view(
    notes: &[Note],
    filter: &FilterState,
    favorites: &ToggleSet,
    now: DateTime<Local>,
) -> NoteView {
    let mut notes: Vec<Note> = notes.to_vec();

    if !filter.search_keyword.is_empty() {
        let keyword = filter.search_keyword.to_lowercase();
        notes.retain(|note| {
            note.title.to_lowercase().contains(&keyword)
                || note.body.to_lowercase().contains(&keyword)
        });
    }

    if filter.tag == TagFilter::Favorites {
        notes.retain(|note| favorites.contains(note.id));
    }

    if filter.date != DateFilter::All {
        let today = local_midnight(now);
        let yesterday = today - Duration::days(1);
        let week_ago = today - Duration::days(7);
        notes.retain(|note| {
            let created = note.created_at.with_timezone(&Local).naive_local();
            match filter.date {
                DateFilter::Today => created >= today,
                DateFilter::Yesterday => created >= yesterday && created < today,
                DateFilter::Week => created >= week_ago,
                DateFilter::All => true,
            }
        });
    }

    // Vec::sort_by is stable, so ties keep their prior relative order
    match filter.sort {
        SortMode::Newest => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Oldest => notes.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortMode::Title => {
            notes.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }

    let (archived, active) = notes.into_iter().partition(|note| note.archived);
    NoteView { active, archived }
}

fn local_midnight(now: DateTime<Local>) -> NaiveDateTime {
    now.date_naive().and_time(NaiveTime::MIN)
}

/// All notes filed in the given folder. A note without a folder never
/// matches a real folder id.
pub fn notes_in_folder(notes: &[Note], folder_id: u64) -> Vec<&Note> {
    notes
        .iter()
        .filter(|note| note.folder_id == Some(folder_id))
        .collect()
}

/// Live membership count for a folder; this is the authoritative value,
/// independent of the folder's stored display hint.
pub fn note_count_in_folder(notes: &[Note], folder_id: u64) -> usize {
    notes
        .iter()
        .filter(|note| note.folder_id == Some(folder_id))
        .count()
}

/// Scored lookup over title and body using fuzzy matching, best hits
/// first. Title matches are weighted more heavily. This backs the session's
/// jump-to-note command and is separate from the plain substring filter of
/// [`derive_view`].
pub fn fuzzy_locate(notes: &[Note], query: &str) -> Vec<Note> {
    use fuzzy_matcher::skim::SkimMatcherV2;
    use fuzzy_matcher::FuzzyMatcher;

    let matcher = SkimMatcherV2::default();

    struct ScoredNote {
        note: Note,
        score: i64,
    }

    let mut matched: Vec<ScoredNote> = Vec::new();
    for note in notes {
        let title_score = matcher.fuzzy_match(&note.title, query).unwrap_or(0);
        let body_score = matcher.fuzzy_match(&note.body, query).unwrap_or(0);
        let final_score = title_score * 2 + body_score;
        if final_score > 0 {
            matched.push(ScoredNote {
                note: note.clone(),
                score: final_score,
            });
        }
    }

    matched.sort_by(|a, b| b.score.cmp(&a.score));
    matched.into_iter().map(|scored| scored.note).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone, Utc};

    use super::{derive_view, note_count_in_folder, notes_in_folder, fuzzy_locate};
    use super::{DateFilter, FilterState, SortMode, TagFilter};
    use crate::{Note, ToggleSet};

    fn note(id: u64, title: &str, body: &str, archived: bool, created_at: &str) -> Note {
        let created_at = created_at
            .parse::<chrono::DateTime<Utc>>()
            .expect("test timestamp");
        Note {
            id,
            title: title.to_string(),
            body: body.to_string(),
            archived,
            created_at,
            folder_id: None,
        }
    }

    fn filter() -> FilterState {
        FilterState::default()
    }

    fn now() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn keyword_matching_title_substring_includes_note() {
        let notes = vec![
            note(1, "Grocery run", "milk and eggs", false, "2024-01-01T00:00:00Z"),
            note(2, "Standup", "daily sync", false, "2024-01-02T00:00:00Z"),
        ];
        let mut f = filter();
        f.search_keyword = "grocery".to_string();
        let view = derive_view(&notes, &f, &ToggleSet::new(), now());
        assert_eq!(view.active.len(), 1);
        assert_eq!(view.active[0].id, 1);
    }

    #[test]
    fn keyword_present_nowhere_excludes_everything() {
        let notes = vec![
            note(1, "Grocery run", "milk and eggs", false, "2024-01-01T00:00:00Z"),
            note(2, "Standup", "daily sync", true, "2024-01-02T00:00:00Z"),
        ];
        let mut f = filter();
        f.search_keyword = "zeppelin".to_string();
        let view = derive_view(&notes, &f, &ToggleSet::new(), now());
        assert!(view.active.is_empty());
        assert!(view.archived.is_empty());
    }

    #[test]
    fn keyword_matches_body_too() {
        let notes = vec![note(1, "Plain", "contains NEEDLE here", false, "2024-01-01T00:00:00Z")];
        let mut f = filter();
        f.search_keyword = "needle".to_string();
        let view = derive_view(&notes, &f, &ToggleSet::new(), now());
        assert_eq!(view.active.len(), 1);
    }

    #[test]
    fn partition_covers_every_filtered_note_exactly_once() {
        let notes = vec![
            note(1, "a", "x", false, "2024-01-01T00:00:00Z"),
            note(2, "b", "x", true, "2024-01-02T00:00:00Z"),
            note(3, "c", "x", false, "2024-01-03T00:00:00Z"),
            note(4, "d", "x", true, "2024-01-04T00:00:00Z"),
        ];
        let view = derive_view(&notes, &filter(), &ToggleSet::new(), now());
        assert_eq!(view.active.len() + view.archived.len(), notes.len());
        assert!(view.active.iter().all(|n| !n.archived));
        assert!(view.archived.iter().all(|n| n.archived));
    }

    #[test]
    fn newest_is_reverse_of_oldest_for_distinct_timestamps() {
        let notes = vec![
            note(1, "a", "x", false, "2024-01-03T00:00:00Z"),
            note(2, "b", "x", false, "2024-01-01T00:00:00Z"),
            note(3, "c", "x", false, "2024-01-02T00:00:00Z"),
        ];
        let mut newest = filter();
        newest.sort = SortMode::Newest;
        let mut oldest = filter();
        oldest.sort = SortMode::Oldest;
        let favorites = ToggleSet::new();
        let mut by_newest: Vec<u64> = derive_view(&notes, &newest, &favorites, now())
            .active
            .iter()
            .map(|n| n.id)
            .collect();
        let by_oldest: Vec<u64> = derive_view(&notes, &oldest, &favorites, now())
            .active
            .iter()
            .map(|n| n.id)
            .collect();
        by_newest.reverse();
        assert_eq!(by_newest, by_oldest);
    }

    #[test]
    fn title_sort_is_idempotent() {
        let notes = vec![
            note(1, "cedar", "x", false, "2024-01-03T00:00:00Z"),
            note(2, "Aspen", "x", false, "2024-01-01T00:00:00Z"),
            note(3, "birch", "x", false, "2024-01-02T00:00:00Z"),
        ];
        let mut f = filter();
        f.sort = SortMode::Title;
        let favorites = ToggleSet::new();
        let once = derive_view(&notes, &f, &favorites, now());
        let twice = derive_view(&once.active, &f, &favorites, now());
        let first: Vec<u64> = once.active.iter().map(|n| n.id).collect();
        let second: Vec<u64> = twice.active.iter().map(|n| n.id).collect();
        assert_eq!(first, vec![2, 3, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn favorites_tag_restricts_to_flagged_ids() {
        let notes = vec![
            note(1, "a", "x", false, "2024-01-01T00:00:00Z"),
            note(2, "b", "x", false, "2024-01-02T00:00:00Z"),
        ];
        let mut favorites = ToggleSet::new();
        favorites.toggle(2);
        let mut f = filter();
        f.tag = TagFilter::Favorites;
        let view = derive_view(&notes, &f, &favorites, now());
        assert_eq!(view.active.len(), 1);
        assert_eq!(view.active[0].id, 2);
    }

    #[test]
    fn yesterday_window_is_half_open() {
        // now is 2024-03-15 10:00 local; yesterday = [03-14 00:00, 03-15 00:00)
        let local = |y, m, d, h, min| {
            Local
                .with_ymd_and_hms(y, m, d, h, min, 0)
                .unwrap()
                .with_timezone(&Utc)
        };
        let notes = vec![
            Note::new(1, "today midnight".into(), "x".into(), local(2024, 3, 15, 0, 0), None),
            Note::new(2, "late yesterday".into(), "x".into(), local(2024, 3, 14, 23, 59), None),
            Note::new(3, "yesterday midnight".into(), "x".into(), local(2024, 3, 14, 0, 0), None),
            Note::new(4, "two days ago".into(), "x".into(), local(2024, 3, 13, 23, 59), None),
        ];
        let mut f = filter();
        f.date = DateFilter::Yesterday;
        f.sort = SortMode::Oldest;
        let view = derive_view(&notes, &f, &ToggleSet::new(), now());
        let ids: Vec<u64> = view.active.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn today_and_week_windows_compare_absolute_instants() {
        let local = |y, m, d, h| {
            Local
                .with_ymd_and_hms(y, m, d, h, 0, 0)
                .unwrap()
                .with_timezone(&Utc)
        };
        let notes = vec![
            Note::new(1, "this morning".into(), "x".into(), local(2024, 3, 15, 1), None),
            Note::new(2, "six days ago".into(), "x".into(), local(2024, 3, 9, 12), None),
            Note::new(3, "eight days ago".into(), "x".into(), local(2024, 3, 7, 12), None),
        ];
        let mut today = filter();
        today.date = DateFilter::Today;
        let view = derive_view(&notes, &today, &ToggleSet::new(), now());
        assert_eq!(view.active.len(), 1);
        assert_eq!(view.active[0].id, 1);

        let mut week = filter();
        week.date = DateFilter::Week;
        let view = derive_view(&notes, &week, &ToggleSet::new(), now());
        let ids: Vec<u64> = view.active.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn archived_and_search_scenario() {
        let notes = vec![
            note(1, "Alpha", "x", false, "2024-01-01T00:00:00Z"),
            note(2, "Beta", "y", true, "2024-02-01T00:00:00Z"),
        ];
        let favorites = ToggleSet::new();

        let view = derive_view(&notes, &filter(), &favorites, now());
        assert_eq!(view.active.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(view.archived.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2]);

        let mut f = filter();
        f.search_keyword = "Alpha".to_string();
        let view = derive_view(&notes, &f, &favorites, now());
        assert_eq!(view.active.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1]);
        assert!(view.archived.is_empty());
    }

    #[test]
    fn derive_does_not_mutate_its_input() {
        let notes = vec![
            note(2, "b", "x", false, "2024-01-02T00:00:00Z"),
            note(1, "a", "x", false, "2024-01-01T00:00:00Z"),
        ];
        let snapshot = notes.clone();
        let _ = derive_view(&notes, &filter(), &ToggleSet::new(), now());
        assert_eq!(notes, snapshot);
    }

    #[test]
    fn folder_queries_ignore_unfiled_notes() {
        let mut a = note(1, "a", "x", false, "2024-01-01T00:00:00Z");
        a.folder_id = Some(10);
        let b = note(2, "b", "x", false, "2024-01-02T00:00:00Z");
        let mut c = note(3, "c", "x", false, "2024-01-03T00:00:00Z");
        c.folder_id = Some(11);
        let notes = vec![a, b, c];
        assert_eq!(notes_in_folder(&notes, 10).len(), 1);
        assert_eq!(note_count_in_folder(&notes, 10), 1);
        assert_eq!(note_count_in_folder(&notes, 99), 0);
    }

    #[test]
    fn fuzzy_locate_prefers_title_hits() {
        let notes = vec![
            note(1, "meeting notes", "nothing relevant", false, "2024-01-01T00:00:00Z"),
            note(2, "shopping", "meeting agenda buried in the body", false, "2024-01-02T00:00:00Z"),
        ];
        let hits = fuzzy_locate(&notes, "meeting");
        assert_eq!(hits.first().map(|n| n.id), Some(1));
        let hits = fuzzy_locate(&notes, "xyzzy");
        assert!(hits.is_empty());
    }
}
