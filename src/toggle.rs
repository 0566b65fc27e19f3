//! Membership sets for per-entity boolean flags.
//!
//! Every ephemeral flag (favorite, locked, menu visibility, archive-card
//! expansion) is a set of entity ids: membership means the flag is on. The
//! sets live outside the note and folder entities and are never exported.

use std::collections::HashSet;

/// Independent per-id toggle: any number of ids may be flagged at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleSet {
    members: HashSet<u64>,
}

impl ToggleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership for `id`; returns whether the flag is now on.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.members.remove(&id) {
            false
        } else {
            self.members.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.members.contains(&id)
    }

    pub fn remove(&mut self, id: u64) {
        self.members.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.members.iter().copied()
    }
}

/// Exclusive toggle: activating an id clears every other member first,
/// so at most one id is flagged at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusiveToggle {
    members: HashSet<u64>,
}

impl ExclusiveToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `id`: re-toggling the active id clears the set, any other id
    /// becomes the sole member. Returns whether the flag is now on.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.members.contains(&id) {
            self.members.clear();
            false
        } else {
            self.members.clear();
            self.members.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.members.contains(&id)
    }

    /// The currently flagged id, if any.
    pub fn active(&self) -> Option<u64> {
        self.members.iter().copied().next()
    }

    pub fn remove(&mut self, id: u64) {
        self.members.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::{ExclusiveToggle, ToggleSet};

    #[test]
    fn independent_toggle_is_self_inverse() {
        let mut flags = ToggleSet::new();
        let before = flags.clone();
        assert!(flags.toggle(7));
        assert!(!flags.toggle(7));
        assert_eq!(flags, before);
    }

    #[test]
    fn independent_toggle_allows_many_members() {
        let mut flags = ToggleSet::new();
        flags.toggle(1);
        flags.toggle(2);
        flags.toggle(3);
        assert_eq!(flags.len(), 3);
        assert!(flags.contains(1) && flags.contains(2) && flags.contains(3));
    }

    #[test]
    fn exclusive_toggle_keeps_at_most_one_member() {
        let mut expanded = ExclusiveToggle::new();
        assert!(expanded.toggle(1));
        assert!(expanded.toggle(2));
        assert!(!expanded.contains(1));
        assert!(expanded.contains(2));
        assert_eq!(expanded.active(), Some(2));
    }

    #[test]
    fn exclusive_toggle_retoggle_clears() {
        let mut expanded = ExclusiveToggle::new();
        expanded.toggle(5);
        assert!(!expanded.toggle(5));
        assert_eq!(expanded.active(), None);
    }
}
