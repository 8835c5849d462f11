//! Batched change report describing how a sorted projection moved between
//! two observations.

use std::collections::BTreeSet;

/// A row that kept its identity but changed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    /// Index in the previous projection.
    pub from: usize,
    /// Index in the current projection.
    pub to: usize,
}

/// One aggregated notification per write batch.
///
/// `deleted`, `updated` and `Move::from` index the previous projection;
/// `inserted` and `Move::to` index the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeNotification {
    pub inserted: BTreeSet<usize>,
    pub deleted: BTreeSet<usize>,
    pub updated: BTreeSet<usize>,
    pub moved: BTreeSet<Move>,
}

impl ChangeNotification {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.deleted.is_empty()
            && self.updated.is_empty()
            && self.moved.is_empty()
    }

    /// Total number of classified row changes.
    pub fn len(&self) -> usize {
        self.inserted.len() + self.deleted.len() + self.updated.len() + self.moved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let note = ChangeNotification::default();
        assert!(note.is_empty());
        assert_eq!(note.len(), 0);
    }

    #[test]
    fn len_counts_every_class() {
        let mut note = ChangeNotification::default();
        note.inserted.insert(0);
        note.deleted.insert(2);
        note.moved.insert(Move { from: 1, to: 0 });
        assert!(!note.is_empty());
        assert_eq!(note.len(), 3);
    }
}
