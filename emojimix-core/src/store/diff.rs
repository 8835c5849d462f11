//! Turns raw row-change signals plus two ordered id lists into a
//! [`ChangeNotification`].
//!
//! Rows only in the old ordering are deleted, rows only in the new one are
//! inserted. Survivors that fall outside the longest common subsequence of
//! the two orderings moved; survivors inside it are reported as updated when
//! the engine flagged their content as changed.

use std::collections::{HashMap, HashSet};

use emojimix_types::{ChangeNotification, MixId, Move};

/// Per-row signal delivered by the engine's update hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowChange {
    Insert,
    Delete,
    Update,
}

/// Collapse a batch of raw signals into the final change per row.
pub(crate) fn coalesce(raw: &[(MixId, RowChange)]) -> HashMap<MixId, RowChange> {
    let mut rows: HashMap<MixId, RowChange> = HashMap::new();
    for &(id, change) in raw {
        match (rows.get(&id).copied(), change) {
            (Some(RowChange::Insert), RowChange::Delete) => {
                rows.remove(&id);
            }
            (Some(RowChange::Insert), RowChange::Update) => {}
            (Some(RowChange::Delete), RowChange::Insert) => {
                rows.insert(id, RowChange::Update);
            }
            _ => {
                rows.insert(id, change);
            }
        }
    }
    rows
}

/// Classify every changed row between `previous` and `current`.
pub(crate) fn diff(
    previous: &[MixId],
    current: &[MixId],
    raw: &HashMap<MixId, RowChange>,
) -> ChangeNotification {
    let old_pos: HashMap<MixId, usize> = previous.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let new_pos: HashMap<MixId, usize> = current.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    let mut note = ChangeNotification::default();

    for (i, id) in previous.iter().enumerate() {
        if !new_pos.contains_key(id) {
            note.deleted.insert(i);
        }
    }
    for (i, id) in current.iter().enumerate() {
        if !old_pos.contains_key(id) {
            note.inserted.insert(i);
        }
    }

    let old_survivors: Vec<MixId> = previous.iter().copied().filter(|id| new_pos.contains_key(id)).collect();
    let new_survivors: Vec<MixId> = current.iter().copied().filter(|id| old_pos.contains_key(id)).collect();
    let stable = common_subsequence(&old_survivors, &new_survivors);

    for id in &old_survivors {
        let from = old_pos[id];
        let to = new_pos[id];
        if !stable.contains(id) {
            note.moved.insert(Move { from, to });
        } else if raw.get(id) == Some(&RowChange::Update) {
            note.updated.insert(from);
        }
    }

    note
}

/// Members of one longest common subsequence of `a` and `b`.
///
/// The shared prefix and suffix always belong to some longest subsequence, so
/// only the differing middle goes through the quadratic table. A single
/// insert, delete or in-place update costs a linear scan.
fn common_subsequence(a: &[MixId], b: &[MixId]) -> HashSet<MixId> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mut kept: HashSet<MixId> = a[..prefix].iter().copied().collect();
    kept.extend(a[a.len() - suffix..].iter().copied());
    kept.extend(middle_subsequence(
        &a[prefix..a.len() - suffix],
        &b[prefix..b.len() - suffix],
    ));
    kept
}

/// Table-driven LCS. On ties the earlier element of `a` is dropped first, so
/// for a swap the element that moved forward in `b` is the one kept in place.
fn middle_subsequence(a: &[MixId], b: &[MixId]) -> Vec<MixId> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut kept = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            kept.push(a[i]);
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    kept
}
