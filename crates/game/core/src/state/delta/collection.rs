use std::collections::HashMap;
use std::hash::Hash;

/// A value together with the position it occupied in its sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Indexed<T> {
    pub value: T,
    pub index: usize,
}

impl<T> Indexed<T> {
    pub fn new(value: T, index: usize) -> Self {
        Self { value, index }
    }
}

/// Generic keyed-sequence delta capturing additions, removals, and updates.
///
/// `moved` lists keys whose value is unchanged but whose position differs;
/// these are bookkeeping only and never surface as change entries.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionDelta<Id, T> {
    pub added: Vec<(Id, Indexed<T>)>,
    pub updated: Vec<(Id, Indexed<T>, Indexed<T>)>,
    pub moved: Vec<(Id, usize)>,
    pub removed: Vec<(Id, Indexed<T>)>,
}

impl<Id, T> CollectionDelta<Id, T> {
    pub(super) fn new() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            moved: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Returns true if nothing was added, updated or removed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

impl<Id, T> Default for CollectionDelta<Id, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Diffs a keyed map of previously seen entries against a live sequence.
///
/// Only entries accepted by `keep_fn` take part. When several live entries
/// share a key, the one with the highest index wins, matching how the
/// snapshot map is built.
///
/// Output order is deterministic: added and updated entries follow their new
/// index, removed entries follow their old index.
pub(crate) fn diff_indexed<Id, T, FId, FKeep>(
    before: &HashMap<Id, Indexed<T>>,
    after: &[T],
    id_fn: FId,
    keep_fn: FKeep,
) -> CollectionDelta<Id, T>
where
    Id: Eq + Hash + Clone,
    T: Clone + PartialEq,
    FId: Fn(&T) -> Id,
    FKeep: Fn(&T) -> bool,
{
    let mut latest: HashMap<Id, usize> = HashMap::new();
    for (index, entry) in after.iter().enumerate() {
        if keep_fn(entry) {
            latest.insert(id_fn(entry), index);
        }
    }

    let mut delta = CollectionDelta::new();

    let mut removed: Vec<(Id, Indexed<T>)> = before
        .iter()
        .filter(|(id, _)| !latest.contains_key(*id))
        .map(|(id, prev)| (id.clone(), prev.clone()))
        .collect();
    removed.sort_by_key(|(_, prev)| prev.index);

    let mut current: Vec<(Id, usize)> = latest.into_iter().collect();
    current.sort_by_key(|(_, index)| *index);

    for (id, index) in current {
        let entry = &after[index];
        match before.get(&id) {
            None => delta.added.push((id, Indexed::new(entry.clone(), index))),
            Some(prev) if prev.value != *entry => {
                delta
                    .updated
                    .push((id, prev.clone(), Indexed::new(entry.clone(), index)));
            }
            Some(prev) if prev.index != index => delta.moved.push((id, index)),
            Some(_) => {}
        }
    }

    delta.removed = removed;
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        value: i32,
        tracked: bool,
    }

    fn row(id: u32, value: i32) -> Row {
        Row {
            id,
            value,
            tracked: true,
        }
    }

    fn seen(rows: &[Row]) -> HashMap<u32, Indexed<Row>> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| (row.id, Indexed::new(row.clone(), index)))
            .collect()
    }

    #[test]
    fn classifies_added_updated_removed() {
        let before = seen(&[row(1, 10), row(2, 20), row(3, 30)]);
        let after = vec![row(2, 21), row(3, 30), row(4, 40)];

        let delta = diff_indexed(&before, &after, |r| r.id, |r| r.tracked);

        assert_eq!(delta.added.len(), 1);
        assert_eq!(delta.added[0].0, 4);
        assert_eq!(delta.added[0].1.index, 2);

        assert_eq!(delta.updated.len(), 1);
        let (id, old, new) = &delta.updated[0];
        assert_eq!((*id, old.value.value, new.value.value), (2, 20, 21));

        assert_eq!(delta.removed.len(), 1);
        assert_eq!(delta.removed[0].0, 1);

        // row 3 shifted from index 2 to 1 without changing
        assert_eq!(delta.moved, vec![(3, 1)]);
    }

    #[test]
    fn untracked_entries_are_ignored() {
        let before = HashMap::new();
        let after = vec![Row {
            id: 7,
            value: 0,
            tracked: false,
        }];

        let delta = diff_indexed(&before, &after, |r| r.id, |r| r.tracked);
        assert!(delta.is_empty());
        assert!(delta.moved.is_empty());
    }

    #[test]
    fn duplicate_ids_keep_last_occurrence() {
        let before = HashMap::new();
        let after = vec![row(5, 1), row(5, 2)];

        let delta = diff_indexed(&before, &after, |r| r.id, |r| r.tracked);
        assert_eq!(delta.added.len(), 1);
        assert_eq!(delta.added[0].1.index, 1);
        assert_eq!(delta.added[0].1.value.value, 2);
    }

    #[test]
    fn removals_follow_old_order() {
        let before = seen(&[row(9, 0), row(3, 0), row(6, 0)]);
        let delta = diff_indexed(&before, &[], |r: &Row| r.id, |r| r.tracked);
        let ids: Vec<u32> = delta.removed.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![9, 3, 6]);
    }
}
