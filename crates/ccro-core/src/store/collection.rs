// ── Ordered reactive entity collection ──
//
// The current `Vec` lives inside a `watch` channel: every mutation is one
// `send_if_modified` call, so readers always see a whole snapshot and
// subscribers are woken only when something actually changed.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{EntityId, Identified};

/// An ordered, observable collection for a single entity type.
///
/// Order is meaningful: stores decide whether new entries go to the end
/// (load/creation order) or the front (newest-first logs). Every applied
/// mutation bumps a version counter.
pub(crate) struct EntityCollection<T: Identified + Clone + Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<Vec<T>>>,
    version: watch::Sender<u64>,
}

impl<T: Identified + Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// Replace the whole collection.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        self.mutate(|v| {
            *v = items;
            true
        });
    }

    /// Append at the end.
    pub(crate) fn push(&self, item: T) {
        self.mutate(|v| {
            v.push(item);
            true
        });
    }

    /// Insert at index 0.
    pub(crate) fn prepend(&self, item: T) {
        self.mutate(|v| {
            v.insert(0, item);
            true
        });
    }

    /// Replace every entry whose id equals `id` by `item`. Returns `true` if any matched.
    pub(crate) fn replace(&self, id: &EntityId, item: &T) -> bool {
        self.mutate(|v| {
            let mut matched = false;
            for slot in v.iter_mut().filter(|e| e.entity_id() == id) {
                *slot = item.clone();
                matched = true;
            }
            matched
        })
    }

    /// Replace the matching entry, or append when none exists. Returns `true` if new.
    pub(crate) fn upsert(&self, item: T) -> bool {
        if self.replace(item.entity_id(), &item) {
            false
        } else {
            self.push(item);
            true
        }
    }

    /// Remove every entry with `id`. Returns the number removed.
    pub(crate) fn remove(&self, id: &EntityId) -> usize {
        let mut removed = 0;
        self.mutate(|v| {
            let before = v.len();
            v.retain(|e| e.entity_id() != id);
            removed = before - v.len();
            removed > 0
        });
        removed
    }

    /// Apply `f` to every entry in place. `f` returns `true` if it changed the entry.
    pub(crate) fn update_each(&self, mut f: impl FnMut(&mut T) -> bool) {
        self.mutate(|v| v.iter_mut().fold(false, |changed, e| f(e) || changed));
    }

    pub(crate) fn clear(&self) {
        self.mutate(|v| {
            let had_entries = !v.is_empty();
            v.clear();
            had_entries
        });
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<T> {
        self.snapshot
            .borrow()
            .iter()
            .find(|e| e.entity_id() == id)
            .cloned()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.snapshot.borrow())
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Run `f` against the entries and publish the result if `f` reports
    /// a change. Outstanding snapshots keep their old contents.
    fn mutate(&self, f: impl FnOnce(&mut Vec<T>) -> bool) -> bool {
        let changed = self
            .snapshot
            .send_if_modified(|snap| f(Arc::make_mut(snap)));
        if changed {
            self.version.send_modify(|v| *v += 1);
        }
        changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Identified for Item {
        fn entity_id(&self) -> &EntityId {
            &self.id
        }
    }

    fn item(id: i64, label: &'static str) -> Item {
        Item {
            id: EntityId::from(id),
            label,
        }
    }

    fn labels(col: &EntityCollection<Item>) -> Vec<&'static str> {
        col.snapshot().iter().map(|i| i.label).collect()
    }

    #[test]
    fn push_keeps_insertion_order() {
        let col = EntityCollection::new();
        col.push(item(1, "a"));
        col.push(item(2, "b"));
        col.push(item(3, "c"));
        assert_eq!(labels(&col), vec!["a", "b", "c"]);
    }

    #[test]
    fn prepend_puts_newest_first() {
        let col = EntityCollection::new();
        col.prepend(item(1, "old"));
        col.prepend(item(2, "new"));
        assert_eq!(labels(&col), vec!["new", "old"]);
    }

    #[test]
    fn replace_matches_by_id_in_place() {
        let col = EntityCollection::new();
        col.replace_all(vec![item(1, "a"), item(2, "b")]);
        assert!(col.replace(&EntityId::from(1), &item(1, "a2")));
        assert_eq!(labels(&col), vec!["a2", "b"]);
    }

    #[test]
    fn replace_of_unknown_id_changes_nothing() {
        let col = EntityCollection::new();
        col.push(item(1, "a"));
        let version = col.version();
        assert!(!col.replace(&EntityId::from(9), &item(9, "z")));
        assert_eq!(labels(&col), vec!["a"]);
        assert_eq!(col.version(), version);
    }

    #[test]
    fn upsert_appends_new_and_replaces_existing() {
        let col = EntityCollection::new();
        assert!(col.upsert(item(1, "a")));
        assert!(!col.upsert(item(1, "a2")));
        assert!(col.upsert(item(2, "b")));
        assert_eq!(labels(&col), vec!["a2", "b"]);
    }

    #[test]
    fn remove_reports_count() {
        let col = EntityCollection::new();
        col.replace_all(vec![item(1, "a"), item(2, "b")]);
        assert_eq!(col.remove(&EntityId::from("1")), 1);
        assert_eq!(col.remove(&EntityId::from(1)), 0);
        assert_eq!(labels(&col), vec!["b"]);
    }

    #[test]
    fn clear_empties_everything() {
        let col = EntityCollection::new();
        col.replace_all(vec![item(1, "a"), item(2, "b")]);
        col.clear();
        assert_eq!(col.len(), 0);
        assert!(col.snapshot().is_empty());
    }

    #[test]
    fn old_snapshots_are_not_mutated() {
        let col = EntityCollection::new();
        col.push(item(1, "a"));
        let before = col.snapshot();
        col.push(item(2, "b"));
        assert_eq!(before.len(), 1);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn version_bumps_only_on_change() {
        let col = EntityCollection::new();
        assert_eq!(col.version(), 0);
        col.push(item(1, "a"));
        assert_eq!(col.version(), 1);
        col.remove(&EntityId::from(42));
        assert_eq!(col.version(), 1);
        col.clear();
        col.clear();
        assert_eq!(col.version(), 2);
    }

    #[test]
    fn update_each_applies_in_place() {
        let col = EntityCollection::new();
        col.replace_all(vec![item(1, "a"), item(2, "b")]);
        col.update_each(|i| {
            if i.id == EntityId::from(2) {
                i.label = "b2";
                true
            } else {
                false
            }
        });
        assert_eq!(labels(&col), vec!["a", "b2"]);
        assert_eq!(col.get(&EntityId::from(2)).unwrap().label, "b2");
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let col = EntityCollection::new();
        let mut rx = col.subscribe();
        col.push(item(1, "a"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
