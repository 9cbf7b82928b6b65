//! # Collection Store Primitives
//!
//! The generic capability every domain store is built from: an ordered
//! entity snapshot guarded against superseded fetches, and the
//! loading/error status block a store's actions share.
//!
//! A store applies exactly one structural mutation per completed remote
//! call: replace the snapshot wholesale, append/prepend one created
//! entity, replace one entity by id, or remove one entity by id. Nothing
//! here performs I/O; stores call the service layer and feed results in.

use tracing::debug;

/// A domain record keyed by a server-assigned identifier.
pub trait Entity {
    fn entity_id(&self) -> &str;
}

/// Ordered snapshot of a remote collection.
///
/// Order is the server response order; create actions may append or
/// prepend. Overlapping fetches are serialized by a generation counter:
/// `begin_load` hands out a token, and a `commit` presenting a stale token
/// is discarded so a superseded response can never overwrite newer state.
#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    generation: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
        }
    }
}

impl<T> Collection<T> {
    /// Start a fetch, superseding any still in flight. The returned token
    /// must be presented to [`Collection::commit`].
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// True while `token` still identifies the most recent fetch.
    pub fn is_current(&self, token: u64) -> bool {
        token == self.generation
    }

    /// Replace the snapshot wholesale if `token` is still current. Returns
    /// false when a newer fetch has superseded this one, in which case the
    /// response is dropped.
    pub fn commit(&mut self, token: u64, items: Vec<T>) -> bool {
        if !self.is_current(token) {
            debug!(
                token,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return false;
        }
        self.items = items;
        true
    }

    /// Append the server's representation of a created entity.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Prepend, for most-recently-created-first lists.
    pub fn push_front(&mut self, item: T) {
        self.items.insert(0, item);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clone the snapshot out for a reader.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }
}

impl<T: Entity> Collection<T> {
    /// Look up an entity by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.entity_id() == id)
    }

    /// Replace the entity with the same id in place, preserving its
    /// position. Returns false when the id is not loaded; the caller's
    /// result is dropped in that case.
    pub fn replace(&mut self, item: T) -> bool {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.entity_id() == item.entity_id())
        {
            Some(slot) => {
                *slot = item;
                true
            }
            None => {
                debug!(id = item.entity_id(), "update target not loaded, dropping");
                false
            }
        }
    }

    /// Remove the entity with this id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.entity_id() == id)?;
        Some(self.items.remove(index))
    }
}

/// Loading/error block shared by a store's actions.
///
/// The error field only ever holds one of the store's fixed messages; the
/// detailed cause goes to the diagnostic channel. `write_in_flight` guards
/// create actions against duplicate submission (double-click protection).
#[derive(Debug, Default)]
pub struct StoreStatus {
    loading: bool,
    error: Option<String>,
    write_in_flight: bool,
}

impl StoreStatus {
    /// Enter the loading state and clear any previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Leave the loading state with a clean error field.
    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// Leave the loading state recording the action's fixed message.
    pub fn fail(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_string());
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Claim the write slot. Returns false when another create is already
    /// pending; the caller must fail fast without touching state.
    pub fn begin_write(&mut self) -> bool {
        if self.write_in_flight {
            return false;
        }
        self.write_in_flight = true;
        true
    }

    /// Release the write slot.
    pub fn end_write(&mut self) {
        self.write_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: i32,
    }

    impl Entity for Item {
        fn entity_id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: i32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn commit_replaces_wholesale() {
        let mut collection = Collection::default();
        let token = collection.begin_load();
        assert!(collection.commit(token, vec![item("a", 1), item("b", 2)]));

        let token = collection.begin_load();
        assert!(collection.commit(token, vec![item("c", 3)]));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.items()[0].id, "c");
    }

    #[test]
    fn superseded_commit_is_discarded() {
        let mut collection = Collection::default();
        let first = collection.begin_load();
        let second = collection.begin_load();

        // The newer fetch lands first.
        assert!(collection.commit(second, vec![item("new", 2)]));
        // The overtaken response arrives late and must not win.
        assert!(!collection.commit(first, vec![item("old", 1)]));

        assert_eq!(collection.items()[0].id, "new");
        assert!(!collection.is_current(first));
    }

    #[test]
    fn replace_preserves_position() {
        let mut collection = Collection::default();
        let token = collection.begin_load();
        collection.commit(token, vec![item("a", 1), item("b", 2), item("c", 3)]);

        assert!(collection.replace(item("b", 20)));
        let ids: Vec<&str> = collection.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(collection.get("b").unwrap().value, 20);
    }

    #[test]
    fn replace_of_unloaded_id_is_dropped() {
        let mut collection = Collection::default();
        let token = collection.begin_load();
        collection.commit(token, vec![item("a", 1)]);

        assert!(!collection.replace(item("ghost", 9)));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("a").unwrap().value, 1);
    }

    #[test]
    fn remove_is_noop_for_absent_id() {
        let mut collection = Collection::default();
        let token = collection.begin_load();
        collection.commit(token, vec![item("a", 1), item("b", 2)]);

        assert_eq!(collection.remove("b").map(|i| i.value), Some(2));
        assert!(collection.remove("b").is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn push_front_prepends() {
        let mut collection = Collection::default();
        collection.push(item("a", 1));
        collection.push_front(item("b", 2));
        assert_eq!(collection.items()[0].id, "b");
    }

    #[test]
    fn status_transitions() {
        let mut status = StoreStatus::default();
        assert!(!status.is_loading());
        assert_eq!(status.error(), None);

        status.begin();
        assert!(status.is_loading());

        status.fail("Failed to fetch accounts");
        assert!(!status.is_loading());
        assert_eq!(status.error(), Some("Failed to fetch accounts"));

        // A new attempt clears the stale error.
        status.begin();
        assert_eq!(status.error(), None);
        status.succeed();
        assert!(!status.is_loading());
        assert_eq!(status.error(), None);
    }

    #[test]
    fn write_slot_rejects_double_claim() {
        let mut status = StoreStatus::default();
        assert!(status.begin_write());
        assert!(!status.begin_write());
        status.end_write();
        assert!(status.begin_write());
    }
}
