//! Client-side entry cache.
//!
//! Fetched entry lists are cached per collection and mutated only at
//! defined points: invalidation after a successful mutation, and the
//! explicit two-phase optimistic insert used by create flows. A tentative
//! insert is tagged with a client-generated ULID and is either replaced by
//! the persisted record on confirm or removed on reject — at every moment
//! exactly one representation of each record is visible.
//!
//! Concurrent edits against the same list are last-write-wins; there is no
//! merge or lock.

use std::collections::HashMap;

use tracing::debug;
use ulid::Ulid;

use crate::types::Entry;

/// Tag for an optimistically inserted, not-yet-persisted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TentativeId(Ulid);

impl TentativeId {
    fn new() -> Self {
        Self(Ulid::new())
    }
}

impl std::fmt::Display for TentativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tmp_{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct CachedEntry {
    entry: Entry,
    tentative: Option<TentativeId>,
}

/// Per-collection cache of fetched entries.
#[derive(Debug, Default)]
pub struct EntryCache {
    // Present key = fresh list; a missing key means callers must refetch.
    lists: HashMap<String, Vec<CachedEntry>>,
}

impl EntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly fetched list for a collection, replacing whatever
    /// was there.
    pub fn seed(&mut self, collection: &str, entries: Vec<Entry>) {
        let cached = entries
            .into_iter()
            .map(|entry| CachedEntry {
                entry,
                tentative: None,
            })
            .collect();
        self.lists.insert(collection.to_string(), cached);
    }

    /// Whether a fresh list is cached for the collection.
    pub fn is_fresh(&self, collection: &str) -> bool {
        self.lists.contains_key(collection)
    }

    /// The visible entries for a collection, tentative inserts included.
    /// `None` means the list is stale or was never fetched.
    pub fn entries(&self, collection: &str) -> Option<Vec<&Entry>> {
        self.lists
            .get(collection)
            .map(|list| list.iter().map(|c| &c.entry).collect())
    }

    /// Drop the cached list so the next reader refetches. Called after any
    /// successful mutation — this is the only staleness mechanism.
    pub fn invalidate(&mut self, collection: &str) {
        if self.lists.remove(collection).is_some() {
            debug!(collection, "entry cache invalidated");
        }
    }

    /// Phase one of an optimistic create: make the entry visible
    /// immediately, tagged as tentative.
    pub fn insert_tentative(&mut self, collection: &str, entry: Entry) -> TentativeId {
        let id = TentativeId::new();
        self.lists
            .entry(collection.to_string())
            .or_default()
            .push(CachedEntry {
                entry,
                tentative: Some(id),
            });
        debug!(collection, tentative = %id, "tentative entry inserted");
        id
    }

    /// Phase two, success: replace the tentative row in place with the
    /// persisted record. Returns false if the tag is unknown (e.g. already
    /// rejected).
    pub fn confirm(&mut self, collection: &str, id: TentativeId, persisted: Entry) -> bool {
        let Some(list) = self.lists.get_mut(collection) else {
            return false;
        };
        match list.iter_mut().find(|c| c.tentative == Some(id)) {
            Some(cached) => {
                cached.entry = persisted;
                cached.tentative = None;
                true
            }
            None => false,
        }
    }

    /// Phase two, failure: remove the tentative row.
    pub fn reject(&mut self, collection: &str, id: TentativeId) -> bool {
        let Some(list) = self.lists.get_mut(collection) else {
            return false;
        };
        let before = list.len();
        list.retain(|c| c.tentative != Some(id));
        before != list.len()
    }

    /// Replace a persisted entry by id (last-write-wins), or append it.
    pub fn upsert(&mut self, collection: &str, entry: Entry) {
        let list = self.lists.entry(collection.to_string()).or_default();
        match list
            .iter_mut()
            .find(|c| c.tentative.is_none() && c.entry.id == entry.id)
        {
            Some(cached) => cached.entry = entry,
            None => list.push(CachedEntry {
                entry,
                tentative: None,
            }),
        }
    }

    /// Remove a persisted entry by id.
    pub fn remove(&mut self, collection: &str, entry_id: &str) -> bool {
        let Some(list) = self.lists.get_mut(collection) else {
            return false;
        };
        let before = list.len();
        list.retain(|c| c.entry.id != entry_id);
        before != list.len()
    }
}
