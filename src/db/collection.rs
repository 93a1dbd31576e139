//! Shared plumbing for the entity repositories. Every collection is one
//! JSON array stored whole under a single key: reads pull the entire array,
//! mutations edit it in memory and write the entire array back. There is no
//! partial-update primitive at the storage level, so each helper here works
//! on the full collection.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::store::KeyValueStore;

/// A stored collection no longer parses as the expected JSON array. Callers
/// that want to offer recovery catch this through
/// [`anyhow::Error::downcast_ref`]; the repositories themselves log and
/// fall back to an empty collection (see [`load_or_empty`]).
#[derive(Debug, Error)]
#[error("collection {key:?} holds corrupt data: {source}")]
pub struct CorruptData {
    /// Storage key of the damaged collection.
    pub key: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Where a freshly created record lands in the stored array. The two
/// `sent_at`-ordered collections prepend so "most recent first" reads stay
/// cheap; everything else appends.
#[derive(Debug, Clone, Copy)]
pub(crate) enum InsertPosition {
    Append,
    Prepend,
}

/// Implemented by every record type that lives in a collection. The
/// constant binds the type to its storage key, making each repository the
/// single owner of its key string.
pub(crate) trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key holding the serialized collection.
    const KEY: &'static str;

    /// Collection-assigned id of this record.
    fn id(&self) -> i64;
}

/// Load the full collection. An absent key is an empty collection; a value
/// that fails to parse surfaces as [`CorruptData`].
pub(crate) fn load_strict<T: Record>(store: &dyn KeyValueStore) -> Result<Vec<T>> {
    let Some(raw) = store.get(T::KEY)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|source| {
        anyhow::Error::new(CorruptData {
            key: T::KEY,
            source,
        })
    })
}

/// Load the full collection, treating corrupt data as empty. This matches
/// the historical behavior of the app: the damage is logged, the user sees
/// an empty list, and the next write replaces the broken value. Storage
/// failures still propagate.
pub(crate) fn load_or_empty<T: Record>(store: &dyn KeyValueStore) -> Result<Vec<T>> {
    match load_strict::<T>(store) {
        Ok(items) => Ok(items),
        Err(err) if err.is::<CorruptData>() => {
            warn!("{err:#}; treating collection as empty");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Serialize and write the full collection back under its key.
pub(crate) fn save<T: Record>(store: &dyn KeyValueStore, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)
        .with_context(|| format!("failed to serialize collection {:?}", T::KEY))?;
    store.set(T::KEY, &raw)
}

/// Next id for the collection: one past the maximum id currently present,
/// or 1 for an empty collection. Ids are never reused after deletion, but
/// gaps are never filled either.
pub(crate) fn next_id<T: Record>(items: &[T]) -> i64 {
    items.iter().map(Record::id).max().unwrap_or(0) + 1
}

/// Linear scan for a record by id.
pub(crate) fn find_by_id<T: Record>(store: &dyn KeyValueStore, id: i64) -> Result<Option<T>> {
    let items = load_or_empty::<T>(store)?;
    Ok(items.into_iter().find(|item| item.id() == id))
}

/// Assign the next id, build the record, insert it at `position`, and
/// rewrite the collection. Returns the hydrated record so callers can push
/// it straight into UI state.
pub(crate) fn insert<T, F>(
    store: &dyn KeyValueStore,
    position: InsertPosition,
    build: F,
) -> Result<T>
where
    T: Record,
    F: FnOnce(i64) -> T,
{
    let mut items = load_or_empty::<T>(store)?;
    let record = build(next_id(&items));
    match position {
        InsertPosition::Append => items.push(record.clone()),
        InsertPosition::Prepend => items.insert(0, record.clone()),
    }
    save(store, &items)?;
    Ok(record)
}

/// Apply `apply` to the record with the given id and rewrite the
/// collection. When no record matches, nothing happens and no error is
/// raised; callers that care can check existence first via [`find_by_id`].
pub(crate) fn modify<T, F>(store: &dyn KeyValueStore, id: i64, apply: F) -> Result<()>
where
    T: Record,
    F: FnOnce(&mut T),
{
    let mut items = load_or_empty::<T>(store)?;
    let Some(record) = items.iter_mut().find(|item| item.id() == id) else {
        return Ok(());
    };
    apply(record);
    save(store, &items)
}

/// Filter the record with the given id out of the collection and rewrite
/// it. Removing an absent id is a silent no-op, same as [`modify`].
pub(crate) fn remove<T: Record>(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    let mut items = load_or_empty::<T>(store)?;
    items.retain(|item| item.id() != id);
    save(store, &items)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::store::MemoryStore;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: i64,
        label: String,
    }

    impl Record for Entry {
        const KEY: &'static str = "entries";

        fn id(&self) -> i64 {
            self.id
        }
    }

    fn entry(id: i64, label: &str) -> Entry {
        Entry {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn absent_key_loads_as_empty() {
        let store = MemoryStore::new();
        let items: Vec<Entry> = load_strict(&store).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn corrupt_value_is_typed_under_strict_load() {
        let store = MemoryStore::new();
        store.set("entries", "{not json").unwrap();
        let err = load_strict::<Entry>(&store).unwrap_err();
        let corrupt = err.downcast_ref::<CorruptData>().expect("CorruptData");
        assert_eq!(corrupt.key, "entries");
    }

    #[test]
    fn corrupt_value_resets_to_empty_under_lenient_load() {
        let store = MemoryStore::new();
        store.set("entries", "[[[").unwrap();
        let items: Vec<Entry> = load_or_empty(&store).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn next_id_is_one_past_the_maximum() {
        assert_eq!(next_id::<Entry>(&[]), 1);
        assert_eq!(next_id(&[entry(1, "a"), entry(7, "b"), entry(3, "c")]), 8);
    }

    #[test]
    fn insert_appends_or_prepends() {
        let store = MemoryStore::new();
        insert(&store, InsertPosition::Append, |id| entry(id, "first")).unwrap();
        insert(&store, InsertPosition::Append, |id| entry(id, "second")).unwrap();
        insert(&store, InsertPosition::Prepend, |id| entry(id, "newest")).unwrap();

        let items: Vec<Entry> = load_strict(&store).unwrap();
        let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, ["newest", "first", "second"]);
        assert_eq!(items.iter().map(|item| item.id).collect::<Vec<_>>(), [3, 1, 2]);
    }

    #[test]
    fn ids_stay_unique_after_deletion() {
        let store = MemoryStore::new();
        let a = insert(&store, InsertPosition::Append, |id| entry(id, "a")).unwrap();
        let b = insert(&store, InsertPosition::Append, |id| entry(id, "b")).unwrap();
        remove::<Entry>(&store, a.id).unwrap();
        let c = insert(&store, InsertPosition::Append, |id| entry(id, "c")).unwrap();

        // Max recomputation keeps counting past the surviving record; the
        // deleted id is not handed out again.
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[test]
    fn modify_on_unknown_id_changes_nothing() {
        let store = MemoryStore::new();
        insert(&store, InsertPosition::Append, |id| entry(id, "only")).unwrap();
        let before: Vec<Entry> = load_strict(&store).unwrap();

        modify::<Entry, _>(&store, 42, |item| item.label = "changed".into()).unwrap();

        let after: Vec<Entry> = load_strict(&store).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_filters_a_single_record() {
        let store = MemoryStore::new();
        insert(&store, InsertPosition::Append, |id| entry(id, "a")).unwrap();
        insert(&store, InsertPosition::Append, |id| entry(id, "b")).unwrap();
        remove::<Entry>(&store, 1).unwrap();

        let items: Vec<Entry> = load_strict(&store).unwrap();
        assert_eq!(items, [entry(2, "b")]);
    }
}
