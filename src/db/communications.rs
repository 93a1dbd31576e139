//! Broadcast communication repository. New messages are prepended so the
//! stored array is already newest-first, and reads surface only the fifty
//! most recent by `sent_at`.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::models::{Communication, CommunicationPatch, NewCommunication};
use crate::store::KeyValueStore;

/// Storage key holding the serialized communication collection.
pub(crate) const COMMUNICATIONS_KEY: &str = "communications";

/// Read-time cap. Older messages stay in storage but never surface.
const RECENT_LIMIT: usize = 50;

impl Record for Communication {
    const KEY: &'static str = COMMUNICATIONS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch the fifty most recent communications, newest first.
pub fn fetch_all_communications(store: &dyn KeyValueStore) -> Result<Vec<Communication>> {
    let mut communications: Vec<Communication> =
        collection::load_or_empty(store).context("failed to load communications")?;
    communications.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    communications.truncate(RECENT_LIMIT);
    Ok(communications)
}

/// Look up a single communication by id, including ones past the read cap.
pub fn fetch_communication(
    store: &dyn KeyValueStore,
    id: i64,
) -> Result<Option<Communication>> {
    collection::find_by_id(store, id).context("failed to look up communication")
}

/// Send a communication: stamp `sent_at` and prepend it to the collection.
pub fn create_communication(
    store: &dyn KeyValueStore,
    communication: NewCommunication,
) -> Result<Communication> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Prepend, |id| Communication {
        id,
        message: communication.message,
        kind: communication.kind,
        sent_at: now,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert communication")
}

/// Merge the patch into an existing communication and refresh
/// `updated_at`. `sent_at` never changes after sending. An unknown id is a
/// silent no-op.
pub fn update_communication(
    store: &dyn KeyValueStore,
    id: i64,
    patch: CommunicationPatch,
) -> Result<()> {
    collection::modify(store, id, |communication: &mut Communication| {
        if let Some(message) = patch.message {
            communication.message = message;
        }
        if let Some(kind) = patch.kind {
            communication.kind = kind;
        }
        communication.updated_at = Utc::now();
    })
    .context("failed to update communication")
}

/// Remove a communication. Deleting an unknown id is a silent no-op.
pub fn delete_communication(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<Communication>(store, id).context("failed to delete communication")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommunicationKind;
    use crate::store::MemoryStore;

    fn info(message: &str) -> NewCommunication {
        NewCommunication {
            message: message.into(),
            kind: CommunicationKind::Info,
        }
    }

    #[test]
    fn newest_communication_comes_first() {
        let store = MemoryStore::new();
        create_communication(&store, info("première annonce")).unwrap();
        create_communication(&store, info("deuxième annonce")).unwrap();

        let messages: Vec<String> = fetch_all_communications(&store)
            .unwrap()
            .into_iter()
            .map(|c| c.message)
            .collect();
        assert_eq!(messages, ["deuxième annonce", "première annonce"]);
    }

    #[test]
    fn reads_cap_at_the_fifty_most_recent() {
        let store = MemoryStore::new();
        for n in 1..=60 {
            create_communication(&store, info(&format!("annonce {n}"))).unwrap();
        }

        let recent = fetch_all_communications(&store).unwrap();
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0].message, "annonce 60");
        assert_eq!(recent[49].message, "annonce 11");
    }

    #[test]
    fn capped_entries_are_still_reachable_by_id() {
        let store = MemoryStore::new();
        let oldest = create_communication(&store, info("annonce 1")).unwrap();
        for n in 2..=60 {
            create_communication(&store, info(&format!("annonce {n}"))).unwrap();
        }

        // Not in the capped view, but never actually deleted.
        let found = fetch_communication(&store, oldest.id).unwrap().unwrap();
        assert_eq!(found.message, "annonce 1");
    }

    #[test]
    fn update_leaves_sent_at_alone() {
        let store = MemoryStore::new();
        let created = create_communication(&store, info("brouillon")).unwrap();

        update_communication(
            &store,
            created.id,
            CommunicationPatch {
                kind: Some(CommunicationKind::Urgent),
                ..CommunicationPatch::default()
            },
        )
        .unwrap();

        let updated = fetch_communication(&store, created.id).unwrap().unwrap();
        assert_eq!(updated.kind, CommunicationKind::Urgent);
        assert_eq!(updated.sent_at, created.sent_at);
    }
}
