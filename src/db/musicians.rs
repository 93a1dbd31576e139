//! Musician roster repository. Chantres and instrumentistes share one
//! collection; the `kind` field tells them apart. Insertion order is kept.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::models::{Musician, MusicianPatch, NewMusician};
use crate::store::KeyValueStore;

/// Storage key holding the serialized musician collection.
pub(crate) const MUSICIANS_KEY: &str = "musicians";

impl Record for Musician {
    const KEY: &'static str = MUSICIANS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch every musician in insertion order.
pub fn fetch_all_musicians(store: &dyn KeyValueStore) -> Result<Vec<Musician>> {
    collection::load_or_empty(store).context("failed to load musicians")
}

/// Look up a single musician by id.
pub fn fetch_musician(store: &dyn KeyValueStore, id: i64) -> Result<Option<Musician>> {
    collection::find_by_id(store, id).context("failed to look up musician")
}

/// Insert a new musician and return the hydrated record.
pub fn create_musician(store: &dyn KeyValueStore, musician: NewMusician) -> Result<Musician> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Append, |id| Musician {
        id,
        name: musician.name,
        email: musician.email,
        phone: musician.phone,
        kind: musician.kind,
        voice_type: musician.voice_type,
        instruments: musician.instruments,
        availability: musician.availability,
        notes: musician.notes,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert musician")
}

/// Merge the patch into an existing musician and refresh `updated_at`. An
/// unknown id is a silent no-op.
pub fn update_musician(store: &dyn KeyValueStore, id: i64, patch: MusicianPatch) -> Result<()> {
    collection::modify(store, id, |musician: &mut Musician| {
        if let Some(name) = patch.name {
            musician.name = name;
        }
        if let Some(email) = patch.email {
            musician.email = email;
        }
        if let Some(phone) = patch.phone {
            musician.phone = phone;
        }
        if let Some(kind) = patch.kind {
            musician.kind = kind;
        }
        if let Some(voice_type) = patch.voice_type {
            musician.voice_type = Some(voice_type);
        }
        if let Some(instruments) = patch.instruments {
            musician.instruments = Some(instruments);
        }
        if let Some(availability) = patch.availability {
            musician.availability = availability;
        }
        if let Some(notes) = patch.notes {
            musician.notes = Some(notes);
        }
        musician.updated_at = Utc::now();
    })
    .context("failed to update musician")
}

/// Remove a musician. Deleting an unknown id is a silent no-op.
pub fn delete_musician(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<Musician>(store, id).context("failed to delete musician")
}
