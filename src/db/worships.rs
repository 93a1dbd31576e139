//! Worship service repository. Services are returned newest first by their
//! combined `date time` key so the upcoming program sits at the top of the
//! schedule screen.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::models::{NewWorship, Worship, WorshipPatch};
use crate::store::KeyValueStore;

/// Storage key holding the serialized worship collection.
pub(crate) const WORSHIPS_KEY: &str = "worships";

impl Record for Worship {
    const KEY: &'static str = WORSHIPS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch every worship service, most recent `date time` first. Applied at
/// read time; the stored array keeps insertion order.
pub fn fetch_all_worships(store: &dyn KeyValueStore) -> Result<Vec<Worship>> {
    let mut worships: Vec<Worship> =
        collection::load_or_empty(store).context("failed to load worships")?;
    worships.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));
    Ok(worships)
}

/// Look up a single worship service by id.
pub fn fetch_worship(store: &dyn KeyValueStore, id: i64) -> Result<Option<Worship>> {
    collection::find_by_id(store, id).context("failed to look up worship")
}

/// Insert a new worship service and return the hydrated record.
pub fn create_worship(store: &dyn KeyValueStore, worship: NewWorship) -> Result<Worship> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Append, |id| Worship {
        id,
        title: worship.title,
        date: worship.date,
        time: worship.time,
        location: worship.location,
        theme: worship.theme,
        preacher: worship.preacher,
        description: worship.description,
        songs: worship.songs,
        musicians: worship.musicians,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert worship")
}

/// Merge the patch into an existing service and refresh `updated_at`. An
/// unknown id is a silent no-op.
pub fn update_worship(store: &dyn KeyValueStore, id: i64, patch: WorshipPatch) -> Result<()> {
    collection::modify(store, id, |worship: &mut Worship| {
        if let Some(title) = patch.title {
            worship.title = title;
        }
        if let Some(date) = patch.date {
            worship.date = date;
        }
        if let Some(time) = patch.time {
            worship.time = time;
        }
        if let Some(location) = patch.location {
            worship.location = location;
        }
        if let Some(theme) = patch.theme {
            worship.theme = Some(theme);
        }
        if let Some(preacher) = patch.preacher {
            worship.preacher = Some(preacher);
        }
        if let Some(description) = patch.description {
            worship.description = Some(description);
        }
        if let Some(songs) = patch.songs {
            worship.songs = songs;
        }
        if let Some(musicians) = patch.musicians {
            worship.musicians = musicians;
        }
        worship.updated_at = Utc::now();
    })
    .context("failed to update worship")
}

/// Remove a worship service. Deleting an unknown id is a silent no-op.
pub fn delete_worship(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<Worship>(store, id).context("failed to delete worship")
}
