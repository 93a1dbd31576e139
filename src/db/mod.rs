//! Persistence module split across one repository per entity. Each
//! repository owns a single storage key and follows the same contract:
//! whole-collection reads, `max + 1` id assignment, silent no-ops for
//! unknown ids on update and delete.
//!
//! The unit of consistency is one repository call. A mutation performs a
//! full read followed by a full write with nothing in between, so two
//! callers racing the same collection from different threads can lose an
//! update. The app drives all mutations from a single interaction loop,
//! which is what makes that acceptable.

mod collection;
mod comments;
mod communications;
mod musicians;
mod notifications;
mod songs;
mod team_members;
mod worships;

use anyhow::{Context, Result};

use crate::store::KeyValueStore;

pub use collection::CorruptData;
pub use comments::{
    create_comment, delete_comment, fetch_comment, fetch_comments_for_notification,
    update_comment,
};
pub use communications::{
    create_communication, delete_communication, fetch_all_communications,
    fetch_communication, update_communication,
};
pub use musicians::{
    create_musician, delete_musician, fetch_all_musicians, fetch_musician, update_musician,
};
pub use notifications::{
    create_notification, delete_notification, fetch_all_notifications, fetch_notification,
    mark_notification_read, update_notification,
};
pub use songs::{create_song, delete_song, fetch_all_songs, fetch_song, update_song};
pub use team_members::{
    create_team_member, delete_team_member, fetch_all_team_members, fetch_team_member,
    update_team_member,
};
pub use worships::{
    create_worship, delete_worship, fetch_all_worships, fetch_worship, update_worship,
};

/// Every storage key in use, in one place so bulk operations cannot miss a
/// collection added later.
const ALL_KEYS: [&str; 7] = [
    songs::SONGS_KEY,
    team_members::TEAM_MEMBERS_KEY,
    worships::WORSHIPS_KEY,
    musicians::MUSICIANS_KEY,
    communications::COMMUNICATIONS_KEY,
    notifications::NOTIFICATIONS_KEY,
    comments::COMMENTS_KEY,
];

/// One-time bootstrap: seed the starter repertoire and roster into empty
/// collections. Safe to call on every launch; each seed is guarded by an
/// emptiness check and never runs once its collection has data.
pub fn init(store: &dyn KeyValueStore) -> Result<()> {
    songs::seed_default_songs(store)?;
    team_members::seed_default_members(store)?;
    Ok(())
}

/// Wipe every collection. The "start over" escape hatch behind the
/// settings screen; there is deliberately no per-collection variant.
pub fn reset_all(store: &dyn KeyValueStore) -> Result<()> {
    store
        .remove_many(&ALL_KEYS)
        .context("failed to clear collections")
}
