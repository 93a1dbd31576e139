//! Core library for the worship-planner application: song repertoire,
//! worship schedule, team and musician rosters, communications, and
//! notifications with comment threads, all persisted through a device-local
//! key-value store.
//!
//! The public modules exposed here provide an intentionally small API so an
//! application shell as well as external tooling can reuse the same pieces:
//! open a store, run [`db::init`] once, then either call the repository
//! functions directly or hold the `state` adapters behind the screens.
pub mod db;
pub mod models;
pub mod state;
pub mod store;

/// Storage entry points. `SqliteStore::open_default` is what the app shell
/// uses; `MemoryStore` backs tests and throwaway sessions.
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

/// One-time bootstrap for a fresh install.
pub use db::init;

/// The state containers screens hold onto.
pub use state::{
    CommentsState, CommunicationsState, MusiciansState, NotificationsState, SongsState,
    TeamMembersState, WorshipsState,
};
