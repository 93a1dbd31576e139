//! Observable mirror of the song repertoire.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{create_song, delete_song, fetch_all_songs, update_song};
use crate::models::{NewSong, Song, SongPatch};
use crate::store::KeyValueStore;

/// Holds the repertoire for one screen. Construct it once with the shared
/// store handle, call [`SongsState::load`] when the screen appears, and
/// read `songs` after every operation.
pub struct SongsState {
    store: Arc<dyn KeyValueStore>,
    pub songs: Vec<Song>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SongsState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            songs: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Refresh the mirror from storage.
    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_all_songs(self.store.as_ref());
        self.is_loading = false;
        match result {
            Ok(songs) => {
                self.songs = songs;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// Create a song, then reload the whole repertoire so the mirror
    /// reflects exactly what storage holds.
    pub fn create(&mut self, song: NewSong) -> Result<Song> {
        self.is_loading = true;
        self.error = None;
        let result = create_song(self.store.as_ref(), song)
            .and_then(|created| fetch_all_songs(self.store.as_ref()).map(|all| (created, all)));
        self.is_loading = false;
        match result {
            Ok((created, all)) => {
                self.songs = all;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// Patch a song, then reload.
    pub fn update(&mut self, id: i64, patch: SongPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_song(self.store.as_ref(), id, patch)
            .and_then(|()| fetch_all_songs(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.songs = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// Delete a song, then reload.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = delete_song(self.store.as_ref(), id)
            .and_then(|()| fetch_all_songs(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.songs = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}
