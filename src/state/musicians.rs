//! Observable mirror of the musician roster.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{create_musician, delete_musician, fetch_all_musicians, update_musician};
use crate::models::{Musician, MusicianPatch, NewMusician};
use crate::store::KeyValueStore;

pub struct MusiciansState {
    store: Arc<dyn KeyValueStore>,
    pub musicians: Vec<Musician>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl MusiciansState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            musicians: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_all_musicians(self.store.as_ref());
        self.is_loading = false;
        match result {
            Ok(musicians) => {
                self.musicians = musicians;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn create(&mut self, musician: NewMusician) -> Result<Musician> {
        self.is_loading = true;
        self.error = None;
        let result = create_musician(self.store.as_ref(), musician).and_then(|created| {
            fetch_all_musicians(self.store.as_ref()).map(|all| (created, all))
        });
        self.is_loading = false;
        match result {
            Ok((created, all)) => {
                self.musicians = all;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i64, patch: MusicianPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_musician(self.store.as_ref(), id, patch)
            .and_then(|()| fetch_all_musicians(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.musicians = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = delete_musician(self.store.as_ref(), id)
            .and_then(|()| fetch_all_musicians(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.musicians = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}
