//! Observable mirror of the worship schedule.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{create_worship, delete_worship, fetch_all_worships, update_worship};
use crate::models::{NewWorship, Worship, WorshipPatch};
use crate::store::KeyValueStore;

pub struct WorshipsState {
    store: Arc<dyn KeyValueStore>,
    /// Schedule, most recent service first.
    pub worships: Vec<Worship>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl WorshipsState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            worships: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_all_worships(self.store.as_ref());
        self.is_loading = false;
        match result {
            Ok(worships) => {
                self.worships = worships;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn create(&mut self, worship: NewWorship) -> Result<Worship> {
        self.is_loading = true;
        self.error = None;
        let result = create_worship(self.store.as_ref(), worship)
            .and_then(|created| fetch_all_worships(self.store.as_ref()).map(|all| (created, all)));
        self.is_loading = false;
        match result {
            Ok((created, all)) => {
                self.worships = all;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i64, patch: WorshipPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_worship(self.store.as_ref(), id, patch)
            .and_then(|()| fetch_all_worships(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.worships = all;
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
        let result = delete_worship(self.store.as_ref(), id)
            .and_then(|()| fetch_all_worships(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.worships = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}
