//! Observable mirror of the communications feed.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{
    create_communication, delete_communication, fetch_all_communications, update_communication,
};
use crate::models::{Communication, CommunicationPatch, NewCommunication};
use crate::store::KeyValueStore;

pub struct CommunicationsState {
    store: Arc<dyn KeyValueStore>,
    /// The fifty most recent messages, newest first.
    pub communications: Vec<Communication>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl CommunicationsState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            communications: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_all_communications(self.store.as_ref());
        self.is_loading = false;
        match result {
            Ok(communications) => {
                self.communications = communications;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn create(&mut self, communication: NewCommunication) -> Result<Communication> {
        self.is_loading = true;
        self.error = None;
        let result = create_communication(self.store.as_ref(), communication).and_then(
            |created| fetch_all_communications(self.store.as_ref()).map(|all| (created, all)),
        );
        self.is_loading = false;
        match result {
            Ok((created, all)) => {
                self.communications = all;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i64, patch: CommunicationPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_communication(self.store.as_ref(), id, patch)
            .and_then(|()| fetch_all_communications(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.communications = all;
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
        let result = delete_communication(self.store.as_ref(), id)
            .and_then(|()| fetch_all_communications(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.communications = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}
