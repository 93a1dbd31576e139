//! Observable mirror of the notification feed. On top of the usual CRUD
//! surface this adapter exposes [`NotificationsState::mark_read`], the
//! operation the badge counter hammers.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{
    create_notification, delete_notification, fetch_all_notifications, mark_notification_read,
    update_notification,
};
use crate::models::{NewNotification, Notification, NotificationPatch};
use crate::store::KeyValueStore;

pub struct NotificationsState {
    store: Arc<dyn KeyValueStore>,
    /// The fifty most recent notifications, newest first.
    pub notifications: Vec<Notification>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl NotificationsState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            notifications: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Unread count over the mirrored feed, for the tab badge.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_all_notifications(self.store.as_ref());
        self.is_loading = false;
        match result {
            Ok(notifications) => {
                self.notifications = notifications;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn create(&mut self, notification: NewNotification) -> Result<Notification> {
        self.is_loading = true;
        self.error = None;
        let result = create_notification(self.store.as_ref(), notification).and_then(
            |created| fetch_all_notifications(self.store.as_ref()).map(|all| (created, all)),
        );
        self.is_loading = false;
        match result {
            Ok((created, all)) => {
                self.notifications = all;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i64, patch: NotificationPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_notification(self.store.as_ref(), id, patch)
            .and_then(|()| fetch_all_notifications(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.notifications = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// Mark one notification read and refresh the feed.
    pub fn mark_read(&mut self, id: i64) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = mark_notification_read(self.store.as_ref(), id)
            .and_then(|()| fetch_all_notifications(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.notifications = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// Delete a notification (and, through the repository, its comment
    /// thread), then reload the feed.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = delete_notification(self.store.as_ref(), id)
            .and_then(|()| fetch_all_notifications(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.notifications = all;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}
