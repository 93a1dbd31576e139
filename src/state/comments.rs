//! Observable mirror of one notification's comment thread. Unlike the
//! other adapters this one is bound to a single `notification_id` at
//! construction; a detail screen creates a fresh instance per thread.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{
    create_comment, delete_comment, fetch_comments_for_notification, update_comment,
};
use crate::models::{Comment, CommentPatch, NewComment};
use crate::store::KeyValueStore;

pub struct CommentsState {
    store: Arc<dyn KeyValueStore>,
    notification_id: i64,
    /// Thread, newest comment first.
    pub comments: Vec<Comment>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl CommentsState {
    pub fn new(store: Arc<dyn KeyValueStore>, notification_id: i64) -> Self {
        Self {
            store,
            notification_id,
            comments: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_comments_for_notification(self.store.as_ref(), self.notification_id);
        self.is_loading = false;
        match result {
            Ok(comments) => {
                self.comments = comments;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// Post a comment to this thread. The `notification_id` on the input is
    /// overridden with the bound one so a stale form cannot cross-post.
    pub fn create(&mut self, comment: NewComment) -> Result<Comment> {
        self.is_loading = true;
        self.error = None;
        let comment = NewComment {
            notification_id: self.notification_id,
            ..comment
        };
        let result = create_comment(self.store.as_ref(), comment).and_then(|created| {
            fetch_comments_for_notification(self.store.as_ref(), self.notification_id)
                .map(|thread| (created, thread))
        });
        self.is_loading = false;
        match result {
            Ok((created, thread)) => {
                self.comments = thread;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i64, patch: CommentPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_comment(self.store.as_ref(), id, patch).and_then(|()| {
            fetch_comments_for_notification(self.store.as_ref(), self.notification_id)
        });
        self.is_loading = false;
        match result {
            Ok(thread) => {
                self.comments = thread;
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
        let result = delete_comment(self.store.as_ref(), id).and_then(|()| {
            fetch_comments_for_notification(self.store.as_ref(), self.notification_id)
        });
        self.is_loading = false;
        match result {
            Ok(thread) => {
                self.comments = thread;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn post(content: &str) -> NewComment {
        NewComment {
            notification_id: 0, // overridden by the bound thread
            user_id: "u-9".into(),
            user_name: "Esther Fotso".into(),
            user_role: Some("Choriste".into()),
            content: content.into(),
        }
    }

    #[test]
    fn create_pins_the_bound_notification() {
        let store = Arc::new(MemoryStore::new());
        let mut thread_seven = CommentsState::new(store.clone(), 7);
        let created = thread_seven.create(post("amen")).unwrap();
        assert_eq!(created.notification_id, 7);

        let mut thread_eight = CommentsState::new(store, 8);
        thread_eight.load().unwrap();
        assert!(thread_eight.comments.is_empty());
    }
}
