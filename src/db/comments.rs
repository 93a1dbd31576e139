//! Comment repository. Comments only ever appear as the thread of one
//! notification, so the main read path filters by `notification_id` and
//! sorts newest first. Thread removal is crate-internal: it exists solely
//! for the notification cascade and is not a public deletion path.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::models::{Comment, CommentPatch, NewComment};
use crate::store::KeyValueStore;

/// Storage key holding the serialized comment collection.
pub(crate) const COMMENTS_KEY: &str = "comments";

impl Record for Comment {
    const KEY: &'static str = COMMENTS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch the thread of one notification, newest comment first. This is the
/// only read that sorts; the raw collection stays in insertion order.
pub fn fetch_comments_for_notification(
    store: &dyn KeyValueStore,
    notification_id: i64,
) -> Result<Vec<Comment>> {
    let mut thread: Vec<Comment> = collection::load_or_empty::<Comment>(store)
        .context("failed to load comments")?
        .into_iter()
        .filter(|comment| comment.notification_id == notification_id)
        .collect();
    thread.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(thread)
}

/// Look up a single comment by id.
pub fn fetch_comment(store: &dyn KeyValueStore, id: i64) -> Result<Option<Comment>> {
    collection::find_by_id(store, id).context("failed to look up comment")
}

/// Append a new comment to its notification's thread and return the
/// hydrated record.
pub fn create_comment(store: &dyn KeyValueStore, comment: NewComment) -> Result<Comment> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Append, |id| Comment {
        id,
        notification_id: comment.notification_id,
        user_id: comment.user_id,
        user_name: comment.user_name,
        user_role: comment.user_role,
        content: comment.content,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert comment")
}

/// Edit a comment body and refresh `updated_at`. An unknown id is a silent
/// no-op.
pub fn update_comment(store: &dyn KeyValueStore, id: i64, patch: CommentPatch) -> Result<()> {
    collection::modify(store, id, |comment: &mut Comment| {
        if let Some(content) = patch.content {
            comment.content = content;
        }
        comment.updated_at = Utc::now();
    })
    .context("failed to update comment")
}

/// Remove a single comment. Deleting an unknown id is a silent no-op.
pub fn delete_comment(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<Comment>(store, id).context("failed to delete comment")
}

/// Drop every comment belonging to a notification. Crate-visible only so
/// the cascade cannot be bypassed or duplicated outside the notifications
/// repository.
pub(crate) fn remove_thread(store: &dyn KeyValueStore, notification_id: i64) -> Result<()> {
    let mut comments: Vec<Comment> =
        collection::load_or_empty(store).context("failed to load comments")?;
    comments.retain(|comment| comment.notification_id != notification_id);
    collection::save(store, &comments).context("failed to rewrite comments")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn comment_on(notification_id: i64, content: &str) -> NewComment {
        NewComment {
            notification_id,
            user_id: "u-4".into(),
            user_name: "Paul Mbarga".into(),
            user_role: None,
            content: content.into(),
        }
    }

    #[test]
    fn thread_filters_by_notification() {
        let store = MemoryStore::new();
        create_comment(&store, comment_on(1, "amen")).unwrap();
        create_comment(&store, comment_on(2, "autre fil")).unwrap();
        create_comment(&store, comment_on(1, "à samedi")).unwrap();

        let thread = fetch_comments_for_notification(&store, 1).unwrap();
        assert_eq!(thread.len(), 2);
        assert!(thread.iter().all(|c| c.notification_id == 1));
    }

    #[test]
    fn thread_orders_newest_first() {
        // Stamps from `Utc::now` can collide within one test, so write the
        // collection directly with distinct timestamps.
        let store = MemoryStore::new();
        store
            .set(
                COMMENTS_KEY,
                r#"[
                    {"id":1,"notification_id":7,"user_id":"u-1","user_name":"Marie",
                     "user_role":null,"content":"ancien",
                     "created_at":"2024-05-01T08:00:00Z","updated_at":"2024-05-01T08:00:00Z"},
                    {"id":2,"notification_id":7,"user_id":"u-2","user_name":"Jean",
                     "user_role":null,"content":"récent",
                     "created_at":"2024-05-02T08:00:00Z","updated_at":"2024-05-02T08:00:00Z"}
                ]"#,
            )
            .unwrap();

        let thread = fetch_comments_for_notification(&store, 7).unwrap();
        let contents: Vec<&str> = thread.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["récent", "ancien"]);
    }

    #[test]
    fn update_edits_only_the_body() {
        let store = MemoryStore::new();
        let created = create_comment(&store, comment_on(1, "brouillon")).unwrap();

        update_comment(
            &store,
            created.id,
            CommentPatch {
                content: Some("version finale".into()),
            },
        )
        .unwrap();

        let updated = fetch_comment(&store, created.id).unwrap().unwrap();
        assert_eq!(updated.content, "version finale");
        assert_eq!(updated.user_name, "Paul Mbarga");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn remove_thread_spares_other_notifications() {
        let store = MemoryStore::new();
        create_comment(&store, comment_on(1, "a")).unwrap();
        create_comment(&store, comment_on(1, "b")).unwrap();
        create_comment(&store, comment_on(2, "c")).unwrap();

        remove_thread(&store, 1).unwrap();

        assert!(fetch_comments_for_notification(&store, 1).unwrap().is_empty());
        assert_eq!(fetch_comments_for_notification(&store, 2).unwrap().len(), 1);
    }
}
