//! Notification repository. Notifications are prepended and surfaced
//! newest-first with the same fifty-item read cap as communications. This
//! is also where the one piece of referential integrity in the whole data
//! model lives: deleting a notification deletes its comment thread.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::db::comments;
use crate::models::{NewNotification, Notification, NotificationPatch};
use crate::store::KeyValueStore;

/// Storage key holding the serialized notification collection.
pub(crate) const NOTIFICATIONS_KEY: &str = "notifications";

/// Read-time cap, shared behavior with the communications feed.
const RECENT_LIMIT: usize = 50;

impl Record for Notification {
    const KEY: &'static str = NOTIFICATIONS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch the fifty most recent notifications, newest first.
pub fn fetch_all_notifications(store: &dyn KeyValueStore) -> Result<Vec<Notification>> {
    let mut notifications: Vec<Notification> =
        collection::load_or_empty(store).context("failed to load notifications")?;
    notifications.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    notifications.truncate(RECENT_LIMIT);
    Ok(notifications)
}

/// Look up a single notification by id, including ones past the read cap.
pub fn fetch_notification(store: &dyn KeyValueStore, id: i64) -> Result<Option<Notification>> {
    collection::find_by_id(store, id).context("failed to look up notification")
}

/// Send a notification: stamp `sent_at`, start it unread, and prepend it.
pub fn create_notification(
    store: &dyn KeyValueStore,
    notification: NewNotification,
) -> Result<Notification> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Prepend, |id| Notification {
        id,
        title: notification.title,
        message: notification.message,
        kind: notification.kind,
        target_audience: notification.target_audience,
        is_scheduled: notification.is_scheduled,
        scheduled_date: notification.scheduled_date,
        sent_at: now,
        read: false,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert notification")
}

/// Merge the patch into an existing notification and refresh `updated_at`.
/// An unknown id is a silent no-op.
pub fn update_notification(
    store: &dyn KeyValueStore,
    id: i64,
    patch: NotificationPatch,
) -> Result<()> {
    collection::modify(store, id, |notification: &mut Notification| {
        if let Some(title) = patch.title {
            notification.title = title;
        }
        if let Some(message) = patch.message {
            notification.message = message;
        }
        if let Some(kind) = patch.kind {
            notification.kind = kind;
        }
        if let Some(target_audience) = patch.target_audience {
            notification.target_audience = target_audience;
        }
        if let Some(is_scheduled) = patch.is_scheduled {
            notification.is_scheduled = is_scheduled;
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            notification.scheduled_date = Some(scheduled_date);
        }
        if let Some(read) = patch.read {
            notification.read = read;
        }
        notification.updated_at = Utc::now();
    })
    .context("failed to update notification")
}

/// Flip the read flag without touching anything else. The badge counter
/// calls this constantly, so it gets its own entry point.
pub fn mark_notification_read(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    update_notification(
        store,
        id,
        NotificationPatch {
            read: Some(true),
            ..NotificationPatch::default()
        },
    )
}

/// Remove a notification and its whole comment thread. The thread removal
/// lives here, inside the repository, so no other deletion path can forget
/// it; comments cannot outlive their notification.
pub fn delete_notification(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<Notification>(store, id).context("failed to delete notification")?;
    comments::remove_thread(store, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::comments::{create_comment, fetch_comments_for_notification};
    use crate::models::{NewComment, NotificationKind, TargetAudience};
    use crate::store::MemoryStore;

    fn announcement(title: &str) -> NewNotification {
        NewNotification {
            title: title.into(),
            message: "Répétition samedi à 15h".into(),
            kind: NotificationKind::Announcement,
            target_audience: TargetAudience::Musicians,
            is_scheduled: false,
            scheduled_date: None,
        }
    }

    fn comment_on(notification_id: i64, content: &str) -> NewComment {
        NewComment {
            notification_id,
            user_id: "u-17".into(),
            user_name: "Sarah Nguemo".into(),
            user_role: Some("Chantre".into()),
            content: content.into(),
        }
    }

    #[test]
    fn notifications_start_unread_and_newest_first() {
        let store = MemoryStore::new();
        create_notification(&store, announcement("Première")).unwrap();
        create_notification(&store, announcement("Deuxième")).unwrap();

        let feed = fetch_all_notifications(&store).unwrap();
        assert_eq!(feed[0].title, "Deuxième");
        assert!(feed.iter().all(|n| !n.read));
    }

    #[test]
    fn mark_read_flips_only_the_flag() {
        let store = MemoryStore::new();
        let created = create_notification(&store, announcement("Répétition")).unwrap();

        mark_notification_read(&store, created.id).unwrap();

        let updated = fetch_notification(&store, created.id).unwrap().unwrap();
        assert!(updated.read);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.sent_at, created.sent_at);
    }

    #[test]
    fn deleting_a_notification_cascades_to_its_thread() {
        let store = MemoryStore::new();
        let n = create_notification(&store, announcement("Avec fil")).unwrap();
        let m = create_notification(&store, announcement("Autre fil")).unwrap();

        for content in ["d'accord", "je serai là", "merci"] {
            create_comment(&store, comment_on(n.id, content)).unwrap();
        }
        create_comment(&store, comment_on(m.id, "noté")).unwrap();

        delete_notification(&store, n.id).unwrap();

        assert!(fetch_notification(&store, n.id).unwrap().is_none());
        assert!(fetch_comments_for_notification(&store, n.id)
            .unwrap()
            .is_empty());

        let survivors = fetch_comments_for_notification(&store, m.id).unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].content, "noté");
    }

    #[test]
    fn feed_caps_at_fifty() {
        let store = MemoryStore::new();
        for n in 1..=55 {
            create_notification(&store, announcement(&format!("n°{n}"))).unwrap();
        }

        let feed = fetch_all_notifications(&store).unwrap();
        assert_eq!(feed.len(), 50);
        assert_eq!(feed[0].title, "n°55");
    }

    #[test]
    fn scheduling_fields_persist() {
        let store = MemoryStore::new();
        let mut scheduled = announcement("Programmée");
        scheduled.is_scheduled = true;
        scheduled.scheduled_date = Some("2024-12-24 18:00".into());

        let created = create_notification(&store, scheduled).unwrap();
        let fetched = fetch_notification(&store, created.id).unwrap().unwrap();
        assert!(fetched.is_scheduled);
        assert_eq!(fetched.scheduled_date.as_deref(), Some("2024-12-24 18:00"));
    }
}
