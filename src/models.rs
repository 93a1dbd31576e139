//! Domain models that mirror the serialized collections and get passed
//! throughout the crate. The intent is that these types stay light-weight
//! data holders so other layers can focus on persistence and state
//! management. Each record type has a `New*` companion holding the fields a
//! caller supplies on creation (ids and timestamps are always assigned by
//! the repository) and a `*Patch` companion whose `Some` fields are merged
//! into the stored record on update.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A song in the repertoire. All descriptive fields are free text so the
/// repertoire can hold anything from hymnal entries to chord charts; the
/// `category` is an open string rather than an enum because congregations
/// invent their own groupings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Collection-assigned id. Edit and delete flows bubble this back to
    /// the persistence layer, so it stays on the struct even when a view
    /// only needs display fields.
    pub id: i64,
    pub title: String,
    pub artist: String,
    /// Musical key ("G", "Dm", ...), kept as text.
    pub key: String,
    pub tempo: String,
    pub duration: String,
    pub category: String,
    pub notes: String,
    pub lyrics: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Song {
    /// Compose a `Title - Artist` string that gracefully omits the hyphen
    /// when the artist is blank. List views and auto-complete rely on this
    /// ready-to-use formatting.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

/// Fields accepted when creating a [`Song`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub tempo: String,
    pub duration: String,
    pub category: String,
    pub notes: String,
    pub lyrics: String,
}

/// Partial update for a [`Song`]; only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct SongPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub tempo: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub lyrics: Option<String>,
}

/// A member of the worship team. The `role` is an open string ("Pianiste",
/// "Chef de louange", ...) because team structures differ per assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for TeamMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

/// Fields accepted when creating a [`TeamMember`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Partial update for a [`TeamMember`].
#[derive(Debug, Clone, Default)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// A scheduled worship service. `songs` and `musicians` hold free-text
/// names copied from the repertoire and roster at planning time, not
/// foreign keys, so editing a song later never rewrites past programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worship {
    pub id: i64,
    pub title: String,
    /// Service date as `YYYY-MM-DD`.
    pub date: String,
    /// Service time as `HH:MM`.
    pub time: String,
    pub location: String,
    pub theme: Option<String>,
    pub preacher: Option<String>,
    pub description: Option<String>,
    pub songs: Vec<String>,
    pub musicians: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Worship {
    /// Combined `date time` sort key. Both parts are zero-padded ISO-style
    /// strings, so lexicographic order is chronological order.
    pub fn starts_at(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

/// Fields accepted when creating a [`Worship`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorship {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub theme: Option<String>,
    pub preacher: Option<String>,
    pub description: Option<String>,
    pub songs: Vec<String>,
    pub musicians: Vec<String>,
}

/// Partial update for a [`Worship`].
#[derive(Debug, Clone, Default)]
pub struct WorshipPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub theme: Option<String>,
    pub preacher: Option<String>,
    pub description: Option<String>,
    pub songs: Option<Vec<String>>,
    pub musicians: Option<Vec<String>>,
}

/// Whether a musician sings or plays. The French labels match how the
/// roster is spoken about in the assemblies this tool grew up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicianType {
    Chantre,
    Instrumentiste,
}

impl fmt::Display for MusicianType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusicianType::Chantre => write!(f, "chantre"),
            MusicianType::Instrumentiste => write!(f, "instrumentiste"),
        }
    }
}

/// A musician on the roster. `voice_type` only makes sense for chantres
/// and `instruments` for instrumentistes, but neither is enforced here;
/// the form layer decides which fields to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Musician {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: MusicianType,
    pub voice_type: Option<String>,
    pub instruments: Option<Vec<String>>,
    /// Days or slots the musician declared themselves available for.
    pub availability: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a [`Musician`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMusician {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub kind: MusicianType,
    pub voice_type: Option<String>,
    pub instruments: Option<Vec<String>>,
    pub availability: Vec<String>,
    pub notes: Option<String>,
}

/// Partial update for a [`Musician`].
#[derive(Debug, Clone, Default)]
pub struct MusicianPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: Option<MusicianType>,
    pub voice_type: Option<String>,
    pub instruments: Option<Vec<String>>,
    pub availability: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Urgency bucket for a broadcast [`Communication`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationKind {
    Info,
    Urgent,
    Reminder,
}

impl fmt::Display for CommunicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationKind::Info => write!(f, "info"),
            CommunicationKind::Urgent => write!(f, "urgent"),
            CommunicationKind::Reminder => write!(f, "reminder"),
        }
    }
}

/// A short broadcast message. Only the newest fifty are ever surfaced, so
/// the type stays deliberately small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    pub id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: CommunicationKind,
    pub sent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a [`Communication`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommunication {
    pub message: String,
    pub kind: CommunicationKind,
}

/// Partial update for a [`Communication`].
#[derive(Debug, Clone, Default)]
pub struct CommunicationPatch {
    pub message: Option<String>,
    pub kind: Option<CommunicationKind>,
}

/// Category of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Urgent,
    Reminder,
    Event,
    Announcement,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Info => "info",
            NotificationKind::Urgent => "urgent",
            NotificationKind::Reminder => "reminder",
            NotificationKind::Event => "event",
            NotificationKind::Announcement => "announcement",
        };
        write!(f, "{label}")
    }
}

/// Which slice of the assembly a [`Notification`] is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetAudience {
    All,
    Musicians,
    Chantres,
    Leaders,
}

impl fmt::Display for TargetAudience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TargetAudience::All => "all",
            TargetAudience::Musicians => "musicians",
            TargetAudience::Chantres => "chantres",
            TargetAudience::Leaders => "leaders",
        };
        write!(f, "{label}")
    }
}

/// An in-app notification. `read` flips independently of the other fields
/// (see `mark_notification_read`), and comments hang off the id, so
/// deleting a notification also removes its thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub target_audience: TargetAudience,
    pub is_scheduled: bool,
    /// Free-form date text captured by the scheduling form; only present
    /// when `is_scheduled` is set.
    pub scheduled_date: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a [`Notification`]. New notifications
/// always start unread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub target_audience: TargetAudience,
    pub is_scheduled: bool,
    pub scheduled_date: Option<String>,
}

/// Partial update for a [`Notification`].
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub kind: Option<NotificationKind>,
    pub target_audience: Option<TargetAudience>,
    pub is_scheduled: Option<bool>,
    pub scheduled_date: Option<String>,
    pub read: Option<bool>,
}

/// A comment on a notification thread. `user_id` and friends come from
/// the authentication layer, which lives outside this crate, so they are
/// carried as plain strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Id of the parent [`Notification`]. The notifications repository
    /// removes the whole thread when the parent goes away.
    pub notification_id: i64,
    pub user_id: String,
    pub user_name: String,
    pub user_role: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a [`Comment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub notification_id: i64,
    pub user_id: String,
    pub user_name: String,
    pub user_role: Option<String>,
    pub content: String,
}

/// Partial update for a [`Comment`]. Only the body is editable; authorship
/// and threading never change after creation.
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub content: Option<String>,
}
