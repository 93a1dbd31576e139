//! State-holding adapters between the repositories and a UI layer. Each
//! adapter mirrors one collection into memory next to `is_loading` and
//! `error` flags, and every mutation goes through the repository and then
//! reloads the whole collection. There is no optimistic update: the mirror
//! only ever shows data that survived a round trip to storage.
//!
//! Errors are reported twice on purpose. The adapter records the message in
//! `error` for passive displays (banners, badges) and still returns the
//! `Err` so the calling action handler can raise its own dialog. A caller
//! that ignores the return value still sees the updated flag.

mod comments;
mod communications;
mod musicians;
mod notifications;
mod songs;
mod team_members;
mod worships;

pub use comments::CommentsState;
pub use communications::CommunicationsState;
pub use musicians::MusiciansState;
pub use notifications::NotificationsState;
pub use songs::SongsState;
pub use team_members::TeamMembersState;
pub use worships::WorshipsState;
