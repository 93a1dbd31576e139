//! Worship-team roster repository. The roster is returned alphabetically,
//! case-insensitively so mixed-case names group together in the UI.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::db::collection::{self, InsertPosition, Record};
use crate::models::{NewTeamMember, TeamMember, TeamMemberPatch};
use crate::store::KeyValueStore;

/// Storage key holding the serialized team-member collection.
pub(crate) const TEAM_MEMBERS_KEY: &str = "team_members";

impl Record for TeamMember {
    const KEY: &'static str = TEAM_MEMBERS_KEY;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fetch every team member, sorted by name. The sort is applied at read
/// time; the stored array keeps insertion order.
pub fn fetch_all_team_members(store: &dyn KeyValueStore) -> Result<Vec<TeamMember>> {
    let mut members: Vec<TeamMember> =
        collection::load_or_empty(store).context("failed to load team members")?;
    members.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(members)
}

/// Look up a single team member by id.
pub fn fetch_team_member(store: &dyn KeyValueStore, id: i64) -> Result<Option<TeamMember>> {
    collection::find_by_id(store, id).context("failed to look up team member")
}

/// Insert a new team member and return the hydrated record.
pub fn create_team_member(
    store: &dyn KeyValueStore,
    member: NewTeamMember,
) -> Result<TeamMember> {
    let now = Utc::now();
    collection::insert(store, InsertPosition::Append, |id| TeamMember {
        id,
        name: member.name,
        role: member.role,
        phone: member.phone,
        email: member.email,
        avatar_url: member.avatar_url,
        created_at: now,
        updated_at: now,
    })
    .context("failed to insert team member")
}

/// Merge the patch into an existing member and refresh `updated_at`. An
/// unknown id is a silent no-op.
pub fn update_team_member(
    store: &dyn KeyValueStore,
    id: i64,
    patch: TeamMemberPatch,
) -> Result<()> {
    collection::modify(store, id, |member: &mut TeamMember| {
        if let Some(name) = patch.name {
            member.name = name;
        }
        if let Some(role) = patch.role {
            member.role = role;
        }
        if let Some(phone) = patch.phone {
            member.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            member.email = Some(email);
        }
        if let Some(avatar_url) = patch.avatar_url {
            member.avatar_url = Some(avatar_url);
        }
        member.updated_at = Utc::now();
    })
    .context("failed to update team member")
}

/// Remove a team member. Deleting an unknown id is a silent no-op.
pub fn delete_team_member(store: &dyn KeyValueStore, id: i64) -> Result<()> {
    collection::remove::<TeamMember>(store, id).context("failed to delete team member")
}

/// Insert the starter roster when the collection is empty. Same idempotent
/// emptiness guard as the song seed.
pub(crate) fn seed_default_members(store: &dyn KeyValueStore) -> Result<()> {
    if !collection::load_or_empty::<TeamMember>(store)
        .context("failed to load team members")?
        .is_empty()
    {
        return Ok(());
    }

    tracing::debug!("seeding default team members");
    for member in default_members() {
        create_team_member(store, member)?;
    }
    Ok(())
}

/// The five members every fresh install starts with.
fn default_members() -> Vec<NewTeamMember> {
    let member = |name: &str, role: &str| NewTeamMember {
        name: name.into(),
        role: role.into(),
        phone: None,
        email: None,
        avatar_url: None,
    };

    vec![
        member("Marie Dupont", "Chef de louange"),
        member("Jean Kamga", "Pianiste"),
        member("Sarah Nguemo", "Chantre"),
        member("Paul Mbarga", "Batteur"),
        member("Esther Fotso", "Choriste"),
    ]
}
