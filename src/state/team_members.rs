//! Observable mirror of the worship-team roster.

use std::sync::Arc;

use anyhow::Result;

use crate::db::{
    create_team_member, delete_team_member, fetch_all_team_members, update_team_member,
};
use crate::models::{NewTeamMember, TeamMember, TeamMemberPatch};
use crate::store::KeyValueStore;

pub struct TeamMembersState {
    store: Arc<dyn KeyValueStore>,
    /// Roster in alphabetical order, as served by the repository.
    pub members: Vec<TeamMember>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TeamMembersState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            members: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = fetch_all_team_members(self.store.as_ref());
        self.is_loading = false;
        match result {
            Ok(members) => {
                self.members = members;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn create(&mut self, member: NewTeamMember) -> Result<TeamMember> {
        self.is_loading = true;
        self.error = None;
        let result = create_team_member(self.store.as_ref(), member).and_then(|created| {
            fetch_all_team_members(self.store.as_ref()).map(|all| (created, all))
        });
        self.is_loading = false;
        match result {
            Ok((created, all)) => {
                self.members = all;
                Ok(created)
            }
            Err(err) => {
                self.error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i64, patch: TeamMemberPatch) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let result = update_team_member(self.store.as_ref(), id, patch)
            .and_then(|()| fetch_all_team_members(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.members = all;
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
        let result = delete_team_member(self.store.as_ref(), id)
            .and_then(|()| fetch_all_team_members(self.store.as_ref()));
        self.is_loading = false;
        match result {
            Ok(all) => {
                self.members = all;
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

    #[test]
    fn mirror_follows_repository_order() {
        let store = Arc::new(MemoryStore::new());
        let mut state = TeamMembersState::new(store);

        for name in ["Paul", "Alice"] {
            state
                .create(NewTeamMember {
                    name: name.into(),
                    role: "Chantre".into(),
                    phone: None,
                    email: None,
                    avatar_url: None,
                })
                .unwrap();
        }

        let names: Vec<&str> = state.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Paul"]);
    }
}
