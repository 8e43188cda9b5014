use super::ChikokuService;
use crate::constants::{GROUP_CREATED, MEMBER_JOINED, MEMBER_LEFT};
use crate::core::errors::ChikokuError;
use crate::core::models::audit::AuditEntry;
use crate::core::models::group::Group;
use crate::core::models::views::{GroupInfo, GroupInfoMember, UserGroupSummary};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    pub async fn create_group(
        &self,
        name: String,
        password: String,
        manager_id: &str,
        description: String,
    ) -> Result<Group, ChikokuError> {
        if self.storage.find_group_by_name(&name).await?.is_some() {
            return Err(ChikokuError::DuplicateGroupName(name));
        }
        if self.storage.find_user_by_id(manager_id).await?.is_none() {
            return Err(ChikokuError::ManagerNotFound(manager_id.to_string()));
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            password,
            manager_id: manager_id.to_string(),
            description,
            members: Vec::new(),
            events: Vec::new(),
            version: 0,
        };
        let group = self.storage.create_group(group).await?;
        info!(group_id = %group.id, manager_id, "group created");

        self.audit(
            AuditEntry::new(GROUP_CREATED)
                .by(manager_id)
                .group(&group.id)
                .note(group.name.as_str()),
        )
        .await;
        Ok(group)
    }

    /// Adds `user_id` to the group called `group_name` and returns the
    /// group's id.
    pub async fn join_group(&self, user_id: &str, group_name: &str, password: &str) -> Result<String, ChikokuError> {
        let group = self
            .storage
            .find_group_by_name(group_name)
            .await?
            .ok_or_else(|| ChikokuError::GroupNotFound(group_name.to_string()))?;
        if group.password != password {
            return Err(ChikokuError::PasswordMismatch(group_name.to_string()));
        }
        self.require_user(user_id).await?;

        let group = self
            .update_group_with(&group.id, |g| {
                if g.is_member(user_id) {
                    return Err(ChikokuError::AlreadyMember(user_id.to_string()));
                }
                if g.is_manager(user_id) {
                    return Err(ChikokuError::IsManager(user_id.to_string()));
                }
                g.members.push(user_id.to_string());
                Ok(())
            })
            .await?;
        info!(group_id = %group.id, user_id, "member joined");

        self.audit(AuditEntry::new(MEMBER_JOINED).by(user_id).group(&group.id)).await;
        Ok(group.id)
    }

    /// Removes the first matching member entry. Votes the user cast on the
    /// group's events stay in place.
    pub async fn leave_group(&self, user_id: &str, group_id: &str) -> Result<(), ChikokuError> {
        self.update_group_with(group_id, |g| {
            if g.is_manager(user_id) {
                return Err(ChikokuError::ManagerCannotLeave(user_id.to_string()));
            }
            let index = g
                .members
                .iter()
                .position(|m| m == user_id)
                .ok_or_else(|| ChikokuError::NotAMember(user_id.to_string()))?;
            g.members.remove(index);
            Ok(())
        })
        .await?;
        info!(group_id, user_id, "member left");

        self.audit(AuditEntry::new(MEMBER_LEFT).by(user_id).group(group_id)).await;
        Ok(())
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, ChikokuError> {
        self.storage
            .find_group_by_id(group_id)
            .await?
            .ok_or_else(|| ChikokuError::GroupNotFound(group_id.to_string()))
    }

    /// Group details with the member roster. Members whose user record
    /// cannot be read are left out.
    pub async fn get_group_info(&self, group_id: &str) -> Result<GroupInfo, ChikokuError> {
        let group = self.get_group(group_id).await?;

        let lookups = join_all(group.members.iter().map(|id| self.storage.find_user_by_id(id))).await;
        let members = group
            .members
            .iter()
            .zip(lookups)
            .filter_map(|(id, lookup)| match lookup {
                Ok(Some(user)) => Some(GroupInfoMember {
                    id: user.id,
                    name: user.name,
                    icon: user.icon,
                }),
                Ok(None) => None,
                Err(e) => {
                    warn!(group_id, user_id = %id, error = %e, "skipping member");
                    None
                }
            })
            .collect();

        Ok(GroupInfo {
            group_name: group.name,
            password: group.password,
            group_manager_id: group.manager_id,
            members,
        })
    }

    pub async fn get_user_groups(&self, user_id: &str) -> Result<Vec<UserGroupSummary>, ChikokuError> {
        let mut groups = self.storage.find_groups_by_member_or_manager(user_id).await?;
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups
            .into_iter()
            .map(|g| UserGroupSummary {
                is_creator: g.is_manager(user_id),
                member_count: g.members.len(),
                id: g.id,
                name: g.name,
                manager_id: g.manager_id,
            })
            .collect())
    }
}
