use std::sync::Arc;

use uuid::Uuid;

use super::api::DirectoryApi;
use super::notice::Notice;
use super::snapshot::Snapshot;
use super::view::{user_view, Page, UserViewParams};
use crate::dto::user_dto::UserResponse;
use crate::models::user::Role;

/// The console's user directory: a snapshot of `GET /users`, the table
/// state, and the notices produced by mutations.
///
/// Confirmed mutations are applied to the snapshot in place; nothing here
/// re-fetches on its own.
pub struct DirectoryCache {
    api: Arc<dyn DirectoryApi>,
    users: Snapshot<UserResponse>,
    params: UserViewParams,
    notices: Vec<Notice>,
}

impl DirectoryCache {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            users: Snapshot::new(),
            params: UserViewParams::default(),
            notices: Vec::new(),
        }
    }

    /// Replaces the snapshot with the server's list. On failure the previous
    /// snapshot is kept.
    pub async fn refetch(&mut self) -> bool {
        match self.api.list_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "user snapshot refreshed");
                self.users.replace(users);
                true
            }
            Err(err) => {
                self.notices.push(Notice::from_failure(
                    &err,
                    "Failed to fetch users. Please try again later.",
                ));
                false
            }
        }
    }

    pub async fn update_role(&mut self, id: Uuid, role: Role) -> bool {
        match self.api.update_user_role(id, role).await {
            Ok(user) => {
                self.users.patch(user);
                self.notices.push(Notice::success("User role updated successfully"));
                true
            }
            Err(err) => {
                self.notices
                    .push(Notice::fixed_failure(&err, "Failed to update user role"));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> bool {
        match self.api.delete_user(id).await {
            Ok(()) => {
                self.users.remove(id);
                self.notices.push(Notice::success("User deleted successfully"));
                true
            }
            Err(err) => {
                self.notices.push(Notice::fixed_failure(&err, "Failed to delete user"));
                false
            }
        }
    }

    pub fn view(&self) -> Page<'_, UserResponse> {
        user_view(self.users.items(), &self.params)
    }

    pub fn users(&self) -> &Snapshot<UserResponse> {
        &self.users
    }

    pub fn invalidate(&mut self) {
        self.users.invalidate();
    }

    pub fn params(&self) -> &UserViewParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut UserViewParams {
        &mut self.params
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
