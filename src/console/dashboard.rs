use std::collections::BTreeMap;

use super::api::{ApiResult, DirectoryApi};
use super::snapshot::Snapshot;
use crate::dto::event_dto::EventResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::event::EventStatus;
use crate::models::user::Role;

/// Headline counts for the admin dashboard. Every role and status has an
/// entry, zero when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_events: usize,
    pub users_by_role: BTreeMap<&'static str, usize>,
    pub events_by_status: BTreeMap<&'static str, usize>,
}

impl DashboardStats {
    pub fn users_with(&self, role: Role) -> usize {
        self.users_by_role.get(role.as_str()).copied().unwrap_or(0)
    }

    pub fn events_with(&self, status: EventStatus) -> usize {
        self.events_by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}

pub fn stats(users: &Snapshot<UserResponse>, events: &Snapshot<EventResponse>) -> DashboardStats {
    let mut users_by_role: BTreeMap<&'static str, usize> =
        Role::ALL.iter().map(|r| (r.as_str(), 0)).collect();
    for user in users.items() {
        *users_by_role.entry(user.role.as_str()).or_default() += 1;
    }

    let mut events_by_status: BTreeMap<&'static str, usize> =
        EventStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
    for event in events.items() {
        *events_by_status.entry(event.status.as_str()).or_default() += 1;
    }

    DashboardStats {
        total_users: users.len(),
        total_events: events.len(),
        users_by_role,
        events_by_status,
    }
}

/// Fetches both collections and counts them. Either fetch failing fails the
/// whole load.
pub async fn load(api: &dyn DirectoryApi) -> ApiResult<DashboardStats> {
    let mut users = Snapshot::new();
    users.replace(api.list_users().await?);
    let mut events = Snapshot::new();
    events.replace(api.list_events().await?);
    Ok(stats(&users, &events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::api::{ConsoleError, MockDirectoryApi};
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: Role) -> UserResponse {
        UserResponse {
            id: Uuid::new_v4(),
            name: "Someone".into(),
            email: format!("{}@example.com", Uuid::new_v4()),
            role,
            created_at: Utc::now(),
        }
    }

    fn event(status: EventStatus) -> EventResponse {
        EventResponse {
            id: Uuid::new_v4(),
            title: "Meetup".into(),
            description: String::new(),
            location: "Hall A".into(),
            date: Utc::now(),
            status,
            organizer_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn counts_by_role_and_status_with_zero_entries() {
        let mut users = Snapshot::new();
        users.replace(vec![user(Role::User), user(Role::User), user(Role::Admin)]);
        let mut events = Snapshot::new();
        events.replace(vec![event(EventStatus::Pending)]);

        let s = stats(&users, &events);
        assert_eq!(s.total_users, 3);
        assert_eq!(s.total_events, 1);
        assert_eq!(s.users_with(Role::User), 2);
        assert_eq!(s.users_with(Role::Admin), 1);
        assert_eq!(s.users_with(Role::Organizer), 0);
        assert_eq!(s.events_with(EventStatus::Pending), 1);
        assert_eq!(s.events_with(EventStatus::Declined), 0);
        assert_eq!(s.users_by_role.len(), 3);
        assert_eq!(s.events_by_status.len(), 3);
    }

    #[test]
    fn empty_snapshots_give_zeroes() {
        let s = stats(&Snapshot::new(), &Snapshot::new());
        assert_eq!(s.total_users, 0);
        assert!(s.users_by_role.values().all(|&n| n == 0));
        assert!(s.events_by_status.values().all(|&n| n == 0));
    }

    #[tokio::test]
    async fn load_fails_when_either_list_fails() {
        let mut api = MockDirectoryApi::new();
        api.expect_list_users()
            .returning(|| Ok(vec![user(Role::Organizer)]));
        api.expect_list_events()
            .returning(|| Err(ConsoleError::Forbidden(String::new())));
        assert!(matches!(load(&api).await, Err(ConsoleError::Forbidden(_))));

        let mut api = MockDirectoryApi::new();
        api.expect_list_users()
            .returning(|| Ok(vec![user(Role::Organizer)]));
        api.expect_list_events()
            .returning(|| Ok(vec![event(EventStatus::Approved)]));
        let s = load(&api).await.unwrap();
        assert_eq!(s.users_with(Role::Organizer), 1);
        assert_eq!(s.events_with(EventStatus::Approved), 1);
    }
}
