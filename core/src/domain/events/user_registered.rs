use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{Role, User};

/// Channel/topic the event is published on
pub const USER_REGISTERED_TOPIC: &str = "user.registered";

/// Emitted once a new account has been persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub registered_at: DateTime<Utc>,
}

impl From<&User> for UserRegisteredEvent {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            registered_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_user() {
        let user = User::new("a@x.com".to_string(), "h".to_string(), Role::Student);
        let event = UserRegisteredEvent::from(&user);

        assert_eq!(event.user_id, user.id);
        assert_eq!(event.role, Role::Student);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "student");
    }
}
