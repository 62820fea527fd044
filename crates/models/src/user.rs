use serde::{Deserialize, Serialize};

/// Role reported by the user service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Host,
    Guest,
    /// Any role this service does not know about
    #[serde(other)]
    Unknown,
}

/// The caller as identified by the user service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_host(&self) -> bool {
        self.role == UserRole::Host
    }
}
