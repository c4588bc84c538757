//! User payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as returned to clients (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub unique_id: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The reduced user shape embedded as a message sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub unique_id: String,
    pub avatar: String,
}

impl From<&UserProfile> for UserSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
            unique_id: profile.unique_id.clone(),
            avatar: profile.avatar.clone(),
        }
    }
}

/// Register/login response: the identity fields plus a fresh bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub unique_id: String,
    pub avatar: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(profile: UserProfile, token: String) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            unique_id: profile.unique_id,
            avatar: profile.avatar,
            token,
        }
    }
}
