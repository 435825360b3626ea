//! Local record of the TMDB sessions this backend has brokered.
//!
//! TMDB owns the sessions themselves; this table only remembers which guest
//! and user sessions were created through the API and when a logout revoked
//! them. State lives for the process lifetime.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod store;

pub use store::SessionStore;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Guest,
    User,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Guest => "guest",
            SessionKind::User => "user",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub kind: SessionKind,
    /// Guest session id or user session id as issued by TMDB.
    pub tmdb_session_id: String,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}
