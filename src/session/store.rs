// In-memory session table
// Author: kelexine (https://github.com/kelexine)

use super::{SessionKind, SessionRecord};
use crate::metrics;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Session records keyed by the TMDB-issued session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a session TMDB just issued. Re-recording the same id
    /// replaces the old record.
    pub fn record(&self, kind: SessionKind, tmdb_session_id: &str) -> SessionRecord {
        let record = SessionRecord {
            id: Uuid::new_v4(),
            kind,
            tmdb_session_id: tmdb_session_id.to_string(),
            created_at: Utc::now(),
            revoked_at: None,
        };

        self.sessions
            .write()
            .insert(tmdb_session_id.to_string(), record.clone());
        metrics::record_session_event(kind.as_str(), "created");
        info!("Recorded {} session {}", kind.as_str(), record.id);
        record
    }

    /// Mark a session revoked. Returns `false` if it was unknown or already revoked.
    pub fn revoke(&self, tmdb_session_id: &str) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(tmdb_session_id) {
            Some(record) if record.is_active() => {
                record.revoked_at = Some(Utc::now());
                metrics::record_session_event(record.kind.as_str(), "revoked");
                info!("Revoked {} session {}", record.kind.as_str(), record.id);
                true
            }
            Some(_) => false,
            None => {
                debug!("Revoke requested for a session this instance did not create");
                false
            }
        }
    }

    pub fn find(&self, tmdb_session_id: &str) -> Option<SessionRecord> {
        self.sessions.read().get(tmdb_session_id).cloned()
    }

    pub fn active_count(&self) -> usize {
        self.sessions.read().values().filter(|r| r.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_find() {
        let store = SessionStore::new();
        let record = store.record(SessionKind::Guest, "guest-abc");

        let found = store.find("guest-abc").unwrap();
        assert_eq!(found.id, record.id);
        assert_eq!(found.kind, SessionKind::Guest);
        assert!(found.is_active());
        assert_eq!(store.active_count(), 1);
    }

    #[test]
    fn test_revoke_once() {
        let store = SessionStore::new();
        store.record(SessionKind::User, "user-xyz");

        assert!(store.revoke("user-xyz"));
        assert!(!store.revoke("user-xyz"));
        assert!(!store.revoke("unknown"));

        assert!(store.find("user-xyz").unwrap().revoked_at.is_some());
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.len(), 1);
    }
}
