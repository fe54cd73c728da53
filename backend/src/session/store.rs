//! Where drafts live between requests.
//!
//! A draft is stored as JSON under the session id, together with the time
//! it was last saved. Drafts older than the configured lifetime load as
//! missing and are removed; every save also prunes the expired ones, so
//! abandoned sessions do not pile up. The SQLite store is the one `main`
//! uses; the in-memory store backs tests and a configuration without
//! `database_path`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use common::model::draft::Draft;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("draft store query failed")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored draft is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("draft store lock poisoned")]
    Poisoned,
}

pub trait DraftStore: Send + Sync {
    fn load(&self, session_id: &str) -> Result<Option<Draft>, StoreError>;
    fn save(&self, session_id: &str, draft: &Draft) -> Result<(), StoreError>;
    fn clear(&self, session_id: &str) -> Result<(), StoreError>;
}

/// Seconds since the Unix epoch.
fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

#[derive(Debug, Clone, Copy)]
struct Lifetime(i64);

impl Lifetime {
    fn new(lifetime: Duration) -> Self {
        Self(lifetime.as_secs() as i64)
    }

    fn is_expired(self, saved_at: i64, now: i64) -> bool {
        now - saved_at > self.0
    }

    /// Drafts saved before this moment have expired.
    fn cutoff(self, now: i64) -> i64 {
        now - self.0
    }
}

pub struct SqliteDraftStore {
    conn: Mutex<Connection>,
    lifetime: Lifetime,
}

impl SqliteDraftStore {
    pub fn open(path: &Path, lifetime: Duration) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?, lifetime)
    }

    #[cfg(test)]
    pub fn open_in_memory(lifetime: Duration) -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, lifetime)
    }

    fn init(conn: Connection, lifetime: Duration) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS drafts (
                session_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                saved_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            lifetime: Lifetime::new(lifetime),
        })
    }

    fn load_at(&self, session_id: &str, now: i64) -> Result<Option<Draft>, StoreError> {
        let row: Option<(String, i64)> = {
            let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
            conn.query_row(
                "SELECT data, saved_at FROM drafts WHERE session_id = ?1",
                params![session_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?
        };
        match row {
            Some((_, saved_at)) if self.lifetime.is_expired(saved_at, now) => {
                debug!("Draft for session {} has expired", session_id);
                self.clear(session_id)?;
                Ok(None)
            }
            Some((data, _)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    fn save_at(&self, session_id: &str, draft: &Draft, now: i64) -> Result<(), StoreError> {
        let data = serde_json::to_string(draft)?;
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO drafts (session_id, data, saved_at) VALUES (?1, ?2, ?3)",
            params![session_id, data, now],
        )?;
        let pruned = conn.execute(
            "DELETE FROM drafts WHERE saved_at < ?1",
            params![self.lifetime.cutoff(now)],
        )?;
        debug!("Saved draft for session {}", session_id);
        if pruned > 0 {
            debug!("Removed {} expired drafts", pruned);
        }
        Ok(())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM drafts", [], |row| row.get::<_, i64>(0))
            .unwrap() as usize
    }
}

impl DraftStore for SqliteDraftStore {
    fn load(&self, session_id: &str) -> Result<Option<Draft>, StoreError> {
        self.load_at(session_id, now())
    }

    fn save(&self, session_id: &str, draft: &Draft) -> Result<(), StoreError> {
        self.save_at(session_id, draft, now())
    }

    fn clear(&self, session_id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute("DELETE FROM drafts WHERE session_id = ?1", params![session_id])?;
        Ok(())
    }
}

pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<String, (Draft, i64)>>,
    lifetime: Lifetime,
}

impl MemoryDraftStore {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            lifetime: Lifetime::new(lifetime),
        }
    }

    fn load_at(&self, session_id: &str, now: i64) -> Result<Option<Draft>, StoreError> {
        let found = {
            let drafts = self.drafts.read().map_err(|_| StoreError::Poisoned)?;
            drafts.get(session_id).cloned()
        };
        match found {
            Some((_, saved_at)) if self.lifetime.is_expired(saved_at, now) => {
                debug!("Draft for session {} has expired", session_id);
                self.clear(session_id)?;
                Ok(None)
            }
            Some((draft, _)) => Ok(Some(draft)),
            None => Ok(None),
        }
    }

    fn save_at(&self, session_id: &str, draft: &Draft, now: i64) -> Result<(), StoreError> {
        let mut drafts = self.drafts.write().map_err(|_| StoreError::Poisoned)?;
        drafts.insert(session_id.to_string(), (draft.clone(), now));
        let cutoff = self.lifetime.cutoff(now);
        drafts.retain(|_, (_, saved_at)| *saved_at >= cutoff);
        Ok(())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.drafts.read().unwrap().len()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, session_id: &str) -> Result<Option<Draft>, StoreError> {
        self.load_at(session_id, now())
    }

    fn save(&self, session_id: &str, draft: &Draft) -> Result<(), StoreError> {
        self.save_at(session_id, draft, now())
    }

    fn clear(&self, session_id: &str) -> Result<(), StoreError> {
        let mut drafts = self.drafts.write().map_err(|_| StoreError::Poisoned)?;
        drafts.remove(session_id);
        Ok(())
    }
}
