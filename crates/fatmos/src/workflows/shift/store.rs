use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use super::domain::{CheckInRecord, SessionId};
use super::repository::{CheckInStore, StoreError};

#[derive(Debug, Clone)]
struct StoredCheckIn {
    record: CheckInRecord,
    stored_at: DateTime<Utc>,
}

type Entries = HashMap<SessionId, StoredCheckIn>;

/// Process-local check-in store with per-entry expiry.
///
/// Entries older than the configured time-to-live are treated as absent. Every read and
/// write sweeps them out, so a store that only ever receives check-ins stays bounded by
/// the sessions seen within one time-to-live window.
#[derive(Debug, Clone)]
pub struct InMemoryCheckInStore {
    ttl: Duration,
    entries: Arc<Mutex<Entries>>,
}

impl InMemoryCheckInStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get_at(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<CheckInRecord>, StoreError> {
        let mut entries = self.lock()?;
        self.prune(&mut entries, now);
        Ok(entries.get(session_id).map(|entry| entry.record.clone()))
    }

    pub fn put_at(
        &self,
        session_id: SessionId,
        record: CheckInRecord,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        self.prune(&mut entries, now);
        entries.insert(
            session_id,
            StoredCheckIn {
                record,
                stored_at: now,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn prune(&self, entries: &mut Entries, now: DateTime<Utc>) {
        entries.retain(|_, entry| now - entry.stored_at <= self.ttl);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("check-in store mutex poisoned".to_string()))
    }
}

impl Default for InMemoryCheckInStore {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}

impl CheckInStore for InMemoryCheckInStore {
    fn get(&self, session_id: &SessionId) -> Result<Option<CheckInRecord>, StoreError> {
        self.get_at(session_id, Utc::now())
    }

    fn put(&self, session_id: SessionId, record: CheckInRecord) -> Result<(), StoreError> {
        self.put_at(session_id, record, Utc::now())
    }
}
