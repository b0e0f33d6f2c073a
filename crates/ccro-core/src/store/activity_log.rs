// ── Activity log store ──
//
// Append-only, newest first. Recording an event never fails: when the
// backend cannot take it, a local record with a generated id is prepended
// instead and is never reconciled with the server afterwards.

use std::sync::Arc;

use ccro_api::ApiClient;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::collection::EntityCollection;
use crate::ids::{IdGenerator, LocalIdGenerator};
use crate::model::{ActivityLog, CurrentUser, NewActivityLog};
use crate::policy::{Operation, absorb};

/// Entries fetched by a log load unless configured otherwise.
pub const DEFAULT_LOG_LIMIT: u32 = 100;

pub struct ActivityLogStore {
    api: Arc<ApiClient>,
    logs: EntityCollection<ActivityLog>,
    ids: Arc<dyn IdGenerator>,
    limit: u32,
}

impl ActivityLogStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_id_generator(api, Arc::new(LocalIdGenerator))
    }

    /// Use `ids` for fallback records instead of random UUIDs.
    pub fn with_id_generator(api: Arc<ApiClient>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            api,
            logs: EntityCollection::new(),
            ids,
            limit: DEFAULT_LOG_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current entries, newest first.
    pub fn snapshot(&self) -> Arc<Vec<ActivityLog>> {
        self.logs.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<ActivityLog>>> {
        self.logs.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Fetch the most recent entries and replace the local log.
    ///
    /// Failures are logged and leave the previous log in place.
    pub async fn load(&self) -> Vec<ActivityLog> {
        let Some(logs) = absorb(
            Operation::LoadActivityLogs,
            self.api.list_activity_logs(self.limit).await,
        ) else {
            return Vec::new();
        };
        debug!(count = logs.len(), "loaded activity logs");
        self.logs.replace_all(logs.clone());
        logs
    }

    /// Record an event attributed to `user` (anonymous when `None`).
    ///
    /// The server's record is prepended on success. On any failure a local
    /// record is prepended instead, so this never returns an error.
    pub async fn add_log(
        &self,
        user: Option<&CurrentUser>,
        kind: &str,
        details: &str,
        search_code: Option<&str>,
    ) -> ActivityLog {
        let payload = NewActivityLog {
            user_id: user.map(|u| u.id.clone()),
            username: user.map(|u| u.username.clone()),
            kind: kind.to_owned(),
            details: details.to_owned(),
            search_code: search_code.map(str::to_owned),
        };

        let entry = match self.api.create_activity_log(&payload).await {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    operation = %Operation::AddActivityLog,
                    error = %e,
                    "activity not stored on server, keeping local record"
                );
                self.local_record(payload)
            }
        };

        self.logs.prepend(entry.clone());
        entry
    }

    /// Clear the server's log, then the local one.
    ///
    /// Returns `false` if the server call failed; the local log is then left
    /// exactly as it was.
    pub async fn clear_history(&self) -> bool {
        if absorb(
            Operation::ClearActivityLogs,
            self.api.clear_activity_logs().await,
        )
        .is_none()
        {
            return false;
        }
        self.logs.clear();
        info!("activity history cleared");
        true
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn local_record(&self, payload: NewActivityLog) -> ActivityLog {
        ActivityLog {
            id: self.ids.next_id(),
            user_id: payload.user_id,
            username: payload.username,
            kind: payload.kind,
            details: payload.details,
            search_code: payload.search_code,
            timestamp: Utc::now(),
        }
    }
}
