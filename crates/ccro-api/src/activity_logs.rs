// Activity log endpoints
//
// The audit trail is append-only: list, create, and a bulk clear.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ActivityLog, NewActivityLog};

impl ApiClient {
    /// Most recent `limit` entries, newest first.
    ///
    /// `GET /activity-logs?limit={limit}`
    pub async fn list_activity_logs(&self, limit: u32) -> Result<Vec<ActivityLog>, Error> {
        self.get_with_params(&["activity-logs"], &[("limit", limit.to_string())])
            .await
    }

    /// `POST /activity-logs`
    pub async fn create_activity_log(&self, entry: &NewActivityLog) -> Result<ActivityLog, Error> {
        debug!(kind = %entry.kind, "recording activity");
        self.post(&["activity-logs"], entry).await
    }

    /// Remove every entry.
    ///
    /// `DELETE /activity-logs`
    pub async fn clear_activity_logs(&self) -> Result<(), Error> {
        debug!("clearing activity logs");
        self.delete(&["activity-logs"]).await
    }
}
