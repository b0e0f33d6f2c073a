// Box endpoints
//
// Plain CRUD over `/boxes`. No validation happens client-side; the backend
// owns the business rules.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ArchiveBox, BoxDraft, EntityId};

impl ApiClient {
    /// List every box.
    ///
    /// `GET /boxes`
    pub async fn list_boxes(&self) -> Result<Vec<ArchiveBox>, Error> {
        self.get(&["boxes"]).await
    }

    /// `GET /boxes/{id}`
    pub async fn get_box(&self, id: &EntityId) -> Result<ArchiveBox, Error> {
        self.get(&["boxes", &id.to_string()]).await
    }

    /// Create a box. The returned record carries the server-assigned id.
    ///
    /// `POST /boxes`
    pub async fn create_box(&self, draft: &BoxDraft) -> Result<ArchiveBox, Error> {
        debug!(code = %draft.code, "creating box");
        self.post(&["boxes"], draft).await
    }

    /// `PUT /boxes/{id}`
    pub async fn update_box(
        &self,
        id: &EntityId,
        archive_box: &ArchiveBox,
    ) -> Result<ArchiveBox, Error> {
        debug!(%id, "updating box");
        self.put(&["boxes", &id.to_string()], archive_box).await
    }

    /// `DELETE /boxes/{id}`
    pub async fn delete_box(&self, id: &EntityId) -> Result<(), Error> {
        debug!(%id, "deleting box");
        self.delete(&["boxes", &id.to_string()]).await
    }
}
