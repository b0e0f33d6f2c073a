// ── Box store ──
//
// Loads replace the local list wholesale and swallow failures; add, update
// and delete apply the server's answer only after it succeeds and hand
// failures back to the caller.

use std::sync::Arc;

use ccro_api::ApiClient;
use tokio::sync::watch;
use tracing::debug;

use super::collection::EntityCollection;
use crate::error::CoreError;
use crate::model::{ArchiveBox, BoxDraft, EntityId};
use crate::policy::{Operation, absorb, propagate};

/// Cached, possibly stale copy of the backend's boxes in load/creation order.
pub struct BoxStore {
    api: Arc<ApiClient>,
    boxes: EntityCollection<ArchiveBox>,
}

impl BoxStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            boxes: EntityCollection::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<Vec<ArchiveBox>> {
        self.boxes.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<ArchiveBox>>> {
        self.boxes.subscribe()
    }

    /// Number of applied mutations so far.
    pub fn version(&self) -> u64 {
        self.boxes.version()
    }

    pub fn get(&self, id: &EntityId) -> Option<ArchiveBox> {
        self.boxes.get(id)
    }

    /// Cached boxes whose code contains `needle`, ignoring case.
    pub fn find_by_code(&self, needle: &str) -> Vec<ArchiveBox> {
        let needle = needle.to_lowercase();
        self.boxes
            .snapshot()
            .iter()
            .filter(|b| b.code.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Fetch every box and replace the local list.
    ///
    /// On failure the error is logged, an empty `Vec` is returned and the
    /// previous list stays in place: an empty result means "no new data",
    /// not "no boxes".
    pub async fn load(&self) -> Vec<ArchiveBox> {
        let Some(boxes) = absorb(Operation::LoadBoxes, self.api.list_boxes().await) else {
            return Vec::new();
        };
        debug!(count = boxes.len(), "loaded boxes");
        self.boxes.replace_all(boxes.clone());
        boxes
    }

    /// Create a box and append the server's record.
    pub async fn add(&self, draft: &BoxDraft) -> Result<ArchiveBox, CoreError> {
        let created = propagate(Operation::AddBox, self.api.create_box(draft).await)?;
        self.boxes.push(created.clone());
        Ok(created)
    }

    /// Update a box by its id and swap in the server's record.
    pub async fn update(&self, archive_box: &ArchiveBox) -> Result<ArchiveBox, CoreError> {
        let updated = propagate(
            Operation::UpdateBox,
            self.api.update_box(&archive_box.id, archive_box).await,
        )?;
        if !self.boxes.replace(&archive_box.id, &updated) {
            debug!(id = %archive_box.id, "updated box was not cached locally");
        }
        Ok(updated)
    }

    /// Delete a box and drop it from the local list.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        propagate(Operation::DeleteBox, self.api.delete_box(id).await)?;
        self.boxes.remove(id);
        Ok(())
    }
}
