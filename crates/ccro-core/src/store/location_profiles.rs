// ── Location profile store ──
//
// Same contract as the box store, plus a cached view of which profile the
// server reports as active. Exclusivity of the active flag is the server's
// job; this store only mirrors what `GET /location-profiles/active` says.

use std::sync::Arc;

use ccro_api::ApiClient;
use tokio::sync::watch;
use tracing::{debug, info};

use super::collection::EntityCollection;
use crate::error::CoreError;
use crate::model::{EntityId, LocationProfile, LocationProfileDraft};
use crate::policy::{Operation, absorb, propagate};

pub struct LocationProfileStore {
    api: Arc<ApiClient>,
    profiles: EntityCollection<LocationProfile>,
    active: watch::Sender<Option<LocationProfile>>,
}

impl LocationProfileStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (active, _) = watch::channel(None);
        Self {
            api,
            profiles: EntityCollection::new(),
            active,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<Vec<LocationProfile>> {
        self.profiles.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<LocationProfile>>> {
        self.profiles.subscribe()
    }

    pub fn get(&self, id: &EntityId) -> Option<LocationProfile> {
        self.profiles.get(id)
    }

    /// The active profile as last reported by the server.
    pub fn active(&self) -> Option<LocationProfile> {
        self.active.borrow().clone()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<Option<LocationProfile>> {
        self.active.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Fetch every profile and replace the local list.
    ///
    /// Failures are logged and leave the previous list in place.
    pub async fn load(&self) -> Vec<LocationProfile> {
        let Some(profiles) = absorb(
            Operation::LoadLocationProfiles,
            self.api.list_location_profiles().await,
        ) else {
            return Vec::new();
        };
        debug!(count = profiles.len(), "loaded location profiles");
        self.profiles.replace_all(profiles.clone());
        profiles
    }

    /// Ask the server which profile is active and mirror the answer.
    ///
    /// Failures are logged and leave both the cached active profile and the
    /// local flags untouched.
    pub async fn load_active(&self) -> Option<LocationProfile> {
        self.fetch_active().await.flatten()
    }

    /// Create or update a profile and upsert the server's record.
    pub async fn save(&self, draft: &LocationProfileDraft) -> Result<LocationProfile, CoreError> {
        let saved = propagate(
            Operation::SaveLocationProfile,
            self.api.save_location_profile(draft).await,
        )?;
        let replaced = match &draft.id {
            Some(id) => self.profiles.replace(id, &saved),
            None => false,
        };
        if !replaced {
            self.profiles.upsert(saved.clone());
        }
        Ok(saved)
    }

    /// Activate a profile, then re-read the server's view of what is active.
    ///
    /// If that follow-up read fails, the flags are mirrored from the
    /// successful activation instead.
    pub async fn activate(&self, id: &EntityId) -> Result<Option<LocationProfile>, CoreError> {
        propagate(
            Operation::ActivateLocationProfile,
            self.api.set_active_location_profile(id).await,
        )?;
        info!(%id, "location profile activated");

        if let Some(active) = self.fetch_active().await {
            return Ok(active);
        }

        self.mirror_active(Some(id));
        let active = self.profiles.get(id);
        self.active.send_replace(active.clone());
        Ok(active)
    }

    /// Delete a profile and drop it from the local list.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        propagate(
            Operation::DeleteLocationProfile,
            self.api.delete_location_profile(id).await,
        )?;
        self.profiles.remove(id);
        self.active.send_if_modified(|active| {
            let was_active = active.as_ref().is_some_and(|p| p.id == *id);
            if was_active {
                *active = None;
            }
            was_active
        });
        Ok(())
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// `None` when the read failed, `Some(None)` when no profile is active.
    async fn fetch_active(&self) -> Option<Option<LocationProfile>> {
        let active = absorb(
            Operation::LoadActiveLocationProfile,
            self.api.get_active_location_profile().await,
        )?;
        self.mirror_active(active.as_ref().map(|p| &p.id));
        self.active.send_replace(active.clone());
        Some(active)
    }

    /// Set `is_active` on the profile with `active_id`, clear it everywhere else.
    fn mirror_active(&self, active_id: Option<&EntityId>) {
        self.profiles.update_each(|p| {
            let should_be_active = active_id == Some(&p.id);
            if p.is_active == should_be_active {
                false
            } else {
                p.is_active = should_be_active;
                true
            }
        });
    }
}
