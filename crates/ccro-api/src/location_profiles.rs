// Location profile endpoints
//
// Profiles are upserted through a single POST; activation is a PUT on the
// profile's `active` sub-resource. Exclusivity of the active flag is
// enforced by the backend.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{EntityId, LocationProfile, LocationProfileDraft};

const RESOURCE: &str = "location-profiles";

impl ApiClient {
    /// `GET /location-profiles`
    pub async fn list_location_profiles(&self) -> Result<Vec<LocationProfile>, Error> {
        self.get(&[RESOURCE]).await
    }

    /// The profile the backend currently reports as active.
    ///
    /// `GET /location-profiles/active`. A `null` or empty body yields `None`.
    pub async fn get_active_location_profile(&self) -> Result<Option<LocationProfile>, Error> {
        self.get(&[RESOURCE, "active"]).await
    }

    /// `GET /location-profiles/{id}`
    pub async fn get_location_profile(&self, id: &EntityId) -> Result<LocationProfile, Error> {
        self.get(&[RESOURCE, &id.to_string()]).await
    }

    /// Create a profile, or update it when `draft.id` is set.
    ///
    /// `POST /location-profiles`
    pub async fn save_location_profile(
        &self,
        draft: &LocationProfileDraft,
    ) -> Result<LocationProfile, Error> {
        debug!(id = ?draft.id, name = %draft.name, "saving location profile");
        self.post(&[RESOURCE], draft).await
    }

    /// Mark a profile active. The backend deactivates every other profile.
    ///
    /// `PUT /location-profiles/{id}/active`
    pub async fn set_active_location_profile(&self, id: &EntityId) -> Result<(), Error> {
        debug!(%id, "activating location profile");
        self.put_empty(&[RESOURCE, &id.to_string(), "active"]).await
    }

    /// `DELETE /location-profiles/{id}`
    pub async fn delete_location_profile(&self, id: &EntityId) -> Result<(), Error> {
        debug!(%id, "deleting location profile");
        self.delete(&[RESOURCE, &id.to_string()]).await
    }
}
