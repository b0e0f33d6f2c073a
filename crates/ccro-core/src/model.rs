// ── Domain model ──
//
// Wire types come straight from `ccro-api`; this module adds the identity
// trait the stores key on, the current-user context, and the well-known
// activity types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use ccro_api::{
    ActivityLog, ArchiveBox, BoxDraft, EntityId, LocationProfile, LocationProfileDraft,
    NewActivityLog, User,
};

/// Entities addressable by their server-assigned id.
pub trait Identified {
    fn entity_id(&self) -> &EntityId;
}

impl Identified for ArchiveBox {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for LocationProfile {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for ActivityLog {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}

// ── Current user ─────────────────────────────────────────────────────

/// The authenticated user that activity records are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: EntityId,
    pub username: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

// ── Activity types ───────────────────────────────────────────────────

/// Activity types recorded by this client.
///
/// The wire field is a free-form string; these are the values the client
/// itself emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Search,
    BoxCreated,
    BoxUpdated,
    BoxDeleted,
    ProfileSaved,
    ProfileActivated,
    ProfileDeleted,
    Login,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn activity_kinds_use_screaming_snake_case() {
        assert_eq!(ActivityKind::Search.as_ref(), "SEARCH");
        assert_eq!(ActivityKind::BoxCreated.to_string(), "BOX_CREATED");
        assert_eq!(
            "PROFILE_ACTIVATED".parse::<ActivityKind>().unwrap(),
            ActivityKind::ProfileActivated
        );
    }

    #[test]
    fn current_user_from_user() {
        let user: User =
            serde_json::from_value(serde_json::json!({ "id": 4, "username": "clerk" })).unwrap();
        let current = CurrentUser::from(&user);
        assert_eq!(current.id, EntityId::from(4));
        assert_eq!(current.username, "clerk");
    }
}
