//! State layer between `ccro-api` and UI consumers (the `ccro` CLI).
//!
//! - **[`Archive`]**: facade owning one API client, the three stores, and
//!   the current-user context used to attribute activity records.
//!
//! - **Stores** ([`BoxStore`], [`LocationProfileStore`], [`ActivityLogStore`]):
//!   each exclusively owns one ordered in-memory collection and reconciles
//!   backend results into it. Consumers read cheap `Arc` snapshots or
//!   subscribe to a `watch` channel for change notification.
//!
//! - **Failure policy** ([`policy`]): reads degrade to "keep previous state",
//!   box and profile mutations propagate, and activity recording falls back
//!   to a locally synthesized record.

pub mod archive;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod policy;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use archive::Archive;
pub use config::ArchiveConfig;
pub use error::CoreError;
pub use ids::{IdGenerator, LocalIdGenerator, SequentialIdGenerator, is_local_id};
pub use model::{
    ActivityKind, ActivityLog, ArchiveBox, BoxDraft, CurrentUser, EntityId, Identified,
    LocationProfile, LocationProfileDraft, User,
};
pub use policy::{FailurePolicy, Operation};
pub use store::{ActivityLogStore, BoxStore, DEFAULT_LOG_LIMIT, LocationProfileStore};
