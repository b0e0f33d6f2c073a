// ccro-api: Async Rust client for the CCRO archive locator REST backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod activity_logs;
mod auth;
mod boxes;
mod location_profiles;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    ActivityLog, ArchiveBox, BoxDraft, EntityId, LocationProfile, LocationProfileDraft,
    NewActivityLog, User,
};
pub use transport::TransportConfig;
