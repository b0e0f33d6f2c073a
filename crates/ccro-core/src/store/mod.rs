// ── Entity stores ──
//
// One store per backend resource. Each exclusively owns an ordered
// collection and is its only writer.

mod activity_log;
mod boxes;
mod collection;
mod location_profiles;

pub use activity_log::{ActivityLogStore, DEFAULT_LOG_LIMIT};
pub use boxes::BoxStore;
pub use location_profiles::LocationProfileStore;
