// ── Fallback record identifiers ──
//
// Locally synthesized activity records need an id the server never hands
// out. The generator is injected so tests can make ids deterministic.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::model::EntityId;

/// Prefix carried by every locally generated id.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Source of identifiers for locally synthesized records.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> EntityId;
}

impl<F> IdGenerator for F
where
    F: Fn() -> EntityId + Send + Sync,
{
    fn next_id(&self) -> EntityId {
        self()
    }
}

/// Default generator: `local-<uuid v4>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalIdGenerator;

impl IdGenerator for LocalIdGenerator {
    fn next_id(&self) -> EntityId {
        EntityId::Text(format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4()))
    }
}

/// Deterministic generator: `local-1`, `local-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> EntityId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        EntityId::Text(format!("{LOCAL_ID_PREFIX}{n}"))
    }
}

/// Whether `id` was generated on this client rather than by the server.
pub fn is_local_id(id: &EntityId) -> bool {
    matches!(id, EntityId::Text(s) if s.starts_with(LOCAL_ID_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ids_are_unique_and_marked() {
        let ids = LocalIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(is_local_id(&a));
        assert!(!is_local_id(&EntityId::from(12)));
        assert!(!is_local_id(&EntityId::from("12")));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIdGenerator::default();
        assert_eq!(ids.next_id(), EntityId::from("local-1"));
        assert_eq!(ids.next_id(), EntityId::from("local-2"));
    }

    #[test]
    fn closures_are_generators() {
        let fixed = || EntityId::from("local-fixed");
        assert_eq!(fixed.next_id(), EntityId::from("local-fixed"));
    }
}
