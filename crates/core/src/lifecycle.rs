//! Server-assigned lifecycle fields: identifier and timestamps.
//!
//! Defaults are produced by explicit factory functions that run only when the
//! caller omits a value. The persistence layer is expected to pass explicit
//! values on real create/update flows.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ViolationKind};
use crate::types::{EntityId, Timestamp};

/// Field names reserved for server-assigned metadata.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Generate a fresh random (v4) identifier from the OS CSPRNG.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4()
}

/// The current UTC instant.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

/// Identifier and timestamps attached to every stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RecordMeta {
    /// Fresh metadata: a new id, both timestamps set to the same instant.
    pub fn generate() -> Self {
        let at = now();
        Self {
            id: new_id(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Fill in any omitted value and check `created_at <= updated_at`.
    ///
    /// Omitted timestamps default to a single "now" instant captured once, so
    /// omitting both yields equal timestamps.
    pub fn resolve(
        entity: &'static str,
        id: Option<EntityId>,
        created_at: Option<Timestamp>,
        updated_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        let id = id.unwrap_or_else(new_id);
        let (created_at, updated_at) = match (created_at, updated_at) {
            (Some(c), Some(u)) => (c, u),
            (c, u) => {
                let at = now();
                (c.unwrap_or(at), u.unwrap_or(at))
            }
        };
        let meta = Self {
            id,
            created_at,
            updated_at,
        };
        meta.check(entity)?;
        Ok(meta)
    }

    /// Verify the timestamp ordering invariant.
    pub fn check(&self, entity: &'static str) -> Result<(), ValidationError> {
        if self.created_at > self.updated_at {
            return Err(ValidationError::single(
                entity,
                "updated_at",
                ViolationKind::Range,
                format!(
                    "updated_at ({}) must not precede created_at ({})",
                    self.updated_at, self.created_at
                ),
            ));
        }
        Ok(())
    }

    /// Record a mutation at `at`. Never moves `updated_at` before `created_at`.
    pub fn touch(&mut self, at: Timestamp) {
        self.updated_at = at.max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn generate_uses_v4_and_equal_timestamps() {
        let meta = RecordMeta::generate();
        assert_eq!(meta.id.get_version_num(), 4);
        assert!(!meta.id.is_nil());
        assert_eq!(meta.created_at, meta.updated_at);
    }

    #[test]
    fn new_ids_do_not_repeat() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn resolve_keeps_supplied_values() {
        let id = new_id();
        let created = Utc.with_ymd_and_hms(2025, 2, 1, 10, 20, 30).unwrap();
        let updated = Utc.with_ymd_and_hms(2025, 2, 2, 12, 0, 0).unwrap();
        let meta = RecordMeta::resolve("Movie", Some(id), Some(created), Some(updated)).unwrap();
        assert_eq!(meta.id, id);
        assert_eq!(meta.created_at, created);
        assert_eq!(meta.updated_at, updated);
    }

    #[test]
    fn resolve_defaults_both_timestamps_to_one_instant() {
        let meta = RecordMeta::resolve("Movie", None, None, None).unwrap();
        assert_eq!(meta.created_at, meta.updated_at);
        assert_eq!(meta.id.get_version_num(), 4);
    }

    #[test]
    fn resolve_defaults_updated_at_after_past_created_at() {
        let created = Utc.with_ymd_and_hms(2025, 1, 15, 10, 20, 30).unwrap();
        let meta = RecordMeta::resolve("Course", None, Some(created), None).unwrap();
        assert_eq!(meta.created_at, created);
        assert!(meta.updated_at >= created);
    }

    #[test]
    fn resolve_rejects_inverted_timestamps() {
        let created = Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap();
        let updated = created - Duration::seconds(1);
        let err = RecordMeta::resolve("Movie", None, Some(created), Some(updated)).unwrap_err();
        assert_eq!(err.entity, "Movie");
        assert!(err.has_violation("updated_at", ViolationKind::Range));
    }

    #[test]
    fn touch_never_precedes_creation() {
        let mut meta = RecordMeta::generate();
        let earlier = meta.created_at - Duration::hours(1);
        meta.touch(earlier);
        assert_eq!(meta.updated_at, meta.created_at);

        let later = meta.created_at + Duration::hours(1);
        meta.touch(later);
        assert_eq!(meta.updated_at, later);
    }
}
