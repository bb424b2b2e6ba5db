//! The Read representation: Base fields plus server-assigned metadata.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Patch};
use crate::error::ValidationError;
use crate::lifecycle::RecordMeta;
use crate::types::{EntityId, Timestamp};

/// An entity as returned to clients.
///
/// Serializes as a flat object: `id`, then every Base field, then the two
/// timestamps. Deserialization rejects `created_at > updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord<T>", bound(deserialize = "T: Entity"))]
pub struct Record<T> {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: T,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire shape of a [`Record`] before the timestamp ordering is checked.
#[derive(Debug, Deserialize)]
pub struct RawRecord<T> {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: T,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<T: Entity> TryFrom<RawRecord<T>> for Record<T> {
    type Error = ValidationError;

    fn try_from(raw: RawRecord<T>) -> Result<Self, Self::Error> {
        Self::materialize(raw.fields, raw.id, raw.created_at, raw.updated_at)
    }
}

impl<T: Entity> Record<T> {
    /// Wrap freshly accepted fields with generated metadata.
    pub fn new(fields: T) -> Self {
        Self::with_meta(fields, RecordMeta::generate())
    }

    /// Build the client-facing representation from stored values.
    ///
    /// Fails if `created_at` is later than `updated_at`.
    pub fn materialize(
        fields: T,
        id: EntityId,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let meta = RecordMeta {
            id,
            created_at,
            updated_at,
        };
        meta.check(T::NAME)?;
        Ok(Self::with_meta(fields, meta))
    }

    /// Like [`Record::materialize`], but any omitted metadata is generated.
    pub fn materialize_with_defaults(
        fields: T,
        id: Option<EntityId>,
        created_at: Option<Timestamp>,
        updated_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        let meta = RecordMeta::resolve(T::NAME, id, created_at, updated_at)?;
        Ok(Self::with_meta(fields, meta))
    }

    fn with_meta(fields: T, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            fields,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }

    pub fn meta(&self) -> RecordMeta {
        RecordMeta {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Merge a partial update into the Base fields. Timestamps are left to the
    /// caller; see [`Record::touch`].
    pub fn apply(&mut self, patch: &T::Update) {
        patch.apply_to(&mut self.fields);
    }

    /// Record a mutation at `at`, keeping `created_at <= updated_at`.
    pub fn touch(&mut self, at: Timestamp) {
        let mut meta = self.meta();
        meta.touch(at);
        self.updated_at = meta.updated_at;
    }

    pub fn into_parts(self) -> (T, RecordMeta) {
        let meta = self.meta();
        (self.fields, meta)
    }
}
