//! Contracts shared by every entity family.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::schema::Schemas;

/// The Base field set of an entity family.
///
/// Implementors are the Create payload type as well as the field set carried
/// by the Read representation ([`crate::record::Record`]).
pub trait Entity:
    std::fmt::Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Singular display name, e.g. `"CrewMember"`.
    const NAME: &'static str;

    /// Path segment of the REST collection, e.g. `"crew-members"`.
    const COLLECTION: &'static str;

    /// The partial-update payload for this family.
    type Update: Patch<Target = Self>;

    /// Validate a Create payload.
    ///
    /// Rejects missing required fields, wrong JSON types and malformed
    /// identifiers. Server-assigned fields and unknown fields are ignored.
    fn from_payload(payload: &Value) -> Result<Self, ValidationError>;

    /// Documentation metadata for the Base/Create/Update/Read variants.
    fn schemas() -> &'static Schemas;
}

/// A single `(field, new value)` pair from a partial update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub value: Value,
}

impl FieldChange {
    /// `None` converts to `null`, which clears a nullable field.
    pub fn new(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// A partial update: every field optional, absence means "unchanged".
pub trait Patch:
    std::fmt::Debug + Clone + PartialEq + Serialize + Default + Send + Sync + 'static
{
    type Target;

    /// Validate an Update payload. Only fields that are present are checked.
    fn from_payload(payload: &Value) -> Result<Self, ValidationError>;

    /// The sparse set of changes, in schema field order.
    fn changes(&self) -> Vec<FieldChange>;

    /// Merge the supplied fields into `target`, leaving the rest untouched.
    fn apply_to(&self, target: &mut Self::Target);

    fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}
