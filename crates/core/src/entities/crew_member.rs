//! Crew member schemas. Each crew member belongs to one movie.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Entity, FieldChange, Patch};
use crate::error::ValidationError;
use crate::record::Record;
use crate::schema::{
    created_at_field, id_field, updated_at_field, FieldDoc, FieldKind, SchemaDoc, Schemas,
};
use crate::types::EntityId;
use crate::validation::PayloadReader;

/// Base field set of a crew member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMemberBase {
    /// References a movie; existence is checked by the persistence layer.
    pub movie_id: EntityId,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub award: Option<String>,
}

pub type CrewMemberCreate = CrewMemberBase;

pub type CrewMemberRead = Record<CrewMemberBase>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrewMemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award: Option<Option<String>>,
}

impl Entity for CrewMemberBase {
    const NAME: &'static str = "CrewMember";
    const COLLECTION: &'static str = "crew-members";

    type Update = CrewMemberUpdate;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        let member = Self {
            movie_id: r.required("movie_id"),
            name: r.required("name"),
            role: r.required("role"),
            award: r.optional("award"),
        };
        r.finish(member)
    }

    fn schemas() -> &'static Schemas {
        &CREW_MEMBER_SCHEMAS
    }
}

impl Patch for CrewMemberUpdate {
    type Target = CrewMemberBase;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(CrewMemberBase::NAME, payload);
        let update = Self {
            movie_id: r.patch("movie_id"),
            name: r.patch("name"),
            role: r.patch("role"),
            award: r.patch_nullable("award"),
        };
        r.finish(update)
    }

    fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        if let Some(movie_id) = self.movie_id {
            changes.push(FieldChange::new("movie_id", movie_id.to_string()));
        }
        if let Some(name) = &self.name {
            changes.push(FieldChange::new("name", name.as_str()));
        }
        if let Some(role) = &self.role {
            changes.push(FieldChange::new("role", role.as_str()));
        }
        if let Some(award) = &self.award {
            changes.push(FieldChange::new("award", award.as_deref()));
        }
        changes
    }

    fn apply_to(&self, member: &mut CrewMemberBase) {
        if let Some(movie_id) = self.movie_id {
            member.movie_id = movie_id;
        }
        if let Some(name) = &self.name {
            member.name.clone_from(name);
        }
        if let Some(role) = &self.role {
            member.role.clone_from(role);
        }
        if let Some(award) = &self.award {
            member.award.clone_from(award);
        }
    }
}

// ---------------------------------------------------------------------------
// Documentation
// ---------------------------------------------------------------------------

const MOVIE_ID: FieldDoc = FieldDoc::required(
    "movie_id",
    FieldKind::Uuid,
    "ID of the related movie (foreign key to Movie).",
    r#""aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa""#,
);
const CREW_NAME: FieldDoc = FieldDoc::required(
    "name",
    FieldKind::String,
    "Crew member's full name.",
    r#""Christopher Nolan""#,
);
const ROLE: FieldDoc = FieldDoc::required(
    "role",
    FieldKind::String,
    "Role of the crew member in the movie (e.g., Director, Actor, Producer).",
    r#""Director""#,
);
const AWARD: FieldDoc = FieldDoc::optional(
    "award",
    FieldKind::String,
    "Award received for this role if applicable.",
    r#""Academy Award""#,
);

const BASE_FIELDS: &[FieldDoc] = &[MOVIE_ID, CREW_NAME, ROLE, AWARD];

pub static CREW_MEMBER_SCHEMAS: Schemas = Schemas {
    base: SchemaDoc {
        name: "CrewMemberBase",
        description: "Fields shared by crew member payloads and representations.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "movie_id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
            "name": "Leonardo DiCaprio",
            "role": "Actor",
            "award": "Oscar Nominee"
        }"#],
    },
    create: SchemaDoc {
        name: "CrewMemberCreate",
        description: "Creation payload for a Crew Member.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "movie_id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
            "name": "Elliot Page",
            "role": "Actor",
            "award": null
        }"#],
    },
    update: SchemaDoc {
        name: "CrewMemberUpdate",
        description: "Partial update for a Crew Member; supply only fields to change.",
        fields: &[
            MOVIE_ID.for_patch(r#""cccccccc-cccc-4ccc-8ccc-cccccccccccc""#),
            CREW_NAME.for_patch(r#""Elliot Page""#),
            ROLE.for_patch(r#""Producer""#),
            AWARD.for_patch(r#""Golden Globe""#),
        ],
        examples: &[r#"{"role": "Producer"}"#, r#"{"award": "Golden Globe"}"#],
    },
    read: SchemaDoc {
        name: "CrewMemberRead",
        description: "A Crew Member as returned by the API, including server-assigned fields.",
        fields: &[
            id_field(
                "Server-generated CrewMember ID.",
                r#""bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb""#,
            ),
            MOVIE_ID,
            CREW_NAME,
            ROLE,
            AWARD,
            created_at_field(r#""2025-02-01T08:00:00Z""#),
            updated_at_field(r#""2025-02-02T09:30:00Z""#),
        ],
        examples: &[r#"{
            "id": "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb",
            "movie_id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
            "name": "Leonardo DiCaprio",
            "role": "Actor",
            "award": "Oscar Nominee",
            "created_at": "2025-02-01T08:00:00Z",
            "updated_at": "2025-02-02T09:30:00Z"
        }"#],
    },
};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ViolationKind;

    const MOVIE: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";

    #[test]
    fn create_parses_foreign_key() {
        let member = CrewMemberBase::from_payload(&json!({
            "movie_id": MOVIE,
            "name": "Christopher Nolan",
            "role": "Director"
        }))
        .unwrap();
        assert_eq!(member.movie_id.to_string(), MOVIE);
        assert_eq!(member.award, None);
    }

    #[test]
    fn create_with_malformed_movie_id_fails() {
        let err = CrewMemberBase::from_payload(&json!({
            "movie_id": "movie-42",
            "name": "Christopher Nolan",
            "role": "Director"
        }))
        .unwrap_err();
        assert_eq!(err.entity, "CrewMember");
        assert!(err.has_violation("movie_id", ViolationKind::Format));
    }

    #[test]
    fn create_reports_all_missing_fields() {
        let err = CrewMemberBase::from_payload(&json!({"award": "Oscar"})).unwrap_err();
        for field in ["movie_id", "name", "role"] {
            assert!(err.has_violation(field, ViolationKind::Required), "{field}");
        }
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn update_rejects_malformed_movie_id_only_when_present() {
        assert!(CrewMemberUpdate::from_payload(&json!({})).unwrap().is_empty());

        let err = CrewMemberUpdate::from_payload(&json!({"movie_id": 7})).unwrap_err();
        assert!(err.has_violation("movie_id", ViolationKind::Type));

        let err = CrewMemberUpdate::from_payload(&json!({"movie_id": "movie-42"})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has_violation("movie_id", ViolationKind::Format));
    }

    #[test]
    fn update_changes_carry_wire_values() {
        let update =
            CrewMemberUpdate::from_payload(&json!({"movie_id": MOVIE, "award": "Oscar"})).unwrap();
        assert_eq!(
            update.changes(),
            vec![
                FieldChange::new("movie_id", MOVIE),
                FieldChange::new("award", "Oscar"),
            ]
        );
    }

    #[test]
    fn update_award_merges() {
        let mut member = CrewMemberBase::from_payload(&json!({
            "movie_id": MOVIE,
            "name": "Elliot Page",
            "role": "Actor"
        }))
        .unwrap();
        let update = CrewMemberUpdate::from_payload(&json!({"award": "Golden Globe"})).unwrap();
        update.apply_to(&mut member);
        assert_eq!(member.award.as_deref(), Some("Golden Globe"));
        assert_eq!(member.role, "Actor");
    }
}
