//! Enrollment schemas: a person taking part in a course.

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

/// Role assigned when a Create payload omits `role`.
pub const DEFAULT_ROLE: &str = "student";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// Base field set of an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentBase {
    /// References a person managed outside this service.
    pub person_id: EntityId,
    pub course_id: EntityId,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub grade: Option<String>,
}

pub type EnrollmentCreate = EnrollmentBase;

pub type EnrollmentRead = Record<EnrollmentBase>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrollmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Option<String>>,
}

impl Entity for EnrollmentBase {
    const NAME: &'static str = "Enrollment";
    const COLLECTION: &'static str = "enrollments";

    type Update = EnrollmentUpdate;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        let enrollment = Self {
            person_id: r.required("person_id"),
            course_id: r.required("course_id"),
            role: r.defaulted("role", default_role),
            grade: r.optional("grade"),
        };
        r.finish(enrollment)
    }

    fn schemas() -> &'static Schemas {
        &ENROLLMENT_SCHEMAS
    }
}

impl Patch for EnrollmentUpdate {
    type Target = EnrollmentBase;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(EnrollmentBase::NAME, payload);
        let update = Self {
            person_id: r.patch("person_id"),
            course_id: r.patch("course_id"),
            role: r.patch("role"),
            grade: r.patch_nullable("grade"),
        };
        r.finish(update)
    }

    fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        if let Some(person_id) = self.person_id {
            changes.push(FieldChange::new("person_id", person_id.to_string()));
        }
        if let Some(course_id) = self.course_id {
            changes.push(FieldChange::new("course_id", course_id.to_string()));
        }
        if let Some(role) = &self.role {
            changes.push(FieldChange::new("role", role.as_str()));
        }
        if let Some(grade) = &self.grade {
            changes.push(FieldChange::new("grade", grade.as_deref()));
        }
        changes
    }

    fn apply_to(&self, enrollment: &mut EnrollmentBase) {
        if let Some(person_id) = self.person_id {
            enrollment.person_id = person_id;
        }
        if let Some(course_id) = self.course_id {
            enrollment.course_id = course_id;
        }
        if let Some(role) = &self.role {
            enrollment.role.clone_from(role);
        }
        if let Some(grade) = &self.grade {
            enrollment.grade.clone_from(grade);
        }
    }
}

// ---------------------------------------------------------------------------
// Documentation
// ---------------------------------------------------------------------------

const PERSON_ID: FieldDoc = FieldDoc::required(
    "person_id",
    FieldKind::Uuid,
    "ID of the enrolled person (foreign key to Person).",
    r#""99999999-9999-4999-8999-999999999999""#,
);
const COURSE_ID: FieldDoc = FieldDoc::required(
    "course_id",
    FieldKind::Uuid,
    "ID of the course (foreign key to Course).",
    r#""44444444-4444-4444-8444-444444444444""#,
);
const ROLE_DESCRIPTION: &str = "Role of the person in the course (e.g., student, instructor, TA).";
/// Always present once stored.
const READ_ROLE: FieldDoc =
    FieldDoc::required("role", FieldKind::String, ROLE_DESCRIPTION, r#""student""#);
const ROLE: FieldDoc = READ_ROLE.defaulted(r#""student""#);
const GRADE: FieldDoc = FieldDoc::optional(
    "grade",
    FieldKind::String,
    "Final letter grade if applicable.",
    r#""A""#,
);

const BASE_FIELDS: &[FieldDoc] = &[PERSON_ID, COURSE_ID, ROLE, GRADE];

pub static ENROLLMENT_SCHEMAS: Schemas = Schemas {
    base: SchemaDoc {
        name: "EnrollmentBase",
        description: "Fields shared by enrollment payloads and representations.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "person_id": "99999999-9999-4999-8999-999999999999",
            "course_id": "44444444-4444-4444-8444-444444444444",
            "role": "student",
            "grade": "A"
        }"#],
    },
    create: SchemaDoc {
        name: "EnrollmentCreate",
        description: "Creation payload for an Enrollment.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "person_id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
            "course_id": "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb",
            "role": "instructor"
        }"#],
    },
    update: SchemaDoc {
        name: "EnrollmentUpdate",
        description: "Partial update for an Enrollment; supply only fields to change.",
        fields: &[
            PERSON_ID.for_patch(r#""99999999-9999-4999-8999-999999999999""#),
            COURSE_ID.for_patch(r#""55555555-5555-4555-8555-555555555555""#),
            ROLE.for_patch(r#""TA""#),
            GRADE.for_patch(r#""B+""#),
        ],
        examples: &[r#"{"role": "TA"}"#, r#"{"grade": "A-"}"#],
    },
    read: SchemaDoc {
        name: "EnrollmentRead",
        description: "An Enrollment as returned by the API, including server-assigned fields.",
        fields: &[
            id_field(
                "Server-generated Enrollment ID.",
                r#""77777777-7777-4777-8777-777777777777""#,
            ),
            PERSON_ID,
            COURSE_ID,
            READ_ROLE,
            GRADE,
            created_at_field(r#""2025-01-20T08:00:00Z""#),
            updated_at_field(r#""2025-01-21T09:30:00Z""#),
        ],
        examples: &[r#"{
            "id": "77777777-7777-4777-8777-777777777777",
            "person_id": "99999999-9999-4999-8999-999999999999",
            "course_id": "44444444-4444-4444-8444-444444444444",
            "role": "student",
            "grade": "A",
            "created_at": "2025-01-20T08:00:00Z",
            "updated_at": "2025-01-21T09:30:00Z"
        }"#],
    },
};
