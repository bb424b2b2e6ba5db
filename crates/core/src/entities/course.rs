//! Course schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Entity, FieldChange, Patch};
use crate::error::ValidationError;
use crate::record::Record;
use crate::schema::{
    created_at_field, id_field, updated_at_field, FieldDoc, FieldKind, SchemaDoc, Schemas,
};
use crate::validation::PayloadReader;

/// Base field set of a course.
///
/// `code` is unique across courses; the persistence layer enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBase {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub credits: i32,
    pub department: String,
}

pub type CourseCreate = CourseBase;

pub type CourseRead = Record<CourseBase>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Entity for CourseBase {
    const NAME: &'static str = "Course";
    const COLLECTION: &'static str = "courses";

    type Update = CourseUpdate;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        let course = Self {
            code: r.required("code"),
            title: r.required("title"),
            description: r.optional("description"),
            credits: r.required("credits"),
            department: r.required("department"),
        };
        r.finish(course)
    }

    fn schemas() -> &'static Schemas {
        &COURSE_SCHEMAS
    }
}

impl Patch for CourseUpdate {
    type Target = CourseBase;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(CourseBase::NAME, payload);
        let update = Self {
            code: r.patch("code"),
            title: r.patch("title"),
            description: r.patch_nullable("description"),
            credits: r.patch("credits"),
            department: r.patch("department"),
        };
        r.finish(update)
    }

    fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        if let Some(code) = &self.code {
            changes.push(FieldChange::new("code", code.as_str()));
        }
        if let Some(title) = &self.title {
            changes.push(FieldChange::new("title", title.as_str()));
        }
        if let Some(description) = &self.description {
            changes.push(FieldChange::new("description", description.as_deref()));
        }
        if let Some(credits) = self.credits {
            changes.push(FieldChange::new("credits", credits));
        }
        if let Some(department) = &self.department {
            changes.push(FieldChange::new("department", department.as_str()));
        }
        changes
    }

    fn apply_to(&self, course: &mut CourseBase) {
        if let Some(code) = &self.code {
            course.code.clone_from(code);
        }
        if let Some(title) = &self.title {
            course.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            course.description.clone_from(description);
        }
        if let Some(credits) = self.credits {
            course.credits = credits;
        }
        if let Some(department) = &self.department {
            course.department.clone_from(department);
        }
    }
}

// ---------------------------------------------------------------------------
// Documentation
// ---------------------------------------------------------------------------

const CODE: FieldDoc = FieldDoc::required(
    "code",
    FieldKind::String,
    "Unique course code (e.g., COMS W4701).",
    r#""COMS W4701""#,
);
const TITLE: FieldDoc = FieldDoc::required(
    "title",
    FieldKind::String,
    "Full course title.",
    r#""Artificial Intelligence""#,
);
const DESCRIPTION: FieldDoc = FieldDoc::optional(
    "description",
    FieldKind::String,
    "Optional long description of the course.",
    r#""Introduction to modern AI techniques and applications.""#,
);
const CREDITS: FieldDoc = FieldDoc::required(
    "credits",
    FieldKind::Integer,
    "Number of credits awarded for the course.",
    "3",
);
const DEPARTMENT: FieldDoc = FieldDoc::required(
    "department",
    FieldKind::String,
    "Owning department or program.",
    r#""Computer Science""#,
);

const BASE_FIELDS: &[FieldDoc] = &[CODE, TITLE, DESCRIPTION, CREDITS, DEPARTMENT];

pub static COURSE_SCHEMAS: Schemas = Schemas {
    base: SchemaDoc {
        name: "CourseBase",
        description: "Fields shared by course payloads and representations.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "code": "COMS W4701",
            "title": "Artificial Intelligence",
            "description": "Introduction to modern AI techniques and applications.",
            "credits": 3,
            "department": "Computer Science"
        }"#],
    },
    create: SchemaDoc {
        name: "CourseCreate",
        description: "Creation payload for a Course.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "code": "HIST W3450",
            "title": "Modern European History",
            "description": "Survey of European history from 1789 to the present.",
            "credits": 4,
            "department": "History"
        }"#],
    },
    update: SchemaDoc {
        name: "CourseUpdate",
        description: "Partial update for a Course; supply only fields to change.",
        fields: &[
            CODE.for_patch(r#""COMS W4702""#),
            TITLE.for_patch(r#""AI: Principles and Applications""#),
            DESCRIPTION.for_patch(r#""Updated course syllabus and focus.""#),
            CREDITS.for_patch("4"),
            DEPARTMENT.for_patch(r#""Data Science""#),
        ],
        examples: &[
            r#"{"title": "AI: Principles and Applications"}"#,
            r#"{"credits": 4}"#,
        ],
    },
    read: SchemaDoc {
        name: "CourseRead",
        description: "A Course as returned by the API, including server-assigned fields.",
        fields: &[
            id_field(
                "Server-generated persistent Course ID.",
                r#""44444444-4444-4444-8444-444444444444""#,
            ),
            CODE,
            TITLE,
            DESCRIPTION,
            CREDITS,
            DEPARTMENT,
            created_at_field(r#""2025-01-15T10:20:30Z""#),
            updated_at_field(r#""2025-01-16T12:00:00Z""#),
        ],
        examples: &[r#"{
            "id": "44444444-4444-4444-8444-444444444444",
            "code": "COMS W4701",
            "title": "Artificial Intelligence",
            "description": "Introduction to modern AI techniques and applications.",
            "credits": 3,
            "department": "Computer Science",
            "created_at": "2025-01-15T10:20:30Z",
            "updated_at": "2025-01-16T12:00:00Z"
        }"#],
    },
};
