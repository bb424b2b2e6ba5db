//! Movie schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Entity, FieldChange, Patch};
use crate::error::ValidationError;
use crate::record::Record;
use crate::schema::{
    created_at_field, id_field, updated_at_field, FieldDoc, FieldKind, SchemaDoc, Schemas,
};
use crate::validation::PayloadReader;

/// Base field set of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieBase {
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Creation payload for a movie.
pub type MovieCreate = MovieBase;

/// A movie as returned to clients.
pub type MovieRead = Record<MovieBase>;

/// Partial update for a movie. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl Entity for MovieBase {
    const NAME: &'static str = "Movie";
    const COLLECTION: &'static str = "movies";

    type Update = MovieUpdate;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        let movie = Self {
            title: r.required("title"),
            genre: r.required("genre"),
            release_year: r.required("release_year"),
            description: r.optional("description"),
        };
        r.finish(movie)
    }

    fn schemas() -> &'static Schemas {
        &MOVIE_SCHEMAS
    }
}

impl Patch for MovieUpdate {
    type Target = MovieBase;

    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut r = PayloadReader::new(MovieBase::NAME, payload);
        let update = Self {
            title: r.patch("title"),
            genre: r.patch("genre"),
            release_year: r.patch("release_year"),
            description: r.patch_nullable("description"),
        };
        r.finish(update)
    }

    fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(FieldChange::new("title", title.as_str()));
        }
        if let Some(genre) = &self.genre {
            changes.push(FieldChange::new("genre", genre.as_str()));
        }
        if let Some(year) = self.release_year {
            changes.push(FieldChange::new("release_year", year));
        }
        if let Some(description) = &self.description {
            changes.push(FieldChange::new("description", description.as_deref()));
        }
        changes
    }

    fn apply_to(&self, movie: &mut MovieBase) {
        if let Some(title) = &self.title {
            movie.title.clone_from(title);
        }
        if let Some(genre) = &self.genre {
            movie.genre.clone_from(genre);
        }
        if let Some(year) = self.release_year {
            movie.release_year = year;
        }
        if let Some(description) = &self.description {
            movie.description.clone_from(description);
        }
    }
}

// ---------------------------------------------------------------------------
// Documentation
// ---------------------------------------------------------------------------

const TITLE: FieldDoc =
    FieldDoc::required("title", FieldKind::String, "Movie title.", r#""Inception""#);
const GENRE: FieldDoc = FieldDoc::required(
    "genre",
    FieldKind::String,
    "Movie genre.",
    r#""Science Fiction""#,
);
const RELEASE_YEAR: FieldDoc = FieldDoc::required(
    "release_year",
    FieldKind::Integer,
    "Year the movie was released.",
    "2010",
);
const DESCRIPTION: FieldDoc = FieldDoc::optional(
    "description",
    FieldKind::String,
    "Optional synopsis or description of the movie.",
    r#""PLOT OF INCEPTION HERE.""#,
);

const BASE_FIELDS: &[FieldDoc] = &[TITLE, GENRE, RELEASE_YEAR, DESCRIPTION];

pub static MOVIE_SCHEMAS: Schemas = Schemas {
    base: SchemaDoc {
        name: "MovieBase",
        description: "Fields shared by movie payloads and representations.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "title": "Inception",
            "genre": "Science Fiction",
            "release_year": 2010,
            "description": "PLOT OF INCEPTION HERE."
        }"#],
    },
    create: SchemaDoc {
        name: "MovieCreate",
        description: "Creation payload for a Movie.",
        fields: BASE_FIELDS,
        examples: &[r#"{
            "title": "Blade Runner 2049",
            "genre": "Science Fiction",
            "release_year": 2017,
            "description": "PLOT OF BLADE RUNNER HERE."
        }"#],
    },
    update: SchemaDoc {
        name: "MovieUpdate",
        description: "Partial update for a Movie; supply only fields to change.",
        fields: &[
            TITLE.for_patch(r#""Inception (Director's Cut)""#),
            GENRE.for_patch(r#""Thriller""#),
            RELEASE_YEAR.for_patch("2011"),
            DESCRIPTION.for_patch(r#""Extended edition with new scenes.""#),
        ],
        examples: &[
            r#"{"title": "Inception (Director's Cut)"}"#,
            r#"{"release_year": 2011}"#,
            r#"{"description": "Extended edition with new scenes."}"#,
        ],
    },
    read: SchemaDoc {
        name: "MovieRead",
        description: "A Movie as returned by the API, including server-assigned fields.",
        fields: &[
            id_field(
                "Server-generated persistent Movie ID.",
                r#""aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa""#,
            ),
            TITLE,
            GENRE,
            RELEASE_YEAR,
            DESCRIPTION,
            created_at_field(r#""2025-02-01T10:20:30Z""#),
            updated_at_field(r#""2025-02-02T12:00:00Z""#),
        ],
        examples: &[r#"{
            "id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
            "title": "Inception",
            "genre": "Science Fiction",
            "release_year": 2010,
            "description": "PLOT OF INCEPTION HERE.",
            "created_at": "2025-02-01T10:20:30Z",
            "updated_at": "2025-02-02T12:00:00Z"
        }"#],
    },
};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ViolationKind;

    fn inception() -> MovieBase {
        MovieBase {
            title: "Inception".to_string(),
            genre: "Science Fiction".to_string(),
            release_year: 2010,
            description: None,
        }
    }

    #[test]
    fn create_accepts_minimal_payload() {
        let movie = MovieBase::from_payload(&json!({
            "title": "Inception",
            "genre": "Science Fiction",
            "release_year": 2010
        }))
        .unwrap();
        assert_eq!(movie, inception());
    }

    #[test]
    fn create_without_title_fails() {
        let err = MovieBase::from_payload(&json!({
            "genre": "Science Fiction",
            "release_year": 2010
        }))
        .unwrap_err();
        assert_eq!(err.entity, "Movie");
        assert!(err.has_violation("title", ViolationKind::Required));
    }

    #[test]
    fn create_with_non_integer_year_fails() {
        for year in [json!("2010"), json!(2010.5), json!(null)] {
            let err = MovieBase::from_payload(&json!({
                "title": "Inception",
                "genre": "Science Fiction",
                "release_year": year
            }))
            .unwrap_err();
            assert!(err.has_violation("release_year", ViolationKind::Type));
        }
    }

    #[test]
    fn create_ignores_server_assigned_fields() {
        let movie = MovieBase::from_payload(&json!({
            "id": "not even a uuid",
            "title": "Inception",
            "genre": "Science Fiction",
            "release_year": 2010,
            "created_at": 12
        }))
        .unwrap();
        assert_eq!(movie, inception());
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let update = MovieUpdate::from_payload(&json!({"release_year": 2011})).unwrap();
        assert_eq!(update.changes(), vec![FieldChange::new("release_year", 2011)]);

        let mut movie = inception();
        update.apply_to(&mut movie);
        assert_eq!(movie.release_year, 2011);
        assert_eq!(movie.title, "Inception");
    }

    #[test]
    fn update_null_description_clears_it() {
        let mut movie = inception();
        movie.description = Some("PLOT".to_string());

        let update = MovieUpdate::from_payload(&json!({"description": null})).unwrap();
        assert_eq!(update.description, Some(None));
        assert_eq!(
            update.changes(),
            vec![FieldChange {
                field: "description",
                value: Value::Null
            }]
        );

        update.apply_to(&mut movie);
        assert_eq!(movie.description, None);
    }

    #[test]
    fn update_serializes_sparsely() {
        let update = MovieUpdate {
            genre: Some("Thriller".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"genre": "Thriller"}));
    }

    #[test]
    fn read_serializes_every_field_in_order() {
        let record = MovieRead::new(inception());
        let text = serde_json::to_string(&record).unwrap();
        let id_pos = text.find("\"id\"").unwrap();
        let title_pos = text.find("\"title\"").unwrap();
        let created_pos = text.find("\"created_at\"").unwrap();
        assert!(id_pos < title_pos && title_pos < created_pos);
        assert!(text.contains("\"description\":null"));
    }
}
