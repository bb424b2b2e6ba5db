//! The four entity families.
//!
//! Each submodule contains:
//! - A `Base` struct (also the Create payload) implementing [`crate::Entity`]
//! - An `Update` struct (all `Option` fields) implementing [`crate::Patch`]
//! - A `Read` alias for [`crate::Record`] over the Base struct
//! - Static documentation metadata for all four variants

pub mod course;
pub mod crew_member;
pub mod enrollment;
pub mod movie;

pub use course::{CourseBase, CourseCreate, CourseRead, CourseUpdate, COURSE_SCHEMAS};
pub use crew_member::{
    CrewMemberBase, CrewMemberCreate, CrewMemberRead, CrewMemberUpdate, CREW_MEMBER_SCHEMAS,
};
pub use enrollment::{
    EnrollmentBase, EnrollmentCreate, EnrollmentRead, EnrollmentUpdate, ENROLLMENT_SCHEMAS,
};
pub use movie::{MovieBase, MovieCreate, MovieRead, MovieUpdate, MOVIE_SCHEMAS};

use crate::entity::Entity;
use crate::schema::Schemas;

/// Names and documentation of one entity family, detached from its types.
#[derive(Debug, Clone, Copy)]
pub struct Family {
    pub name: &'static str,
    pub collection: &'static str,
    pub schemas: &'static Schemas,
}

impl Family {
    pub fn of<E: Entity>() -> Self {
        Self {
            name: E::NAME,
            collection: E::COLLECTION,
            schemas: E::schemas(),
        }
    }
}

/// Every family, in a stable order.
pub fn families() -> [Family; 4] {
    [
        Family::of::<MovieBase>(),
        Family::of::<CrewMemberBase>(),
        Family::of::<CourseBase>(),
        Family::of::<EnrollmentBase>(),
    ]
}
