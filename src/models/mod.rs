//! In-memory course, assessment and user model.
//!
//! Everything is built from the backend's JSON and lives only as long as the
//! client session.

mod assessment;
mod catalog;
mod course;
mod module;
mod user;
mod wire;

pub use assessment::{Assessment, Question, MAX_OPTIONS, MIN_OPTIONS};
pub use catalog::CourseCatalog;
pub use course::{Course, CourseComponent};
pub use module::{Module, ModuleKind};
pub use user::{InstructorData, LearnerData, Session, User};

use thiserror::Error;

/// A learner action that the current progress state does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("the assessment has already been completed")]
    AssessmentCompleted,
    #[error("option {choice} does not exist (the question has {available} options)")]
    OptionOutOfRange { choice: usize, available: usize },
    #[error("the course has already been completed")]
    CourseCompleted,
    #[error("the current assessment still has unanswered questions")]
    AssessmentIncomplete,
}
