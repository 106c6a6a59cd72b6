//! Skills catalog, training programs, and enrollment.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    CompletionStatus, DemandLevel, Enrollment, EnrollmentId, EnrollmentRequest, EnrollmentStatus,
    ProgramFilter, ProgramId, ProgramStatus, Skill, TrainingProgram,
};
pub use repository::{SeatReservation, TrainingRepository};
pub use router::training_router;
pub use service::TrainingService;
