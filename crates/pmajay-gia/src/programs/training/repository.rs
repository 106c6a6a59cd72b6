use super::domain::{Enrollment, EnrollmentId, ProgramId, Skill, TrainingProgram};
use crate::programs::error::RepositoryError;

/// Outcome of asking for a seat in a training program.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatReservation {
    /// `enrolled_count` was incremented; carries the updated program.
    Reserved(TrainingProgram),
    Closed(TrainingProgram),
    Full(TrainingProgram),
}

/// Storage for the skills catalog, training programs, and enrollments.
///
/// Skill names are unique; `insert_skill` returns [`RepositoryError::Conflict`]
/// for a repeated name. `reserve_seat` checks status and capacity and
/// increments `enrolled_count` as one step.
pub trait TrainingRepository: Send + Sync {
    fn skills(&self) -> Result<Vec<Skill>, RepositoryError>;
    fn insert_skill(&self, skill: Skill) -> Result<Skill, RepositoryError>;
    fn programs(&self) -> Result<Vec<TrainingProgram>, RepositoryError>;
    fn fetch_program(&self, id: &ProgramId) -> Result<Option<TrainingProgram>, RepositoryError>;
    fn insert_program(&self, program: TrainingProgram) -> Result<TrainingProgram, RepositoryError>;
    fn update_program(&self, program: TrainingProgram) -> Result<(), RepositoryError>;
    fn reserve_seat(&self, id: &ProgramId) -> Result<SeatReservation, RepositoryError>;
    fn release_seat(&self, id: &ProgramId) -> Result<(), RepositoryError>;
    fn insert_enrollment(&self, enrollment: Enrollment) -> Result<Enrollment, RepositoryError>;
    fn remove_enrollment(&self, id: &EnrollmentId) -> Result<(), RepositoryError>;
    fn enrollments(&self) -> Result<Vec<Enrollment>, RepositoryError>;
}
