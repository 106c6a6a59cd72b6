use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::catalog::{default_skills, default_training_programs};
use super::domain::{
    CompletionStatus, Enrollment, EnrollmentId, EnrollmentRequest, EnrollmentStatus, ProgramFilter,
    ProgramId, Skill, TrainingProgram,
};
use super::repository::{SeatReservation, TrainingRepository};
use crate::programs::audit::domain::{AuditAction, AuditActor, AuditEntityType, AuditEvent};
use crate::programs::audit::AuditLog;
use crate::programs::beneficiaries::domain::BeneficiaryId;
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::error::{ProgramError, RepositoryError, ValidationError};

/// Skills catalog, training programs, and beneficiary enrollment.
pub struct TrainingService<T, B, L> {
    training: Arc<T>,
    beneficiaries: Arc<B>,
    audit: Arc<L>,
}

impl<T, B, L> TrainingService<T, B, L>
where
    T: TrainingRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(training: Arc<T>, beneficiaries: Arc<B>, audit: Arc<L>) -> Self {
        Self {
            training,
            beneficiaries,
            audit,
        }
    }

    /// Loads the default skills and programs unless the catalog already has skills.
    /// Returns whether anything was written.
    pub fn seed_catalog(&self) -> Result<bool, ProgramError> {
        if !self.training.skills()?.is_empty() {
            debug!("training catalog already seeded");
            return Ok(false);
        }

        for skill in default_skills() {
            self.training.insert_skill(skill)?;
        }
        for program in default_training_programs() {
            self.training.insert_program(program)?;
        }

        info!("training catalog seeded");
        Ok(true)
    }

    /// Skills ordered by demand (high first), then by income potential.
    pub fn skills(&self) -> Result<Vec<Skill>, ProgramError> {
        let mut skills = self.training.skills()?;
        skills.sort_by(|a, b| {
            b.demand_level.cmp(&a.demand_level).then_with(|| {
                match (a.avg_income_potential, b.avg_income_potential) {
                    (Some(a), Some(b)) => b.total_cmp(&a),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            })
        });
        Ok(skills)
    }

    pub fn programs(&self, filter: &ProgramFilter) -> Result<Vec<TrainingProgram>, ProgramError> {
        let mut programs: Vec<TrainingProgram> = self
            .training
            .programs()?
            .into_iter()
            .filter(|program| filter.matches(program))
            .collect();
        programs.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(programs)
    }

    /// Enroll a beneficiary in an open program that still has seats.
    pub fn enroll(&self, request: EnrollmentRequest) -> Result<Enrollment, ProgramError> {
        let beneficiary_id = BeneficiaryId(request.beneficiary_id.trim().to_string());
        let program_id = ProgramId(request.training_program_id.trim().to_string());
        if beneficiary_id.0.is_empty() {
            return Err(ValidationError::MissingField("beneficiary_id").into());
        }
        if program_id.0.is_empty() {
            return Err(ValidationError::MissingField("training_program_id").into());
        }

        if self.beneficiaries.fetch(&beneficiary_id)?.is_none() {
            return Err(ProgramError::not_found("beneficiary", beneficiary_id.0));
        }
        let program = match self.training.reserve_seat(&program_id) {
            Ok(SeatReservation::Reserved(program)) => program,
            Ok(SeatReservation::Closed(program)) => {
                return Err(ValidationError::ProgramClosed(program.name).into())
            }
            Ok(SeatReservation::Full(program)) => {
                return Err(ValidationError::ProgramFull(program.name).into())
            }
            Err(RepositoryError::NotFound) => {
                return Err(ProgramError::not_found("training program", program_id.0))
            }
            Err(err) => return Err(err.into()),
        };

        let now = Utc::now();
        let enrollment = Enrollment {
            id: EnrollmentId(Uuid::new_v4().to_string()),
            beneficiary_id,
            training_program_id: program_id,
            enrollment_date: now,
            status: EnrollmentStatus::Enrolled,
            completion_status: CompletionStatus::InProgress,
        };

        if let Err(err) = self.record_enrollment(&enrollment) {
            self.release(&program.id);
            return Err(err);
        }

        info!(
            enrollment_id = %enrollment.id.0,
            beneficiary_id = %enrollment.beneficiary_id,
            program_id = %enrollment.training_program_id,
            "beneficiary enrolled"
        );
        Ok(enrollment)
    }

    fn record_enrollment(&self, enrollment: &Enrollment) -> Result<(), ProgramError> {
        let event = AuditEvent::new(
            AuditEntityType::Enrollment,
            enrollment.id.0.clone(),
            AuditAction::Created,
            AuditActor::System,
            enrollment.enrollment_date,
            serde_json::to_value(enrollment)?,
        );

        self.training.insert_enrollment(enrollment.clone())?;
        if let Err(err) = self.audit.record(event) {
            if let Err(undo) = self.training.remove_enrollment(&enrollment.id) {
                warn!(enrollment_id = %enrollment.id.0, error = %undo, "failed to withdraw unaudited enrollment");
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn release(&self, program_id: &ProgramId) {
        if let Err(err) = self.training.release_seat(program_id) {
            warn!(program_id = %program_id, error = %err, "failed to release reserved seat");
        }
    }
}
