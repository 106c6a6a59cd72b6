//! Process-local stores backing the API server, the demo, and the tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::audit::domain::{AuditEvent, AuditQuery, AuditRecord};
use super::audit::{AuditError, AuditLog};
use super::beneficiaries::domain::{Beneficiary, BeneficiaryId};
use super::beneficiaries::repository::BeneficiaryRepository;
use super::error::RepositoryError;
use super::projects::domain::{Project, ProjectId};
use super::projects::repository::ProjectRepository;
use super::training::domain::{
    Enrollment, EnrollmentId, ProgramId, ProgramStatus, Skill, TrainingProgram,
};
use super::training::repository::{SeatReservation, TrainingRepository};

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} mutex poisoned")))
}

#[derive(Default, Clone)]
pub struct InMemoryBeneficiaryRepository {
    records: Arc<Mutex<HashMap<BeneficiaryId, Beneficiary>>>,
}

impl BeneficiaryRepository for InMemoryBeneficiaryRepository {
    fn insert(&self, record: Beneficiary) -> Result<Beneficiary, RepositoryError> {
        let mut guard = lock(&self.records, "beneficiary")?;
        let duplicate = guard.contains_key(&record.id)
            || guard
                .values()
                .any(|existing| existing.aadhar_number == record.aadhar_number);
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: Beneficiary) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "beneficiary")?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn remove(&self, id: &BeneficiaryId) -> Result<(), RepositoryError> {
        lock(&self.records, "beneficiary")?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &BeneficiaryId) -> Result<Option<Beneficiary>, RepositoryError> {
        Ok(lock(&self.records, "beneficiary")?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Beneficiary>, RepositoryError> {
        Ok(lock(&self.records, "beneficiary")?.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryProjectRepository {
    records: Arc<Mutex<HashMap<ProjectId, Project>>>,
}

impl ProjectRepository for InMemoryProjectRepository {
    fn insert(&self, record: Project) -> Result<Project, RepositoryError> {
        let mut guard = lock(&self.records, "project")?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: Project) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "project")?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn remove(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        lock(&self.records, "project")?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(lock(&self.records, "project")?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(lock(&self.records, "project")?.values().cloned().collect())
    }
}

#[derive(Default)]
struct TrainingTables {
    skills: Vec<Skill>,
    programs: HashMap<ProgramId, TrainingProgram>,
    enrollments: Vec<Enrollment>,
}

#[derive(Default, Clone)]
pub struct InMemoryTrainingRepository {
    tables: Arc<Mutex<TrainingTables>>,
}

impl TrainingRepository for InMemoryTrainingRepository {
    fn skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        Ok(lock(&self.tables, "training")?.skills.clone())
    }

    fn insert_skill(&self, skill: Skill) -> Result<Skill, RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        if guard.skills.iter().any(|existing| existing.name == skill.name) {
            return Err(RepositoryError::Conflict);
        }
        guard.skills.push(skill.clone());
        Ok(skill)
    }

    fn programs(&self) -> Result<Vec<TrainingProgram>, RepositoryError> {
        Ok(lock(&self.tables, "training")?
            .programs
            .values()
            .cloned()
            .collect())
    }

    fn fetch_program(&self, id: &ProgramId) -> Result<Option<TrainingProgram>, RepositoryError> {
        Ok(lock(&self.tables, "training")?.programs.get(id).cloned())
    }

    fn insert_program(&self, program: TrainingProgram) -> Result<TrainingProgram, RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        if guard.programs.contains_key(&program.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.programs.insert(program.id.clone(), program.clone());
        Ok(program)
    }

    fn update_program(&self, program: TrainingProgram) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        if guard.programs.contains_key(&program.id) {
            guard.programs.insert(program.id.clone(), program);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn reserve_seat(&self, id: &ProgramId) -> Result<SeatReservation, RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        let program = guard
            .programs
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        if program.status != ProgramStatus::Open {
            return Ok(SeatReservation::Closed(program.clone()));
        }
        if !program.has_capacity() {
            return Ok(SeatReservation::Full(program.clone()));
        }
        program.enrolled_count += 1;
        Ok(SeatReservation::Reserved(program.clone()))
    }

    fn release_seat(&self, id: &ProgramId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        let program = guard
            .programs
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        program.enrolled_count = program.enrolled_count.saturating_sub(1);
        Ok(())
    }

    fn insert_enrollment(&self, enrollment: Enrollment) -> Result<Enrollment, RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        if guard.enrollments.iter().any(|existing| existing.id == enrollment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    fn remove_enrollment(&self, id: &EnrollmentId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables, "training")?;
        let before = guard.enrollments.len();
        guard.enrollments.retain(|existing| &existing.id != id);
        if guard.enrollments.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn enrollments(&self) -> Result<Vec<Enrollment>, RepositoryError> {
        Ok(lock(&self.tables, "training")?.enrollments.clone())
    }
}

/// Append-only audit trail kept in insertion order.
#[derive(Default, Clone)]
pub struct InMemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl InMemoryAuditLog {
    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for InMemoryAuditLog {
    fn record(&self, event: AuditEvent) -> Result<AuditRecord, AuditError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?;
        let record = AuditRecord::assign(event);
        guard.push(record.clone());
        Ok(record)
    }

    fn query(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?;
        Ok(query.select(guard.iter().cloned()))
    }
}
