use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Beneficiary, BeneficiaryFilter, BeneficiaryId, BeneficiaryRegistration, VerificationPatch,
};
use super::intake::beneficiary_from_registration;
use super::repository::BeneficiaryRepository;
use super::verification::apply_verification_update;
use crate::programs::audit::domain::{AuditAction, AuditActor, AuditEntityType, AuditEvent};
use crate::programs::audit::AuditLog;
use crate::programs::error::{ProgramError, RepositoryError, ValidationError};

/// Registration, lookup, and verification of beneficiaries.
pub struct BeneficiaryService<R, L> {
    repository: Arc<R>,
    audit: Arc<L>,
}

impl<R, L> BeneficiaryService<R, L>
where
    R: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<L>) -> Self {
        Self { repository, audit }
    }

    /// Register a beneficiary, computing its eligibility score from the submitted values.
    pub fn register(
        &self,
        registration: BeneficiaryRegistration,
    ) -> Result<Beneficiary, ProgramError> {
        let now = Utc::now();
        let beneficiary = beneficiary_from_registration(registration, BeneficiaryId::generate(), now)?;

        let event = AuditEvent::new(
            AuditEntityType::Beneficiary,
            beneficiary.id.0.clone(),
            AuditAction::Created,
            AuditActor::System,
            now,
            serde_json::to_value(&beneficiary)?,
        );

        let stored = self
            .repository
            .insert(beneficiary)
            .map_err(|err| match err {
                RepositoryError::Conflict => ProgramError::from(ValidationError::DuplicateAadhar),
                other => ProgramError::from(other),
            })?;

        if let Err(err) = self.audit.record(event) {
            if let Err(undo) = self.repository.remove(&stored.id) {
                warn!(beneficiary_id = %stored.id, error = %undo, "failed to withdraw unaudited registration");
            }
            return Err(err.into());
        }

        info!(
            beneficiary_id = %stored.id,
            eligibility_score = stored.eligibility_score,
            state = %stored.state,
            "beneficiary registered"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &BeneficiaryId) -> Result<Beneficiary, ProgramError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ProgramError::not_found("beneficiary", id.0.clone()))
    }

    pub fn list(&self, filter: &BeneficiaryFilter) -> Result<Vec<Beneficiary>, ProgramError> {
        let all = self.repository.list()?;
        Ok(filter.apply(all))
    }

    /// Record an administrative verification decision.
    pub fn verify(
        &self,
        id: &BeneficiaryId,
        patch: &VerificationPatch,
    ) -> Result<Beneficiary, ProgramError> {
        let current = self.get(id)?;
        let (next, event) = apply_verification_update(&current, patch, Utc::now())?;

        self.repository.update(next.clone())?;
        if let Err(err) = self.audit.record(event) {
            if let Err(undo) = self.repository.update(current) {
                warn!(beneficiary_id = %next.id, error = %undo, "failed to restore unaudited verification");
            }
            return Err(err.into());
        }

        info!(
            beneficiary_id = %next.id,
            status = next.verification_status.label(),
            "verification status updated"
        );
        Ok(next)
    }
}
