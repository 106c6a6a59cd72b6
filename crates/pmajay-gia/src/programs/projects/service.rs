use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Project, ProjectFilter, ProjectId, ProjectListing, ProjectStatus, ProjectSubmission,
    StatusPatch,
};
use super::lifecycle::{LifecycleManager, TransitionPolicy};
use super::priority::{PriorityAssigner, RandomPriority};
use super::repository::ProjectRepository;
use crate::programs::audit::domain::{AuditAction, AuditActor, AuditEntityType, AuditEvent};
use crate::programs::audit::AuditLog;
use crate::programs::beneficiaries::domain::BeneficiaryId;
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::error::ProgramError;

/// Service composing project storage, the lifecycle manager, and the audit log.
pub struct ProjectService<P, B, L> {
    projects: Arc<P>,
    beneficiaries: Arc<B>,
    audit: Arc<L>,
    lifecycle: LifecycleManager,
    priority: Arc<dyn PriorityAssigner>,
}

impl<P, B, L> ProjectService<P, B, L>
where
    P: ProjectRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(
        projects: Arc<P>,
        beneficiaries: Arc<B>,
        audit: Arc<L>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            projects,
            beneficiaries,
            audit,
            lifecycle: LifecycleManager::new(policy),
            priority: Arc::new(RandomPriority),
        }
    }

    pub fn with_priority(mut self, priority: Arc<dyn PriorityAssigner>) -> Self {
        self.priority = priority;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.lifecycle.policy()
    }

    /// Submit a funding request on behalf of an existing beneficiary.
    pub fn submit(&self, submission: ProjectSubmission) -> Result<Project, ProgramError> {
        let requested_amount = submission.validate()?;

        let beneficiary_id = BeneficiaryId(submission.beneficiary_id.trim().to_string());
        if self.beneficiaries.fetch(&beneficiary_id)?.is_none() {
            return Err(ProgramError::not_found("beneficiary", beneficiary_id.0));
        }

        let now = Utc::now();
        let priority_score = self.priority.assign(&submission);
        let ProjectSubmission {
            project_type,
            title,
            description,
            category,
            ..
        } = submission;

        let project = Project {
            id: ProjectId::generate(),
            beneficiary_id,
            project_type: project_type.trim().to_string(),
            title: title.trim().to_string(),
            description: description.filter(|text| !text.trim().is_empty()),
            category: category.trim().to_string(),
            requested_amount,
            approved_amount: 0.0,
            status: ProjectStatus::Submitted,
            priority_score,
            submission_date: now,
            approval_date: None,
            completion_date: None,
            completion_percentage: 0,
            remarks: None,
        };

        let event = AuditEvent::new(
            AuditEntityType::Project,
            project.id.0.clone(),
            AuditAction::Created,
            AuditActor::Beneficiary,
            now,
            serde_json::to_value(&project)?,
        );

        let stored = self.projects.insert(project)?;
        if let Err(err) = self.audit.record(event) {
            if let Err(undo) = self.projects.remove(&stored.id) {
                warn!(project_id = %stored.id, error = %undo, "failed to withdraw unaudited project");
            }
            return Err(err.into());
        }

        info!(
            project_id = %stored.id,
            beneficiary_id = %stored.beneficiary_id,
            requested_amount = stored.requested_amount,
            "project submitted"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &ProjectId) -> Result<Project, ProgramError> {
        self.projects
            .fetch(id)?
            .ok_or_else(|| ProgramError::not_found("project", id.0.clone()))
    }

    /// Projects joined with their beneficiary; projects whose beneficiary is
    /// missing are left out.
    pub fn list(&self, filter: &ProjectFilter) -> Result<Vec<ProjectListing>, ProgramError> {
        let beneficiaries: HashMap<BeneficiaryId, _> = self
            .beneficiaries
            .list()?
            .into_iter()
            .map(|beneficiary| (beneficiary.id.clone(), beneficiary))
            .collect();

        let mut listings: Vec<ProjectListing> = self
            .projects
            .list()?
            .into_iter()
            .filter(|project| filter.matches(project))
            .filter_map(|project| {
                beneficiaries
                    .get(&project.beneficiary_id)
                    .map(|beneficiary| ProjectListing {
                        beneficiary_name: beneficiary.name.clone(),
                        state: beneficiary.state.clone(),
                        district: beneficiary.district.clone(),
                        project,
                    })
            })
            .collect();

        listings.sort_by(|a, b| {
            b.project
                .priority_score
                .total_cmp(&a.project.priority_score)
                .then_with(|| b.project.submission_date.cmp(&a.project.submission_date))
        });
        listings.truncate(filter.limit);
        Ok(listings)
    }

    /// Apply an approval, rejection, or progress update.
    pub fn update_status(
        &self,
        id: &ProjectId,
        patch: &StatusPatch,
    ) -> Result<Project, ProgramError> {
        let current = self.get(id)?;
        let (next, event) = self.lifecycle.apply(&current, patch, Utc::now())?;

        self.projects.update(next.clone())?;
        if let Err(err) = self.audit.record(event) {
            if let Err(undo) = self.projects.update(current) {
                warn!(project_id = %next.id, error = %undo, "failed to restore unaudited project");
            }
            return Err(err.into());
        }

        info!(
            project_id = %next.id,
            from = current.status.label(),
            to = next.status.label(),
            completion = next.completion_percentage,
            "project status updated"
        );
        Ok(next)
    }
}
