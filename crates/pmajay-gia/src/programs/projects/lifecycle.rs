//! Project status state machine.
//!
//! The documented lifecycle is
//! `submitted -> {under_review, approved, rejected}`, `under_review -> {approved, rejected}`,
//! `approved -> in_progress`, `in_progress -> {in_progress, completed}`, with `completed`
//! and `rejected` terminal. Under [`TransitionPolicy::Permissive`] any recognized status
//! is accepted and jumps off that graph are only logged; [`TransitionPolicy::Strict`]
//! rejects them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use super::domain::{Project, ProjectStatus, StatusPatch};
use crate::programs::audit::domain::{AuditAction, AuditActor, AuditEntityType, AuditEvent};
use crate::programs::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" => Some(Self::Permissive),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }
}

/// Stateless evaluator applying status patches under a transition policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleManager {
    policy: TransitionPolicy,
}

impl LifecycleManager {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Applies `patch` to `project` and returns the new state with its audit event.
    ///
    /// On error the caller's record is untouched and no event is produced.
    pub fn apply(
        &self,
        project: &Project,
        patch: &StatusPatch,
        now: DateTime<Utc>,
    ) -> Result<(Project, AuditEvent), ValidationError> {
        let requested_status = patch
            .status
            .as_deref()
            .map(str::parse::<ProjectStatus>)
            .transpose()?;

        if let Some(amount) = patch.approved_amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ValidationError::InvalidApprovedAmount);
            }
        }

        let completion = patch
            .completion_percentage
            .map(|value| {
                u8::try_from(value)
                    .ok()
                    .filter(|pct| *pct <= 100)
                    .ok_or(ValidationError::CompletionOutOfRange(value))
            })
            .transpose()?;

        let mut status = requested_status.unwrap_or(project.status);
        if let Some(pct) = completion {
            if pct == 100 {
                status = ProjectStatus::Completed;
            } else if requested_status.is_none()
                && matches!(
                    project.status,
                    ProjectStatus::Approved | ProjectStatus::InProgress
                )
            {
                status = ProjectStatus::InProgress;
            }
        }

        let completion_percentage = completion.unwrap_or(project.completion_percentage);
        if completion_percentage == 100 {
            status = ProjectStatus::Completed;
        }

        self.check_transition(project, status, patch)?;

        let mut next = project.clone();
        next.status = status;
        next.completion_percentage = completion_percentage;

        if let Some(amount) = patch.approved_amount {
            next.approved_amount = amount;
            next.approval_date = Some(now);
        }

        if let Some(remarks) = patch
            .remarks
            .as_deref()
            .map(str::trim)
            .filter(|remarks| !remarks.is_empty())
        {
            next.remarks = Some(remarks.to_string());
        }

        if completion == Some(100) {
            next.completion_date = Some(now);
        }

        let event = AuditEvent::new(
            AuditEntityType::Project,
            next.id.0.clone(),
            AuditAction::StatusUpdated,
            AuditActor::Admin,
            now,
            Value::Object(changed_fields(project, &next)),
        );

        Ok((next, event))
    }

    fn check_transition(
        &self,
        project: &Project,
        next: ProjectStatus,
        patch: &StatusPatch,
    ) -> Result<(), ValidationError> {
        let on_graph = project.status.follows_lifecycle(next);

        match self.policy {
            TransitionPolicy::Permissive => {
                if !on_graph {
                    warn!(
                        project_id = %project.id,
                        from = project.status.label(),
                        to = next.label(),
                        "status change outside the documented lifecycle"
                    );
                }
                Ok(())
            }
            TransitionPolicy::Strict => {
                if !on_graph {
                    return Err(ValidationError::IllegalTransition {
                        from: project.status.label(),
                        to: next.label(),
                    });
                }
                if patch.approved_amount.is_some()
                    && !matches!(next, ProjectStatus::Approved | ProjectStatus::InProgress)
                {
                    return Err(ValidationError::AmountWithoutApproval(next.label()));
                }
                Ok(())
            }
        }
    }
}

/// Applies a status patch under the permissive policy.
pub fn apply_status_update(
    project: &Project,
    patch: &StatusPatch,
    now: DateTime<Utc>,
) -> Result<(Project, AuditEvent), ValidationError> {
    LifecycleManager::default().apply(project, patch, now)
}

fn changed_fields(before: &Project, after: &Project) -> Map<String, Value> {
    let mut changes = Map::new();

    if before.status != after.status {
        changes.insert("status".to_string(), json!(after.status.label()));
    }
    if before.approved_amount != after.approved_amount {
        changes.insert("approved_amount".to_string(), json!(after.approved_amount));
    }
    if before.approval_date != after.approval_date {
        changes.insert("approval_date".to_string(), json!(after.approval_date));
    }
    if before.completion_percentage != after.completion_percentage {
        changes.insert(
            "completion_percentage".to_string(),
            json!(after.completion_percentage),
        );
    }
    if before.completion_date != after.completion_date {
        changes.insert("completion_date".to_string(), json!(after.completion_date));
    }
    if before.remarks != after.remarks {
        changes.insert("remarks".to_string(), json!(after.remarks));
    }

    changes
}
