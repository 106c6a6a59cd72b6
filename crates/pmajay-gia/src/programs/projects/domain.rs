use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::programs::beneficiaries::domain::BeneficiaryId;
use crate::programs::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Submitted,
    UnderReview,
    Approved,
    InProgress,
    Rejected,
    Completed,
}

impl ProjectStatus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Submitted,
            Self::UnderReview,
            Self::Approved,
            Self::InProgress,
            Self::Rejected,
            Self::Completed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::InProgress => "in_progress",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Statuses reachable in one step along the documented lifecycle.
    pub const fn successors(self) -> &'static [ProjectStatus] {
        match self {
            Self::Submitted => &[Self::UnderReview, Self::Approved, Self::Rejected],
            Self::UnderReview => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::InProgress],
            Self::InProgress => &[Self::InProgress, Self::Completed],
            Self::Rejected | Self::Completed => &[],
        }
    }

    /// Whether moving to `next` follows the documented lifecycle. Keeping the
    /// current status is always allowed.
    pub fn follows_lifecycle(self, next: ProjectStatus) -> bool {
        self == next || self.successors().contains(&next)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == raw.trim())
            .ok_or_else(|| ValidationError::InvalidStatus(raw.to_string()))
    }
}

/// Funding request as submitted from the beneficiary portal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSubmission {
    #[serde(default)]
    pub beneficiary_id: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub requested_amount: Option<f64>,
}

impl ProjectSubmission {
    /// Checks the submitted fields and returns the requested amount.
    pub fn validate(&self) -> Result<f64, ValidationError> {
        for (value, field) in [
            (&self.beneficiary_id, "beneficiary_id"),
            (&self.project_type, "project_type"),
            (&self.title, "title"),
            (&self.category, "category"),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        let amount = self
            .requested_amount
            .ok_or(ValidationError::MissingField("requested_amount"))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidRequestedAmount);
        }
        Ok(amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub beneficiary_id: BeneficiaryId,
    pub project_type: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub requested_amount: f64,
    pub approved_amount: f64,
    pub status: ProjectStatus,
    /// Opaque ranking assigned at submission, in `[0, 100)`.
    pub priority_score: f64,
    pub submission_date: DateTime<Utc>,
    pub approval_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub completion_percentage: u8,
    pub remarks: Option<String>,
}

/// Partial update accepted by the lifecycle manager. Absent fields are left as is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusPatch {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub approved_amount: Option<f64>,
    #[serde(default)]
    pub completion_percentage: Option<i64>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl StatusPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status.label().to_string()),
            ..Self::default()
        }
    }

    pub fn approve(amount: f64) -> Self {
        Self {
            status: Some(ProjectStatus::Approved.label().to_string()),
            approved_amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn progress(completion_percentage: i64) -> Self {
        Self {
            completion_percentage: Some(completion_percentage),
            ..Self::default()
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

const DEFAULT_LIST_LIMIT: usize = 100;

fn default_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

/// Listing filter; results are ordered by priority then newest submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub beneficiary_id: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            beneficiary_id: None,
            status: None,
            category: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        let beneficiary_matches = self
            .beneficiary_id
            .as_deref()
            .map_or(true, |id| project.beneficiary_id.0 == id);
        let status_matches = self.status.map_or(true, |status| project.status == status);
        let category_matches = self
            .category
            .as_deref()
            .map_or(true, |category| project.category == category);
        beneficiary_matches && status_matches && category_matches
    }
}

/// Project joined with the owning beneficiary's name and location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectListing {
    #[serde(flatten)]
    pub project: Project,
    pub beneficiary_name: String,
    pub state: String,
    pub district: String,
}
