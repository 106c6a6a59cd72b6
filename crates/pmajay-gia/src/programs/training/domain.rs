use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::programs::beneficiaries::domain::BeneficiaryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub demand_level: DemandLevel,
    pub avg_income_potential: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub String);

impl ProgramId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    #[default]
    Open,
    Closed,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub id: ProgramId,
    pub name: String,
    pub skill_category: String,
    pub duration_days: u32,
    pub provider: String,
    pub location: String,
    pub capacity: u32,
    pub enrolled_count: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProgramStatus,
}

impl TrainingProgram {
    pub fn has_capacity(&self) -> bool {
        self.enrolled_count < self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Withdrawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub beneficiary_id: BeneficiaryId,
    pub training_program_id: ProgramId,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub completion_status: CompletionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    #[serde(default)]
    pub beneficiary_id: String,
    #[serde(default)]
    pub training_program_id: String,
}

/// Listing filter; programs are ordered by start date, latest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProgramFilter {
    #[serde(default)]
    pub status: Option<ProgramStatus>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProgramFilter {
    pub fn matches(&self, program: &TrainingProgram) -> bool {
        let status_matches = self.status.map_or(true, |status| program.status == status);
        let category_matches = self
            .category
            .as_deref()
            .map_or(true, |category| program.skill_category == category);
        status_matches && category_matches
    }
}
