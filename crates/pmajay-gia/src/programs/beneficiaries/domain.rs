use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::eligibility::EligibilityProfile;

/// Identifier wrapper for registered beneficiaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeneficiaryId(pub String);

impl BeneficiaryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for BeneficiaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Social category recorded at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CasteCategory {
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "OBC")]
    Obc,
    General,
}

impl CasteCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Obc => "OBC",
            Self::General => "General",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "SC" => Some(Self::Sc),
            "ST" => Some(Self::St),
            "OBC" => Some(Self::Obc),
            "General" => Some(Self::General),
            _ => None,
        }
    }
}

/// Highest education attained. Values outside the known ladder are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationLevel {
    NoFormalEducation,
    Primary,
    Secondary,
    HigherSecondary,
    Graduate,
    PostGraduate,
    Unrecognized(String),
}

impl EducationLevel {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "No formal education" => Self::NoFormalEducation,
            "Primary" => Self::Primary,
            "Secondary" => Self::Secondary,
            "Higher Secondary" => Self::HigherSecondary,
            "Graduate" => Self::Graduate,
            "Post Graduate" => Self::PostGraduate,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::NoFormalEducation => "No formal education",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::HigherSecondary => "Higher Secondary",
            Self::Graduate => "Graduate",
            Self::PostGraduate => "Post Graduate",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl Default for EducationLevel {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<String> for EducationLevel {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EducationLevel> for String {
    fn from(value: EducationLevel) -> Self {
        match value {
            EducationLevel::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Registration form as submitted by a field officer or the beneficiary portal.
///
/// Required fields are optional here so that a missing value surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeneficiaryRegistration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub caste_category: Option<CasteCategory>,
    #[serde(default)]
    pub aadhar_number: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub education_level: EducationLevel,
    #[serde(default)]
    pub annual_income: Option<f64>,
    #[serde(default)]
    pub family_size: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub bank_account: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
}

/// Stored beneficiary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: BeneficiaryId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub state: String,
    pub district: String,
    pub caste_category: CasteCategory,
    pub aadhar_number: String,
    pub phone: String,
    pub email: Option<String>,
    pub education_level: EducationLevel,
    pub annual_income: f64,
    pub family_size: u32,
    pub occupation: Option<String>,
    pub skills: Option<String>,
    pub bank_account: Option<String>,
    pub ifsc_code: Option<String>,
    pub verification_status: VerificationStatus,
    /// Fixed at registration; edits to the scored attributes do not refresh it.
    pub eligibility_score: u8,
    pub registration_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Beneficiary {
    pub fn eligibility_profile(&self) -> EligibilityProfile {
        EligibilityProfile {
            annual_income: self.annual_income,
            education_level: self.education_level.clone(),
            family_size: self.family_size,
            caste_category: self.caste_category,
        }
    }
}

/// Administrative verification decision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationPatch {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

const DEFAULT_LIST_LIMIT: usize = 100;

fn default_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

/// Listing filter; results are ordered by eligibility score then newest registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BeneficiaryFilter {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub status: Option<VerificationStatus>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for BeneficiaryFilter {
    fn default() -> Self {
        Self {
            state: None,
            status: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl BeneficiaryFilter {
    pub fn matches(&self, beneficiary: &Beneficiary) -> bool {
        let state_matches = self
            .state
            .as_deref()
            .map_or(true, |state| beneficiary.state == state);
        let status_matches = self
            .status
            .map_or(true, |status| beneficiary.verification_status == status);
        state_matches && status_matches
    }

    pub fn apply(&self, beneficiaries: Vec<Beneficiary>) -> Vec<Beneficiary> {
        let mut selected: Vec<Beneficiary> = beneficiaries
            .into_iter()
            .filter(|beneficiary| self.matches(beneficiary))
            .collect();
        selected.sort_by(|a, b| {
            b.eligibility_score
                .cmp(&a.eligibility_score)
                .then_with(|| b.registration_date.cmp(&a.registration_date))
        });
        selected
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}
