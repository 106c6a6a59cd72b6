use chrono::NaiveDate;
use serde::Serialize;

use crate::programs::beneficiaries::{CasteCategory, IncomeBracket};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCount {
    pub state: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasteCount {
    pub caste_category: CasteCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationCount {
    pub education_level: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeBracketCount {
    pub income_bracket: IncomeBracket,
    pub income_bracket_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_beneficiaries: usize,
    pub verified_beneficiaries: usize,
    /// Rounded to two decimals; zero when nobody is registered.
    pub avg_eligibility_score: f64,
    pub total_projects: usize,
    pub total_funding_approved: f64,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub top_states: Vec<StateCount>,
    pub projects_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeneficiaryDistribution {
    pub by_state: Vec<StateCount>,
    pub by_caste: Vec<CasteCount>,
    pub by_education: Vec<EducationCount>,
    pub by_income: Vec<IncomeBracketCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTrendPoint {
    pub date: NaiveDate,
    pub count: usize,
}
