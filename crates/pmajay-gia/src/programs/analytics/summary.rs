use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::views::{
    BeneficiaryDistribution, CasteCount, CategoryCount, DashboardStats, EducationCount,
    IncomeBracketCount, ProjectTrendPoint, StateCount,
};
use crate::programs::beneficiaries::{Beneficiary, IncomeBracket, VerificationStatus};
use crate::programs::projects::{Project, ProjectStatus};

pub const TOP_STATES: usize = 5;
pub const TREND_DAYS: usize = 30;

/// Counts keyed by `key`, largest first; ties fall back to key order.
fn ranked<'a, T, K>(items: &'a [T], key: impl Fn(&'a T) -> K) -> Vec<(K, usize)>
where
    K: Ord + Clone,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_default() += 1;
    }
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

fn state_counts(beneficiaries: &[Beneficiary]) -> Vec<StateCount> {
    ranked(beneficiaries, |b| b.state.clone())
        .into_iter()
        .map(|(state, count)| StateCount { state, count })
        .collect()
}

pub fn dashboard_stats(beneficiaries: &[Beneficiary], projects: &[Project]) -> DashboardStats {
    let total_beneficiaries = beneficiaries.len();
    let verified_beneficiaries = beneficiaries
        .iter()
        .filter(|b| b.verification_status == VerificationStatus::Verified)
        .count();

    let avg_eligibility_score = if total_beneficiaries == 0 {
        0.0
    } else {
        let sum: f64 = beneficiaries
            .iter()
            .map(|b| f64::from(b.eligibility_score))
            .sum();
        ((sum / total_beneficiaries as f64) * 100.0).round() / 100.0
    };

    let count_status = |wanted: &[ProjectStatus]| {
        projects
            .iter()
            .filter(|project| wanted.contains(&project.status))
            .count()
    };

    let mut top_states = state_counts(beneficiaries);
    top_states.truncate(TOP_STATES);

    let projects_by_category = ranked(projects, |p| p.category.clone())
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    DashboardStats {
        total_beneficiaries,
        verified_beneficiaries,
        avg_eligibility_score,
        total_projects: projects.len(),
        total_funding_approved: projects.iter().map(|p| p.approved_amount).sum(),
        active_projects: count_status(&[ProjectStatus::Approved, ProjectStatus::InProgress]),
        completed_projects: count_status(&[ProjectStatus::Completed]),
        top_states,
        projects_by_category,
    }
}

pub fn beneficiary_distribution(beneficiaries: &[Beneficiary]) -> BeneficiaryDistribution {
    let by_caste = ranked(beneficiaries, |b| b.caste_category)
        .into_iter()
        .map(|(caste_category, count)| CasteCount {
            caste_category,
            count,
        })
        .collect();

    let by_education = ranked(beneficiaries, |b| b.education_level.label().to_string())
        .into_iter()
        .map(|(education_level, count)| EducationCount {
            education_level,
            count,
        })
        .collect();

    let mut incomes: HashMap<IncomeBracket, usize> = HashMap::new();
    for beneficiary in beneficiaries {
        *incomes
            .entry(IncomeBracket::for_income(beneficiary.annual_income))
            .or_default() += 1;
    }
    let by_income = IncomeBracket::ordered()
        .into_iter()
        .map(|bracket| IncomeBracketCount {
            income_bracket: bracket,
            income_bracket_label: bracket.label(),
            count: incomes.get(&bracket).copied().unwrap_or(0),
        })
        .collect();

    BeneficiaryDistribution {
        by_state: state_counts(beneficiaries),
        by_caste,
        by_education,
        by_income,
    }
}

/// Submissions per UTC calendar day, latest day first.
pub fn project_trends(projects: &[Project], days: usize) -> Vec<ProjectTrendPoint> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for project in projects {
        *per_day.entry(project.submission_date.date_naive()).or_default() += 1;
    }
    per_day
        .into_iter()
        .rev()
        .take(days)
        .map(|(date, count)| ProjectTrendPoint { date, count })
        .collect()
}
