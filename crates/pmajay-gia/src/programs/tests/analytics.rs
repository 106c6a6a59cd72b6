use chrono::{Duration, NaiveDate, TimeZone, Utc};

use super::common::*;
use crate::programs::analytics::{beneficiary_distribution, project_trends};
use crate::programs::beneficiaries::domain::{CasteCategory, VerificationPatch};
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::beneficiaries::IncomeBracket;
use crate::programs::projects::domain::{ProjectId, StatusPatch};
use crate::programs::projects::repository::ProjectRepository;

#[test]
fn dashboard_on_empty_stores_is_zeroed() {
    let harness = Harness::new();
    let stats = harness.analytics_service.dashboard().expect("stats");
    assert_eq!(stats.total_beneficiaries, 0);
    assert_eq!(stats.avg_eligibility_score, 0.0);
    assert_eq!(stats.total_funding_approved, 0.0);
    assert!(stats.top_states.is_empty());
    assert!(stats.projects_by_category.is_empty());
}

#[test]
fn dashboard_aggregates_beneficiaries_and_projects() {
    let harness = Harness::new();
    let first = harness.register("Sunita Devi", "1");
    let mut other = registration("Arjun", "2");
    other.state = "Odisha".to_string();
    other.caste_category = Some(CasteCategory::General);
    other.annual_income = Some(160_000.0);
    let second = harness.beneficiary_service.register(other).expect("registers");
    harness
        .beneficiary_service
        .verify(
            &first.id,
            &VerificationPatch {
                status: Some("verified".to_string()),
                remarks: None,
            },
        )
        .expect("verify");

    let funded = harness.submit_for(&first);
    harness
        .project_service
        .update_status(&funded.id, &StatusPatch::approve(30_000.0))
        .expect("approve");
    let finished = harness.submit_for(&second);
    harness
        .project_service
        .update_status(&finished.id, &StatusPatch::approve(12_500.5))
        .expect("approve");
    harness
        .project_service
        .update_status(&finished.id, &StatusPatch::progress(100))
        .expect("complete");
    harness.submit_for(&first);

    let stats = harness.analytics_service.dashboard().expect("stats");
    assert_eq!(stats.total_beneficiaries, 2);
    assert_eq!(stats.verified_beneficiaries, 1);
    // (90 + 40) / 2
    assert_eq!(stats.avg_eligibility_score, 65.0);
    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.total_funding_approved, 42_500.5);
    assert_eq!(stats.active_projects, 1);
    assert_eq!(stats.completed_projects, 1);
    assert_eq!(stats.top_states[0].state, "Bihar");
    assert_eq!(stats.top_states[0].count, 1);
    assert_eq!(stats.top_states.len(), 2);
    assert_eq!(stats.projects_by_category[0].category, "Income Generation");
    assert_eq!(stats.projects_by_category[0].count, 3);
}

#[test]
fn average_score_rounds_to_two_decimals() {
    let harness = Harness::new();
    harness.register("A", "1");
    harness.register("B", "2");
    let mut third = registration("C", "3");
    third.caste_category = Some(CasteCategory::Obc);
    third.family_size = Some(2);
    harness.beneficiary_service.register(third).expect("registers");

    // (90 + 90 + 65) / 3 = 81.666...
    let stats = harness.analytics_service.dashboard().expect("stats");
    assert_eq!(stats.avg_eligibility_score, 81.67);
}

#[test]
fn distribution_lists_every_income_bracket() {
    let harness = Harness::new();
    harness.register("Sunita Devi", "1");
    let mut richer = registration("Arjun", "2");
    richer.annual_income = Some(100_000.0);
    harness.beneficiary_service.register(richer).expect("registers");

    let beneficiaries = harness.beneficiaries.list().expect("list");
    let distribution = beneficiary_distribution(&beneficiaries);

    let brackets: Vec<(IncomeBracket, usize)> = distribution
        .by_income
        .iter()
        .map(|entry| (entry.income_bracket, entry.count))
        .collect();
    assert_eq!(
        brackets,
        vec![
            (IncomeBracket::Below50k, 1),
            (IncomeBracket::From50kTo100k, 0),
            (IncomeBracket::From100kTo150k, 1),
            (IncomeBracket::Above150k, 0),
        ]
    );
    assert_eq!(distribution.by_income[2].income_bracket_label, "100k-150k");
    assert_eq!(distribution.by_state[0].count, 2);
    assert_eq!(distribution.by_caste[0].caste_category, CasteCategory::Sc);
    assert_eq!(distribution.by_education[0].education_level, "Secondary");
}

#[test]
fn trends_group_by_day_newest_first() {
    let harness = Harness::new();
    let beneficiary = harness.register("Sunita Devi", "1");
    let template = harness.submit_for(&beneficiary);
    let base = Utc
        .with_ymd_and_hms(2025, 9, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp");

    for offset in 0..40 {
        let mut project = template.clone();
        project.id = ProjectId::generate();
        project.submission_date = base + Duration::days(offset);
        harness.projects.insert(project).expect("insert");
    }
    let mut same_day = template.clone();
    same_day.id = ProjectId::generate();
    same_day.submission_date = base + Duration::days(39) + Duration::hours(5);
    harness.projects.insert(same_day).expect("insert");

    let projects = harness.projects.list().expect("list");
    let trends = project_trends(&projects, 30);
    assert_eq!(trends.len(), 30);
    // the fixture's own submission is the latest day
    assert_eq!(trends[0].date, template.submission_date.date_naive());
    assert_eq!(
        trends[1].date,
        NaiveDate::from_ymd_opt(2025, 10, 10).expect("valid date")
    );
    assert_eq!(trends[1].count, 2);
    assert!(trends.windows(2).all(|pair| pair[0].date > pair[1].date));

    let served = harness.analytics_service.trends().expect("trends");
    assert_eq!(served, trends);
}
