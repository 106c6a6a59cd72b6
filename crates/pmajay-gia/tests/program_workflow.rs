use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pmajay_gia::programs::audit::domain::{AuditEntityType, AuditQuery};
use pmajay_gia::programs::audit::AuditLog;
use pmajay_gia::programs::beneficiaries::{
    apply_verification_update, compute_eligibility_score, BeneficiaryCsvImporter,
    BeneficiaryRegistration, BeneficiaryService, CasteCategory, EducationLevel,
    EligibilityProfile, VerificationPatch, VerificationStatus,
};
use pmajay_gia::programs::projects::{
    apply_status_update, FixedPriority, ProjectService, ProjectStatus, ProjectSubmission,
    StatusPatch, TransitionPolicy,
};
use pmajay_gia::programs::{
    AnalyticsService, InMemoryAuditLog, InMemoryBeneficiaryRepository, InMemoryProjectRepository,
    ValidationError,
};

fn profile(
    annual_income: f64,
    education_level: &str,
    family_size: u32,
    caste_category: CasteCategory,
) -> EligibilityProfile {
    EligibilityProfile {
        annual_income,
        education_level: EducationLevel::parse(education_level),
        family_size,
        caste_category,
    }
}

#[test]
fn eligibility_rubric_matches_reference_cases() {
    assert_eq!(
        compute_eligibility_score(&profile(30_000.0, "No formal education", 7, CasteCategory::Sc)),
        100
    );
    assert_eq!(
        compute_eligibility_score(&profile(
            200_000.0,
            "Post Graduate",
            3,
            CasteCategory::General
        )),
        25
    );
    assert_eq!(
        compute_eligibility_score(&profile(45_000.0, "Secondary", 6, CasteCategory::Sc)),
        90
    );
    assert_eq!(
        compute_eligibility_score(&profile(80_000.0, "Graduate", 4, CasteCategory::Sc)),
        68
    );
}

#[test]
fn registration_to_completion_with_audit_trail() {
    let beneficiaries = Arc::new(InMemoryBeneficiaryRepository::default());
    let projects = Arc::new(InMemoryProjectRepository::default());
    let audit = Arc::new(InMemoryAuditLog::default());

    let beneficiary_service = BeneficiaryService::new(beneficiaries.clone(), audit.clone());
    let project_service = ProjectService::new(
        projects.clone(),
        beneficiaries.clone(),
        audit.clone(),
        TransitionPolicy::Strict,
    )
    .with_priority(Arc::new(FixedPriority::new(75.0)));

    let beneficiary = beneficiary_service
        .register(BeneficiaryRegistration {
            name: "Lakshmi".to_string(),
            age: Some(38),
            gender: "Female".to_string(),
            state: "Tamil Nadu".to_string(),
            district: "Salem".to_string(),
            caste_category: Some(CasteCategory::St),
            aadhar_number: "4000-1000-2000".to_string(),
            phone: "9100000000".to_string(),
            education_level: EducationLevel::parse("Primary"),
            annual_income: Some(52_000.0),
            family_size: Some(5),
            ..BeneficiaryRegistration::default()
        })
        .expect("registers");
    // 30 income + 18 education + 15 family
    assert_eq!(beneficiary.eligibility_score, 63);

    let verified = beneficiary_service
        .verify(
            &beneficiary.id,
            &VerificationPatch {
                status: Some("verified".to_string()),
                remarks: Some("Field visit".to_string()),
            },
        )
        .expect("verifies");
    assert_eq!(verified.verification_status, VerificationStatus::Verified);

    let project = project_service
        .submit(ProjectSubmission {
            beneficiary_id: beneficiary.id.0.clone(),
            project_type: "Agriculture".to_string(),
            title: "Drip irrigation".to_string(),
            description: None,
            category: "Infrastructure".to_string(),
            requested_amount: Some(120_000.0),
        })
        .expect("submits");

    for patch in [
        StatusPatch::status(ProjectStatus::UnderReview),
        StatusPatch::approve(100_000.0),
        StatusPatch::progress(60),
        StatusPatch::progress(100).with_remarks("Installed"),
    ] {
        project_service
            .update_status(&project.id, &patch)
            .expect("lifecycle step");
    }

    let finished = project_service.get(&project.id).expect("present");
    assert_eq!(finished.status, ProjectStatus::Completed);
    assert_eq!(finished.approved_amount, 100_000.0);
    assert_eq!(finished.remarks.as_deref(), Some("Installed"));
    assert!(finished.completion_date.is_some());

    let trail = audit
        .query(&AuditQuery::for_entity(
            AuditEntityType::Project,
            project.id.0.clone(),
        ))
        .expect("audit query");
    assert_eq!(trail.len(), 5);
    assert_eq!(trail[0].event.details["status"], "completed");

    let stats = AnalyticsService::new(beneficiaries, projects)
        .dashboard()
        .expect("dashboard");
    assert_eq!(stats.completed_projects, 1);
    assert_eq!(stats.verified_beneficiaries, 1);
    assert_eq!(stats.total_funding_approved, 100_000.0);
}

#[test]
fn pure_updates_report_changes_without_mutating_input() {
    let now = Utc
        .with_ymd_and_hms(2025, 10, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");

    let beneficiaries = BeneficiaryCsvImporter::read(
        "name,age,gender,state,district,caste_category,aadhar_number,phone,education_level,annual_income,family_size\n\
         Gita,50,Female,Assam,Jorhat,OBC,7000,9200000000,Graduate,90000,3\n"
            .as_bytes(),
    )
    .expect("csv parses");
    let service = BeneficiaryService::new(
        Arc::new(InMemoryBeneficiaryRepository::default()),
        Arc::new(InMemoryAuditLog::default()),
    );
    let summary = BeneficiaryCsvImporter::register_all(&service, beneficiaries);
    let gita = summary.registered.first().expect("registered").clone();

    let (rejected, event) = apply_verification_update(
        &gita,
        &VerificationPatch {
            status: Some("rejected".to_string()),
            remarks: None,
        },
        now,
    )
    .expect("valid patch");
    assert_eq!(gita.verification_status, VerificationStatus::Pending);
    assert_eq!(rejected.verification_status, VerificationStatus::Rejected);
    assert_eq!(rejected.last_updated, now);
    assert_eq!(event.timestamp, now);
    assert_eq!(event.details["status"], "rejected");

    let project_service = ProjectService::new(
        Arc::new(InMemoryProjectRepository::default()),
        Arc::new(InMemoryBeneficiaryRepository::default()),
        Arc::new(InMemoryAuditLog::default()),
        TransitionPolicy::Permissive,
    );
    assert_eq!(project_service.policy(), TransitionPolicy::Permissive);

    let err = project_service
        .submit(ProjectSubmission::default())
        .expect_err("empty submission");
    assert!(err.to_string().contains("beneficiary_id"));

    let template = pmajay_gia::programs::projects::Project {
        id: pmajay_gia::programs::projects::ProjectId::generate(),
        beneficiary_id: gita.id.clone(),
        project_type: "Livelihood".to_string(),
        title: "Goat rearing".to_string(),
        description: None,
        category: "Income Generation".to_string(),
        requested_amount: 20_000.0,
        approved_amount: 0.0,
        status: ProjectStatus::Approved,
        priority_score: 12.0,
        submission_date: now,
        approval_date: Some(now),
        completion_date: None,
        completion_percentage: 0,
        remarks: None,
    };
    let (progressed, event) =
        apply_status_update(&template, &StatusPatch::progress(30), now).expect("progress");
    assert_eq!(template.status, ProjectStatus::Approved);
    assert_eq!(progressed.status, ProjectStatus::InProgress);
    assert_eq!(event.details["completion_percentage"], 30);

    assert_eq!(
        apply_status_update(&template, &StatusPatch::progress(101), now)
            .map(|(project, _)| project)
            .expect_err("out of range"),
        ValidationError::CompletionOutOfRange(101)
    );
}
