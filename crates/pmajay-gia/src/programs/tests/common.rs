use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::programs::analytics::AnalyticsService;
use crate::programs::audit::domain::{AuditEvent, AuditQuery, AuditRecord};
use crate::programs::audit::{AuditError, AuditLog};
use crate::programs::beneficiaries::domain::{
    Beneficiary, BeneficiaryId, BeneficiaryRegistration, CasteCategory, EducationLevel,
};
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::beneficiaries::BeneficiaryService;
use crate::programs::error::RepositoryError;
use crate::programs::memory::{
    InMemoryAuditLog, InMemoryBeneficiaryRepository, InMemoryProjectRepository,
    InMemoryTrainingRepository,
};
use crate::programs::projects::domain::{Project, ProjectSubmission};
use crate::programs::projects::{FixedPriority, ProjectService, TransitionPolicy};
use crate::programs::training::TrainingService;

pub(super) type Beneficiaries = BeneficiaryService<InMemoryBeneficiaryRepository, InMemoryAuditLog>;
pub(super) type Projects =
    ProjectService<InMemoryProjectRepository, InMemoryBeneficiaryRepository, InMemoryAuditLog>;
pub(super) type Training =
    TrainingService<InMemoryTrainingRepository, InMemoryBeneficiaryRepository, InMemoryAuditLog>;
pub(super) type Analytics = AnalyticsService<InMemoryBeneficiaryRepository, InMemoryProjectRepository>;

pub(super) fn registration(name: &str, aadhar: &str) -> BeneficiaryRegistration {
    BeneficiaryRegistration {
        name: name.to_string(),
        age: Some(34),
        gender: "Female".to_string(),
        state: "Bihar".to_string(),
        district: "Gaya".to_string(),
        caste_category: Some(CasteCategory::Sc),
        aadhar_number: aadhar.to_string(),
        phone: "9876543210".to_string(),
        email: None,
        education_level: EducationLevel::Secondary,
        annual_income: Some(45_000.0),
        family_size: Some(6),
        occupation: Some("Agricultural labour".to_string()),
        skills: None,
        bank_account: None,
        ifsc_code: None,
    }
}

pub(super) fn submission(beneficiary: &Beneficiary) -> ProjectSubmission {
    ProjectSubmission {
        beneficiary_id: beneficiary.id.0.clone(),
        project_type: "Livelihood".to_string(),
        title: "Tailoring unit".to_string(),
        description: Some("Two sewing machines and material".to_string()),
        category: "Income Generation".to_string(),
        requested_amount: Some(50_000.0),
    }
}

/// Every service wired to shared in-memory stores.
pub(super) struct Harness {
    pub(super) beneficiaries: Arc<InMemoryBeneficiaryRepository>,
    pub(super) projects: Arc<InMemoryProjectRepository>,
    pub(super) training: Arc<InMemoryTrainingRepository>,
    pub(super) audit: Arc<InMemoryAuditLog>,
    pub(super) beneficiary_service: Beneficiaries,
    pub(super) project_service: Projects,
    pub(super) training_service: Training,
    pub(super) analytics_service: Analytics,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self::with_policy(TransitionPolicy::Permissive)
    }

    pub(super) fn with_policy(policy: TransitionPolicy) -> Self {
        let beneficiaries = Arc::new(InMemoryBeneficiaryRepository::default());
        let projects = Arc::new(InMemoryProjectRepository::default());
        let training = Arc::new(InMemoryTrainingRepository::default());
        let audit = Arc::new(InMemoryAuditLog::default());

        Self {
            beneficiary_service: BeneficiaryService::new(beneficiaries.clone(), audit.clone()),
            project_service: ProjectService::new(
                projects.clone(),
                beneficiaries.clone(),
                audit.clone(),
                policy,
            )
            .with_priority(Arc::new(FixedPriority::new(50.0))),
            training_service: TrainingService::new(
                training.clone(),
                beneficiaries.clone(),
                audit.clone(),
            ),
            analytics_service: AnalyticsService::new(beneficiaries.clone(), projects.clone()),
            beneficiaries,
            projects,
            training,
            audit,
        }
    }

    pub(super) fn register(&self, name: &str, aadhar: &str) -> Beneficiary {
        self.beneficiary_service
            .register(registration(name, aadhar))
            .expect("registration succeeds")
    }

    pub(super) fn submit_for(&self, beneficiary: &Beneficiary) -> Project {
        self.project_service
            .submit(submission(beneficiary))
            .expect("submission succeeds")
    }

    pub(super) fn audit_count(&self) -> usize {
        self.audit.len()
    }

    pub(super) fn audit_log(&self) -> &InMemoryAuditLog {
        &self.audit
    }
}

pub(super) struct UnavailableBeneficiaries;

impl BeneficiaryRepository for UnavailableBeneficiaries {
    fn insert(&self, _record: Beneficiary) -> Result<Beneficiary, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: Beneficiary) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &BeneficiaryId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BeneficiaryId) -> Result<Option<Beneficiary>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Beneficiary>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Audit sink that refuses every write.
pub(super) struct RejectingAuditLog;

impl AuditLog for RejectingAuditLog {
    fn record(&self, _event: AuditEvent) -> Result<AuditRecord, AuditError> {
        Err(AuditError::Unavailable("audit store offline".to_string()))
    }

    fn query(&self, _query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(Vec::new())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
