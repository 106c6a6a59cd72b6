use metrics_exporter_prometheus::PrometheusHandle;
use pmajay_gia::config::ProgramConfig;
use pmajay_gia::error::AppError;
use pmajay_gia::programs::{
    AnalyticsService, BeneficiaryService, InMemoryAuditLog, InMemoryBeneficiaryRepository,
    InMemoryProjectRepository, InMemoryTrainingRepository, ProjectService, TrainingService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Beneficiaries = BeneficiaryService<InMemoryBeneficiaryRepository, InMemoryAuditLog>;
pub(crate) type Projects =
    ProjectService<InMemoryProjectRepository, InMemoryBeneficiaryRepository, InMemoryAuditLog>;
pub(crate) type Training =
    TrainingService<InMemoryTrainingRepository, InMemoryBeneficiaryRepository, InMemoryAuditLog>;
pub(crate) type Analytics =
    AnalyticsService<InMemoryBeneficiaryRepository, InMemoryProjectRepository>;

/// Program services sharing one set of in-memory stores.
#[derive(Clone)]
pub(crate) struct ProgramServices {
    pub(crate) beneficiaries: Arc<Beneficiaries>,
    pub(crate) projects: Arc<Projects>,
    pub(crate) training: Arc<Training>,
    pub(crate) analytics: Arc<Analytics>,
    pub(crate) audit: Arc<InMemoryAuditLog>,
}

impl ProgramServices {
    pub(crate) fn in_memory(config: &ProgramConfig) -> Result<Self, AppError> {
        let beneficiary_store = Arc::new(InMemoryBeneficiaryRepository::default());
        let project_store = Arc::new(InMemoryProjectRepository::default());
        let training_store = Arc::new(InMemoryTrainingRepository::default());
        let audit = Arc::new(InMemoryAuditLog::default());

        let training = TrainingService::new(training_store, beneficiary_store.clone(), audit.clone());
        if config.seed_catalog {
            training.seed_catalog()?;
        }

        Ok(Self {
            beneficiaries: Arc::new(BeneficiaryService::new(
                beneficiary_store.clone(),
                audit.clone(),
            )),
            projects: Arc::new(ProjectService::new(
                project_store.clone(),
                beneficiary_store.clone(),
                audit.clone(),
                config.transition_policy,
            )),
            training: Arc::new(training),
            analytics: Arc::new(AnalyticsService::new(beneficiary_store, project_store)),
            audit,
        })
    }
}
