//! Beneficiary registration, eligibility scoring, and verification.

pub mod domain;
pub mod eligibility;
pub mod import;
mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod verification;

pub use domain::{
    Beneficiary, BeneficiaryFilter, BeneficiaryId, BeneficiaryRegistration, CasteCategory,
    EducationLevel, VerificationPatch, VerificationStatus,
};
pub use eligibility::{
    assess, compute_eligibility_score, EligibilityAssessment, EligibilityCriterion,
    EligibilityProfile, IncomeBracket, ScoreComponent,
};
pub use import::{
    BeneficiaryCsvImporter, BeneficiaryImportError, CsvExport, ImportSummary, RejectedRow,
};
pub use repository::BeneficiaryRepository;
pub use router::beneficiary_router;
pub use service::BeneficiaryService;
pub use verification::apply_verification_update;
