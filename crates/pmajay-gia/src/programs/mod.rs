pub mod analytics;
pub mod audit;
pub mod beneficiaries;
pub mod error;
pub mod memory;
pub mod projects;
pub mod training;

pub use analytics::{analytics_router, AnalyticsService};
pub use audit::{audit_router, AuditLog};
pub use beneficiaries::{beneficiary_router, BeneficiaryService};
pub use error::{ProgramError, RepositoryError, ValidationError};
pub use memory::{
    InMemoryAuditLog, InMemoryBeneficiaryRepository, InMemoryProjectRepository,
    InMemoryTrainingRepository,
};
pub use projects::{project_router, ProjectService};
pub use training::{training_router, TrainingService};

#[cfg(test)]
mod tests;
