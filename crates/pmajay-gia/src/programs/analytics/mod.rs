//! Dashboard and distribution reports.

pub mod router;
pub mod service;
mod summary;
pub mod views;

pub use router::analytics_router;
pub use service::AnalyticsService;
pub use summary::{
    beneficiary_distribution, dashboard_stats, project_trends, TOP_STATES, TREND_DAYS,
};
pub use views::{
    BeneficiaryDistribution, CasteCount, CategoryCount, DashboardStats, EducationCount,
    IncomeBracketCount, ProjectTrendPoint, StateCount,
};
