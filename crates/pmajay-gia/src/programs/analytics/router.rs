use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::service::AnalyticsService;
use super::views::{BeneficiaryDistribution, DashboardStats, ProjectTrendPoint};
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::error::ProgramError;
use crate::programs::projects::repository::ProjectRepository;

pub fn analytics_router<B, P>(service: Arc<AnalyticsService<B, P>>) -> Router
where
    B: BeneficiaryRepository + 'static,
    P: ProjectRepository + 'static,
{
    Router::new()
        .route("/api/dashboard/stats", get(dashboard_handler::<B, P>))
        .route(
            "/api/analytics/beneficiary-distribution",
            get(distribution_handler::<B, P>),
        )
        .route("/api/analytics/project-trends", get(trends_handler::<B, P>))
        .with_state(service)
}

pub(crate) async fn dashboard_handler<B, P>(
    State(service): State<Arc<AnalyticsService<B, P>>>,
) -> Result<Json<DashboardStats>, ProgramError>
where
    B: BeneficiaryRepository + 'static,
    P: ProjectRepository + 'static,
{
    Ok(Json(service.dashboard()?))
}

pub(crate) async fn distribution_handler<B, P>(
    State(service): State<Arc<AnalyticsService<B, P>>>,
) -> Result<Json<BeneficiaryDistribution>, ProgramError>
where
    B: BeneficiaryRepository + 'static,
    P: ProjectRepository + 'static,
{
    Ok(Json(service.distribution()?))
}

pub(crate) async fn trends_handler<B, P>(
    State(service): State<Arc<AnalyticsService<B, P>>>,
) -> Result<Json<Vec<ProjectTrendPoint>>, ProgramError>
where
    B: BeneficiaryRepository + 'static,
    P: ProjectRepository + 'static,
{
    Ok(Json(service.trends()?))
}
