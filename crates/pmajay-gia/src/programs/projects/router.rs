use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Serialize;

use super::domain::{Project, ProjectFilter, ProjectId, ProjectListing, ProjectSubmission, StatusPatch};
use super::repository::ProjectRepository;
use super::service::ProjectService;
use crate::programs::audit::AuditLog;
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::error::ProgramError;

/// Router exposing project submission, listing, and status updates.
pub fn project_router<P, B, L>(service: Arc<ProjectService<P, B, L>>) -> Router
where
    P: ProjectRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route(
            "/api/projects",
            get(list_handler::<P, B, L>).post(submit_handler::<P, B, L>),
        )
        .route("/api/projects/:id", get(fetch_handler::<P, B, L>))
        .route("/api/projects/:id/status", patch(status_handler::<P, B, L>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub project: Project,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub message: &'static str,
    pub project: Project,
}

pub(crate) async fn list_handler<P, B, L>(
    State(service): State<Arc<ProjectService<P, B, L>>>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<Vec<ProjectListing>>, ProgramError>
where
    P: ProjectRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.list(&filter)?))
}

pub(crate) async fn submit_handler<P, B, L>(
    State(service): State<Arc<ProjectService<P, B, L>>>,
    payload: Result<Json<ProjectSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ProgramError>
where
    P: ProjectRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    let Json(submission) = payload?;
    let project = service.submit(submission)?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            project,
            message: "Project submitted successfully",
        }),
    ))
}

pub(crate) async fn fetch_handler<P, B, L>(
    State(service): State<Arc<ProjectService<P, B, L>>>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ProgramError>
where
    P: ProjectRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.get(&ProjectId(id))?))
}

pub(crate) async fn status_handler<P, B, L>(
    State(service): State<Arc<ProjectService<P, B, L>>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusPatch>, JsonRejection>,
) -> Result<Json<StatusUpdateResponse>, ProgramError>
where
    P: ProjectRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    let Json(patch) = payload?;
    let project = service.update_status(&ProjectId(id), &patch)?;
    Ok(Json(StatusUpdateResponse {
        message: "Project status updated",
        project,
    }))
}
