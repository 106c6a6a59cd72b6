use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use super::domain::{Enrollment, EnrollmentRequest, ProgramFilter, Skill, TrainingProgram};
use super::repository::TrainingRepository;
use super::service::TrainingService;
use crate::programs::audit::AuditLog;
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::error::ProgramError;

pub fn training_router<T, B, L>(service: Arc<TrainingService<T, B, L>>) -> Router
where
    T: TrainingRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/skills", get(skills_handler::<T, B, L>))
        .route("/api/training-programs", get(programs_handler::<T, B, L>))
        .route("/api/enrollments", post(enroll_handler::<T, B, L>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub message: &'static str,
}

pub(crate) async fn skills_handler<T, B, L>(
    State(service): State<Arc<TrainingService<T, B, L>>>,
) -> Result<Json<Vec<Skill>>, ProgramError>
where
    T: TrainingRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.skills()?))
}

pub(crate) async fn programs_handler<T, B, L>(
    State(service): State<Arc<TrainingService<T, B, L>>>,
    Query(filter): Query<ProgramFilter>,
) -> Result<Json<Vec<TrainingProgram>>, ProgramError>
where
    T: TrainingRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.programs(&filter)?))
}

pub(crate) async fn enroll_handler<T, B, L>(
    State(service): State<Arc<TrainingService<T, B, L>>>,
    payload: Result<Json<EnrollmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ProgramError>
where
    T: TrainingRepository + 'static,
    B: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    let Json(request) = payload?;
    let enrollment = service.enroll(request)?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            enrollment,
            message: "Enrolled successfully",
        }),
    ))
}
