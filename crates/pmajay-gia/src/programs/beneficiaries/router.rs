use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Serialize;

use super::domain::{
    Beneficiary, BeneficiaryFilter, BeneficiaryId, BeneficiaryRegistration, VerificationPatch,
};
use super::repository::BeneficiaryRepository;
use super::service::BeneficiaryService;
use crate::programs::audit::AuditLog;
use crate::programs::error::ProgramError;

/// Router exposing registration, listing, lookup, and verification.
pub fn beneficiary_router<R, L>(service: Arc<BeneficiaryService<R, L>>) -> Router
where
    R: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route(
            "/api/beneficiaries",
            get(list_handler::<R, L>).post(register_handler::<R, L>),
        )
        .route("/api/beneficiaries/:id", get(fetch_handler::<R, L>))
        .route("/api/beneficiaries/:id/verify", patch(verify_handler::<R, L>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    #[serde(flatten)]
    pub beneficiary: Beneficiary,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub message: &'static str,
    pub status: &'static str,
}

pub(crate) async fn list_handler<R, L>(
    State(service): State<Arc<BeneficiaryService<R, L>>>,
    Query(filter): Query<BeneficiaryFilter>,
) -> Result<Json<Vec<Beneficiary>>, ProgramError>
where
    R: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.list(&filter)?))
}

pub(crate) async fn register_handler<R, L>(
    State(service): State<Arc<BeneficiaryService<R, L>>>,
    payload: Result<Json<BeneficiaryRegistration>, JsonRejection>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ProgramError>
where
    R: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    let Json(registration) = payload?;
    let beneficiary = service.register(registration)?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            beneficiary,
            message: "Beneficiary registered successfully",
        }),
    ))
}

pub(crate) async fn fetch_handler<R, L>(
    State(service): State<Arc<BeneficiaryService<R, L>>>,
    Path(id): Path<String>,
) -> Result<Json<Beneficiary>, ProgramError>
where
    R: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.get(&BeneficiaryId(id))?))
}

pub(crate) async fn verify_handler<R, L>(
    State(service): State<Arc<BeneficiaryService<R, L>>>,
    Path(id): Path<String>,
    payload: Result<Json<VerificationPatch>, JsonRejection>,
) -> Result<Json<VerificationResponse>, ProgramError>
where
    R: BeneficiaryRepository + 'static,
    L: AuditLog + 'static,
{
    let Json(patch) = payload?;
    let updated = service.verify(&BeneficiaryId(id), &patch)?;
    Ok(Json(VerificationResponse {
        message: "Verification status updated",
        status: updated.verification_status.label(),
    }))
}
