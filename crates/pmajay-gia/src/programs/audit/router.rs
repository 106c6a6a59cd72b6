use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::domain::{AuditQuery, AuditRecord};
use super::AuditLog;
use crate::programs::error::ProgramError;

pub fn audit_router<L>(log: Arc<L>) -> Router
where
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/audit-logs", get(list_handler::<L>))
        .with_state(log)
}

pub(crate) async fn list_handler<L>(
    State(log): State<Arc<L>>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditRecord>>, ProgramError>
where
    L: AuditLog + 'static,
{
    let records = log.query(&query)?;
    Ok(Json(records))
}
