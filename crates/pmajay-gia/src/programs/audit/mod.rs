//! Accountability trail for beneficiary, project, and enrollment changes.

pub mod domain;
pub mod router;

use domain::{AuditEvent, AuditQuery, AuditRecord};

pub use domain::{AuditAction, AuditActor, AuditEntityType, AuditId};
pub use router::audit_router;

/// Append-only sink for audit events.
pub trait AuditLog: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<AuditRecord, AuditError>;
    fn query(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}
