use chrono::{DateTime, Utc};
use serde_json::json;

use super::domain::{Beneficiary, VerificationPatch, VerificationStatus};
use crate::programs::audit::domain::{AuditAction, AuditActor, AuditEntityType, AuditEvent};
use crate::programs::error::ValidationError;

/// Applies an administrative verification decision.
///
/// Any of the three statuses may be set from any other; only the value itself
/// is validated. The input record is never modified.
pub fn apply_verification_update(
    beneficiary: &Beneficiary,
    patch: &VerificationPatch,
    now: DateTime<Utc>,
) -> Result<(Beneficiary, AuditEvent), ValidationError> {
    let raw = patch
        .status
        .as_deref()
        .ok_or(ValidationError::MissingField("status"))?;
    let status = VerificationStatus::parse(raw)
        .ok_or_else(|| ValidationError::InvalidVerificationStatus(raw.to_string()))?;

    let mut next = beneficiary.clone();
    next.verification_status = status;
    next.last_updated = now;

    let event = AuditEvent::new(
        AuditEntityType::Beneficiary,
        next.id.0.clone(),
        AuditAction::VerificationUpdated,
        AuditActor::Admin,
        now,
        json!({
            "status": status.label(),
            "remarks": patch.remarks,
        }),
    );

    Ok((next, event))
}
