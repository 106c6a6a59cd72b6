use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Kind of record an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityType {
    Beneficiary,
    Project,
    Enrollment,
}

impl AuditEntityType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beneficiary => "beneficiary",
            Self::Project => "project",
            Self::Enrollment => "enrollment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    VerificationUpdated,
    StatusUpdated,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::VerificationUpdated => "verification_updated",
            Self::StatusUpdated => "status_updated",
        }
    }
}

/// Who triggered the audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditActor {
    System,
    Admin,
    Beneficiary,
}

/// Immutable description of one action taken on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub entity_type: AuditEntityType,
    pub entity_id: String,
    pub action: AuditAction,
    pub performed_by: AuditActor,
    pub timestamp: DateTime<Utc>,
    pub details: Value,
}

impl AuditEvent {
    pub fn new(
        entity_type: AuditEntityType,
        entity_id: impl Into<String>,
        action: AuditAction,
        performed_by: AuditActor,
        timestamp: DateTime<Utc>,
        details: Value,
    ) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
            action,
            performed_by,
            timestamp,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditId(pub String);

/// An event once it has been accepted by the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditId,
    #[serde(flatten)]
    pub event: AuditEvent,
}

impl AuditRecord {
    pub fn assign(event: AuditEvent) -> Self {
        Self {
            id: AuditId(Uuid::new_v4().to_string()),
            event,
        }
    }
}

const DEFAULT_AUDIT_LIMIT: usize = 50;

fn default_limit() -> usize {
    DEFAULT_AUDIT_LIMIT
}

/// Filter accepted by the audit log listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditQuery {
    #[serde(default)]
    pub entity_type: Option<AuditEntityType>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            entity_type: None,
            entity_id: None,
            limit: DEFAULT_AUDIT_LIMIT,
        }
    }
}

impl AuditQuery {
    pub fn for_entity(entity_type: AuditEntityType, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &AuditRecord) -> bool {
        let type_matches = self
            .entity_type
            .map_or(true, |entity_type| record.event.entity_type == entity_type);
        let id_matches = self
            .entity_id
            .as_deref()
            .map_or(true, |id| record.event.entity_id == id);
        type_matches && id_matches
    }

    /// Filters, orders newest first, and truncates to the limit.
    pub fn select(&self, records: impl IntoIterator<Item = AuditRecord>) -> Vec<AuditRecord> {
        let mut selected: Vec<AuditRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();
        // Later entries win ties on identical timestamps.
        selected.reverse();
        selected.sort_by(|a, b| b.event.timestamp.cmp(&a.event.timestamp));
        selected.truncate(self.limit);
        selected
    }
}
