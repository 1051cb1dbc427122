//! Audit recorder
//!
//! Append-only sink consumed by the services. A failed write is logged and
//! swallowed: audit completeness never gates the primary operation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::audit::{AuditEvent, AuditLog, AuditLogRepository};

/// Fire-and-forget audit sink
#[derive(Debug)]
pub struct AuditRecorder {
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditRecorder {
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        Self { repository }
    }

    /// Record an event. Never fails; write errors are logged and dropped.
    pub async fn record(&self, event: AuditEvent) {
        let action = event.action;
        let entry = AuditLog::from_event(event);

        match self.repository.append(entry).await {
            Ok(entry) => {
                debug!(id = %entry.id(), action = %action, "audit entry recorded");
            }
            Err(err) => {
                warn!(action = %action, error = %err, "failed to write audit log entry");
            }
        }
    }
}
