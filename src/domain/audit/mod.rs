//! Audit domain - append-only record of actions taken

mod entity;
mod repository;

pub use entity::{AuditAction, AuditEvent, AuditLog, AuditLogId, RequestOrigin};
pub use repository::{AuditLogRepository, AuditQuery};
