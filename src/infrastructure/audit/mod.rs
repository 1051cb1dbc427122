//! Audit infrastructure - recorder, repository and read service

mod recorder;
mod repository;
mod service;

pub use recorder::AuditRecorder;
pub use repository::StorageAuditLogRepository;
pub use service::AuditService;
