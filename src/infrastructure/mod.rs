//! Infrastructure layer - services and storage implementations

pub mod audit;
pub mod logging;
pub mod membership;
pub mod permissions;
pub mod rate_limit;
pub mod role;
pub mod session;
pub mod storage;
pub mod team;
pub mod user;

pub use audit::{AuditRecorder, AuditService, StorageAuditLogRepository};
pub use membership::{InMemoryMembershipStore, MembershipService};
pub use permissions::PermissionResolver;
pub use rate_limit::{client_identifier, RateLimitPolicy, RateLimiter};
pub use role::{CreateRoleInput, RoleService, StorageRoleRepository};
pub use session::{AuthService, LoginOutcome, SignupInput, StorageSessionRepository};
pub use storage::InMemoryStorage;
pub use team::{CreateTeamInput, StorageTeamRepository, TeamDetail, TeamService};
pub use user::{
    Argon2Hasher, CreateUserInput, PasswordHasher, StorageUserRepository, UpdateUserInput,
    UserService,
};
