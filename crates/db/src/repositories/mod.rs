//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a `PgExecutor`) as the first argument.

pub mod list_repo;
pub mod managed_vocabulary_repo;
pub mod provider_repo;
pub mod resource_repo;
pub mod signal_repo;
pub mod update_request_repo;
pub mod verification_event_repo;

pub use list_repo::ListRepo;
pub use managed_vocabulary_repo::{ManagedCategoryRepo, ManagedTagRepo};
pub use provider_repo::ProviderRepo;
pub use resource_repo::ResourceRepo;
pub use signal_repo::SignalRepo;
pub use update_request_repo::UpdateRequestRepo;
pub use verification_event_repo::VerificationEventRepo;
