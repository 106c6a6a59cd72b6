//! Funding requests and their status lifecycle.

pub mod domain;
pub mod lifecycle;
pub mod priority;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Project, ProjectFilter, ProjectId, ProjectListing, ProjectStatus, ProjectSubmission,
    StatusPatch,
};
pub use lifecycle::{apply_status_update, LifecycleManager, TransitionPolicy};
pub use priority::{FixedPriority, PriorityAssigner, RandomPriority};
pub use repository::ProjectRepository;
pub use router::project_router;
pub use service::ProjectService;
