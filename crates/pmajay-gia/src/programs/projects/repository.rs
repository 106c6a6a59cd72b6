use super::domain::{Project, ProjectId};
use crate::programs::error::RepositoryError;

/// Storage abstraction for project records. `remove` only undoes an insert
/// whose audit record could not be written.
pub trait ProjectRepository: Send + Sync {
    fn insert(&self, record: Project) -> Result<Project, RepositoryError>;
    fn update(&self, record: Project) -> Result<(), RepositoryError>;
    fn remove(&self, id: &ProjectId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn list(&self) -> Result<Vec<Project>, RepositoryError>;
}
