use super::domain::{Beneficiary, BeneficiaryId};
use crate::programs::error::RepositoryError;

/// Storage abstraction for beneficiary records.
///
/// `insert` must reject a record whose id or Aadhar number is already stored
/// with [`RepositoryError::Conflict`].
pub trait BeneficiaryRepository: Send + Sync {
    fn insert(&self, record: Beneficiary) -> Result<Beneficiary, RepositoryError>;
    fn update(&self, record: Beneficiary) -> Result<(), RepositoryError>;
    fn remove(&self, id: &BeneficiaryId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &BeneficiaryId) -> Result<Option<Beneficiary>, RepositoryError>;
    fn list(&self) -> Result<Vec<Beneficiary>, RepositoryError>;
}
