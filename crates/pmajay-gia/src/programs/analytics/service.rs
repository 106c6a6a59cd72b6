use std::sync::Arc;

use super::summary::{beneficiary_distribution, dashboard_stats, project_trends, TREND_DAYS};
use super::views::{BeneficiaryDistribution, DashboardStats, ProjectTrendPoint};
use crate::programs::beneficiaries::repository::BeneficiaryRepository;
use crate::programs::error::ProgramError;
use crate::programs::projects::repository::ProjectRepository;

/// Read-only aggregates over beneficiaries and projects.
pub struct AnalyticsService<B, P> {
    beneficiaries: Arc<B>,
    projects: Arc<P>,
}

impl<B, P> AnalyticsService<B, P>
where
    B: BeneficiaryRepository + 'static,
    P: ProjectRepository + 'static,
{
    pub fn new(beneficiaries: Arc<B>, projects: Arc<P>) -> Self {
        Self {
            beneficiaries,
            projects,
        }
    }

    pub fn dashboard(&self) -> Result<DashboardStats, ProgramError> {
        let beneficiaries = self.beneficiaries.list()?;
        let projects = self.projects.list()?;
        Ok(dashboard_stats(&beneficiaries, &projects))
    }

    pub fn distribution(&self) -> Result<BeneficiaryDistribution, ProgramError> {
        Ok(beneficiary_distribution(&self.beneficiaries.list()?))
    }

    pub fn trends(&self) -> Result<Vec<ProjectTrendPoint>, ProgramError> {
        Ok(project_trends(&self.projects.list()?, TREND_DAYS))
    }
}
