use rand::Rng;

use super::domain::ProjectSubmission;

/// Assigns the opaque priority score a project carries from submission onward.
pub trait PriorityAssigner: Send + Sync {
    /// Must return a value in `[0, 100)`.
    fn assign(&self, submission: &ProjectSubmission) -> f64;
}

/// Uniform draw from `[0, 100)`, independent of the submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPriority;

impl PriorityAssigner for RandomPriority {
    fn assign(&self, _submission: &ProjectSubmission) -> f64 {
        rand::thread_rng().gen_range(0.0..100.0)
    }
}

/// Same score for every submission; used for reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriority(f64);

impl FixedPriority {
    pub fn new(score: f64) -> Self {
        let bounded = if score.is_finite() {
            score.clamp(0.0, 99.99)
        } else {
            0.0
        };
        Self(bounded)
    }
}

impl PriorityAssigner for FixedPriority {
    fn assign(&self, _submission: &ProjectSubmission) -> f64 {
        self.0
    }
}
