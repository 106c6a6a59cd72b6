//! Grant-in-aid program administration: beneficiary registration and
//! eligibility scoring, project funding lifecycle, skills training, audit
//! trail, and reporting.

pub mod config;
pub mod error;
pub mod programs;
pub mod telemetry;
