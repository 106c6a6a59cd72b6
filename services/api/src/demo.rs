use crate::infra::ProgramServices;
use clap::Args;
use pmajay_gia::config::ProgramConfig;
use pmajay_gia::error::AppError;
use pmajay_gia::programs::beneficiaries::{
    assess, BeneficiaryCsvImporter, BeneficiaryFilter, CasteCategory, EducationLevel,
    EligibilityProfile, VerificationPatch,
};
use pmajay_gia::programs::projects::{ProjectSubmission, StatusPatch, TransitionPolicy};
use pmajay_gia::programs::training::{EnrollmentRequest, ProgramFilter};
use std::path::PathBuf;

const DEMO_BENEFICIARIES: &str = include_str!("../data/demo_beneficiaries.csv");

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Annual household income in rupees
    #[arg(long)]
    pub(crate) income: f64,
    /// Highest education level, e.g. "Higher Secondary"
    #[arg(long)]
    pub(crate) education: String,
    /// Number of people in the household
    #[arg(long)]
    pub(crate) family_size: u32,
    /// Social category: SC, ST, OBC or General
    #[arg(long, value_parser = parse_caste)]
    pub(crate) caste: CasteCategory,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Beneficiary CSV to load instead of the bundled sample
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Reject status changes outside the documented project lifecycle
    #[arg(long)]
    pub(crate) strict: bool,
}

fn parse_caste(raw: &str) -> Result<CasteCategory, String> {
    CasteCategory::parse(raw).ok_or_else(|| format!("unknown caste category '{raw}'"))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let profile = EligibilityProfile {
        annual_income: args.income,
        education_level: EducationLevel::parse(args.education.trim()),
        family_size: args.family_size,
        caste_category: args.caste,
    };

    let assessment = assess(&profile);
    println!("Eligibility score: {}/100", assessment.total);
    for component in &assessment.components {
        println!(
            "- {:<15} {:>3}  ({})",
            component.criterion.label(),
            component.points,
            component.notes
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { csv, strict } = args;
    let config = ProgramConfig {
        transition_policy: if strict {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        },
        seed_catalog: true,
    };
    let services = ProgramServices::in_memory(&config)?;

    println!("Grant-in-aid program demo");
    let registrations = match csv {
        Some(path) => BeneficiaryCsvImporter::read_path(path)?,
        None => BeneficiaryCsvImporter::read(DEMO_BENEFICIARIES.as_bytes())?,
    };
    let summary = BeneficiaryCsvImporter::register_all(&*services.beneficiaries, registrations);
    println!(
        "- Registered {} beneficiaries, rejected {}",
        summary.registered.len(),
        summary.rejected.len()
    );
    for rejected in &summary.rejected {
        println!("  row {}: {}", rejected.row, rejected.reason);
    }

    let ranked = services.beneficiaries.list(&BeneficiaryFilter::default())?;
    println!("\nEligibility ranking");
    for beneficiary in &ranked {
        println!(
            "  - {:>3}  {} ({}, {})",
            beneficiary.eligibility_score,
            beneficiary.name,
            beneficiary.district,
            beneficiary.state
        );
    }

    let Some(top) = ranked.first() else {
        println!("No beneficiaries registered; nothing else to show");
        return Ok(());
    };

    services.beneficiaries.verify(
        &top.id,
        &VerificationPatch {
            status: Some("verified".to_string()),
            remarks: Some("Documents checked during demo".to_string()),
        },
    )?;
    println!("\n{} verified", top.name);

    let project = services.projects.submit(ProjectSubmission {
        beneficiary_id: top.id.0.clone(),
        project_type: "Livelihood".to_string(),
        title: "Community tailoring unit".to_string(),
        description: Some("Sewing machines, cutting table and first stock of fabric".to_string()),
        category: "Income Generation".to_string(),
        requested_amount: Some(75_000.0),
    })?;
    println!(
        "- Project '{}' submitted (priority {:.2})",
        project.title, project.priority_score
    );

    for patch in [
        StatusPatch::approve(60_000.0).with_remarks("Approved at district review"),
        StatusPatch::progress(40),
        StatusPatch::progress(100).with_remarks("Unit operational"),
    ] {
        let updated = services.projects.update_status(&project.id, &patch)?;
        println!(
            "  -> {} | {}% complete | approved {:.0}",
            updated.status, updated.completion_percentage, updated.approved_amount
        );
    }

    if let Some(program) = services
        .training
        .programs(&ProgramFilter::default())?
        .into_iter()
        .next()
    {
        services.training.enroll(EnrollmentRequest {
            beneficiary_id: top.id.0.clone(),
            training_program_id: program.id.0.clone(),
        })?;
        println!("- {} enrolled in {}", top.name, program.name);
    }

    let stats = services.analytics.dashboard()?;
    println!("\nDashboard");
    println!(
        "- {} beneficiaries ({} verified), average score {:.2}",
        stats.total_beneficiaries, stats.verified_beneficiaries, stats.avg_eligibility_score
    );
    println!(
        "- {} projects: {} active, {} completed, {:.0} approved funding",
        stats.total_projects,
        stats.active_projects,
        stats.completed_projects,
        stats.total_funding_approved
    );
    println!("Top states:");
    for state in &stats.top_states {
        println!("  - {}: {}", state.state, state.count);
    }

    let distribution = services.analytics.distribution()?;
    println!("Income brackets:");
    for bracket in &distribution.by_income {
        println!("  - {}: {}", bracket.income_bracket_label, bracket.count);
    }

    Ok(())
}
