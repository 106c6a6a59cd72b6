use chrono::NaiveDate;
use uuid::Uuid;

use super::domain::{DemandLevel, ProgramId, ProgramStatus, Skill, TrainingProgram};

fn skill(name: &str, category: &str, demand_level: DemandLevel, avg_income_potential: f64) -> Skill {
    Skill {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        category: category.to_string(),
        demand_level,
        avg_income_potential: Some(avg_income_potential),
    }
}

/// Skills offered when the catalog is first seeded.
pub fn default_skills() -> Vec<Skill> {
    vec![
        skill("Tailoring", "Income Generation", DemandLevel::High, 15_000.0),
        skill("Plumbing", "Skill Development", DemandLevel::High, 20_000.0),
        skill("Carpentry", "Skill Development", DemandLevel::Medium, 18_000.0),
        skill("Beauty & Wellness", "Income Generation", DemandLevel::High, 16_000.0),
        skill("Mobile Repair", "Skill Development", DemandLevel::High, 22_000.0),
        skill("Food Processing", "Income Generation", DemandLevel::Medium, 14_000.0),
        skill("Computer Basics", "Skill Development", DemandLevel::High, 25_000.0),
        skill("Dairy Farming", "Income Generation", DemandLevel::Medium, 30_000.0),
    ]
}

/// Training programs open when the catalog is first seeded.
pub fn default_training_programs() -> Vec<TrainingProgram> {
    vec![
        TrainingProgram {
            id: ProgramId::generate(),
            name: "Advanced Tailoring Course".to_string(),
            skill_category: "Income Generation".to_string(),
            duration_days: 90,
            provider: "National Skill Development Corporation".to_string(),
            location: "Delhi".to_string(),
            capacity: 30,
            enrolled_count: 12,
            start_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 30),
            status: ProgramStatus::Open,
        },
        TrainingProgram {
            id: ProgramId::generate(),
            name: "Digital Marketing Bootcamp".to_string(),
            skill_category: "Skill Development".to_string(),
            duration_days: 60,
            provider: "PM Kaushal Vikas Yojana".to_string(),
            location: "Mumbai".to_string(),
            capacity: 25,
            enrolled_count: 8,
            start_date: NaiveDate::from_ymd_opt(2025, 11, 15),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            status: ProgramStatus::Open,
        },
    ]
}
