//! Eligibility rubric applied once when a beneficiary registers.
//!
//! The score is the sum of four independent criteria on a 0-100 scale: income
//! (40), education (20), family size (20), and a Scheduled Caste bonus (20).
//! Inputs the rubric does not recognize fall back to neutral weights, so
//! scoring never fails.

use serde::{Deserialize, Serialize};

use super::domain::{CasteCategory, EducationLevel};

/// Attributes the rubric reads. Every other beneficiary field is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityProfile {
    pub annual_income: f64,
    pub education_level: EducationLevel,
    pub family_size: u32,
    pub caste_category: CasteCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCriterion {
    Income,
    Education,
    FamilySize,
    CasteCategory,
}

impl EligibilityCriterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Education => "Education",
            Self::FamilySize => "Family size",
            Self::CasteCategory => "Caste category",
        }
    }
}

/// Annual income bands shared by the rubric and the distribution report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBracket {
    Below50k,
    From50kTo100k,
    From100kTo150k,
    Above150k,
}

impl IncomeBracket {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Below50k,
            Self::From50kTo100k,
            Self::From100kTo150k,
            Self::Above150k,
        ]
    }

    pub fn for_income(annual_income: f64) -> Self {
        if annual_income < 50_000.0 {
            Self::Below50k
        } else if annual_income < 100_000.0 {
            Self::From50kTo100k
        } else if annual_income < 150_000.0 {
            Self::From100kTo150k
        } else {
            Self::Above150k
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Below50k => "Below 50k",
            Self::From50kTo100k => "50k-100k",
            Self::From100kTo150k => "100k-150k",
            Self::Above150k => "Above 150k",
        }
    }

    pub const fn points(self) -> u8 {
        match self {
            Self::Below50k => 40,
            Self::From50kTo100k => 30,
            Self::From100kTo150k => 20,
            Self::Above150k => 10,
        }
    }
}

const UNRECOGNIZED_EDUCATION_POINTS: u8 = 10;

fn education_points(level: &EducationLevel) -> u8 {
    match level {
        EducationLevel::NoFormalEducation => 20,
        EducationLevel::Primary => 18,
        EducationLevel::Secondary => 15,
        EducationLevel::HigherSecondary => 12,
        EducationLevel::Graduate => 8,
        EducationLevel::PostGraduate => 5,
        EducationLevel::Unrecognized(_) => UNRECOGNIZED_EDUCATION_POINTS,
    }
}

fn family_size_points(family_size: u32) -> u8 {
    if family_size > 6 {
        20
    } else if family_size > 4 {
        15
    } else {
        10
    }
}

fn caste_points(caste_category: CasteCategory) -> u8 {
    match caste_category {
        CasteCategory::Sc => 20,
        CasteCategory::St | CasteCategory::Obc | CasteCategory::General => 0,
    }
}

/// Contribution of one criterion to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: EligibilityCriterion,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

/// Scores a profile and keeps the per-criterion trail.
pub fn assess(profile: &EligibilityProfile) -> EligibilityAssessment {
    let bracket = IncomeBracket::for_income(profile.annual_income);
    let education = education_points(&profile.education_level);
    let family = family_size_points(profile.family_size);
    let caste = caste_points(profile.caste_category);

    let education_note = match &profile.education_level {
        EducationLevel::Unrecognized(raw) if raw.is_empty() => {
            "education not provided, neutral weight".to_string()
        }
        EducationLevel::Unrecognized(raw) => format!("unrecognized education '{raw}', neutral weight"),
        known => format!("education {}", known.label()),
    };

    let components = vec![
        ScoreComponent {
            criterion: EligibilityCriterion::Income,
            points: bracket.points(),
            notes: format!("annual income bracket {}", bracket.label()),
        },
        ScoreComponent {
            criterion: EligibilityCriterion::Education,
            points: education,
            notes: education_note,
        },
        ScoreComponent {
            criterion: EligibilityCriterion::FamilySize,
            points: family,
            notes: format!("family of {}", profile.family_size),
        },
        ScoreComponent {
            criterion: EligibilityCriterion::CasteCategory,
            points: caste,
            notes: format!("category {}", profile.caste_category.label()),
        },
    ];

    let total = components.iter().map(|component| component.points).sum();

    EligibilityAssessment { total, components }
}

/// Total eligibility score in `0..=100`.
pub fn compute_eligibility_score(profile: &EligibilityProfile) -> u8 {
    assess(profile).total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        annual_income: f64,
        education: &str,
        family_size: u32,
        caste_category: CasteCategory,
    ) -> EligibilityProfile {
        EligibilityProfile {
            annual_income,
            education_level: EducationLevel::parse(education),
            family_size,
            caste_category,
        }
    }

    #[test]
    fn most_disadvantaged_profile_scores_full_marks() {
        let score = compute_eligibility_score(&profile(
            28_000.0,
            "No formal education",
            7,
            CasteCategory::Sc,
        ));
        assert_eq!(score, 100);
    }

    #[test]
    fn least_disadvantaged_profile_scores_floor() {
        for caste in [CasteCategory::St, CasteCategory::Obc, CasteCategory::General] {
            let score = compute_eligibility_score(&profile(150_000.0, "Post Graduate", 4, caste));
            assert_eq!(score, 25, "{caste:?}");
        }
    }

    #[test]
    fn reference_registrations_score_as_documented() {
        let rajesh = profile(45_000.0, "Secondary", 6, CasteCategory::Sc);
        assert_eq!(compute_eligibility_score(&rajesh), 90);

        let graduate = profile(80_000.0, "Graduate", 4, CasteCategory::Sc);
        assert_eq!(compute_eligibility_score(&graduate), 68);
    }

    #[test]
    fn unknown_education_contributes_neutral_weight() {
        for raw in ["", "Diploma", "graduate", " Primary"] {
            let assessment = assess(&profile(200_000.0, raw, 1, CasteCategory::General));
            let education = assessment
                .components
                .iter()
                .find(|component| component.criterion == EligibilityCriterion::Education)
                .expect("education component present");
            assert_eq!(education.points, 10, "{raw:?}");
            assert_eq!(assessment.total, 30);
        }
    }

    #[test]
    fn income_band_edges_fall_into_upper_band() {
        assert_eq!(IncomeBracket::for_income(49_999.99), IncomeBracket::Below50k);
        assert_eq!(IncomeBracket::for_income(50_000.0), IncomeBracket::From50kTo100k);
        assert_eq!(IncomeBracket::for_income(100_000.0), IncomeBracket::From100kTo150k);
        assert_eq!(IncomeBracket::for_income(150_000.0), IncomeBracket::Above150k);
    }

    #[test]
    fn score_never_increases_with_income() {
        let incomes = [0.0, 49_999.0, 50_000.0, 99_999.0, 100_000.0, 149_999.0, 150_000.0, 1e9];
        let scores: Vec<u8> = incomes
            .iter()
            .map(|income| {
                compute_eligibility_score(&profile(*income, "Primary", 3, CasteCategory::Obc))
            })
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
    }

    #[test]
    fn score_never_decreases_with_family_size() {
        let scores: Vec<u8> = (1..=10)
            .map(|size| compute_eligibility_score(&profile(60_000.0, "Graduate", size, CasteCategory::St)))
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "{scores:?}");
        assert_eq!(scores[3], scores[0]);
        assert_eq!(scores[4], scores[0] + 5);
        assert_eq!(scores[6], scores[0] + 10);
    }

    #[test]
    fn only_scheduled_caste_receives_bonus() {
        let base = profile(120_000.0, "Higher Secondary", 5, CasteCategory::General);
        let sc = EligibilityProfile {
            caste_category: CasteCategory::Sc,
            ..base.clone()
        };
        assert_eq!(
            compute_eligibility_score(&sc),
            compute_eligibility_score(&base) + 20
        );
    }

    #[test]
    fn non_numeric_income_degrades_to_lowest_band() {
        let score = compute_eligibility_score(&profile(f64::NAN, "Primary", 2, CasteCategory::Obc));
        assert_eq!(score, 10 + 18 + 10);
    }
}
