use chrono::{DateTime, Utc};

use super::domain::{Beneficiary, BeneficiaryId, BeneficiaryRegistration, VerificationStatus};
use super::eligibility::{compute_eligibility_score, EligibilityProfile};
use crate::programs::error::ValidationError;

fn required_text(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Validates a registration and builds the stored record, scoring it exactly once.
pub(crate) fn beneficiary_from_registration(
    registration: BeneficiaryRegistration,
    id: BeneficiaryId,
    now: DateTime<Utc>,
) -> Result<Beneficiary, ValidationError> {
    let BeneficiaryRegistration {
        name,
        age,
        gender,
        state,
        district,
        caste_category,
        aadhar_number,
        phone,
        email,
        education_level,
        annual_income,
        family_size,
        occupation,
        skills,
        bank_account,
        ifsc_code,
    } = registration;

    let name = required_text(name, "name")?;
    let age = age.ok_or(ValidationError::MissingField("age"))?;
    if age == 0 {
        return Err(ValidationError::InvalidAge);
    }
    let gender = required_text(gender, "gender")?;
    let state = required_text(state, "state")?;
    let district = required_text(district, "district")?;
    let caste_category = caste_category.ok_or(ValidationError::MissingField("caste_category"))?;
    let aadhar_number = required_text(aadhar_number, "aadhar_number")?;
    let phone = required_text(phone, "phone")?;

    let annual_income = annual_income.ok_or(ValidationError::MissingField("annual_income"))?;
    if !annual_income.is_finite() || annual_income < 0.0 {
        return Err(ValidationError::InvalidIncome);
    }

    let family_size = family_size.ok_or(ValidationError::MissingField("family_size"))?;
    if family_size == 0 {
        return Err(ValidationError::InvalidFamilySize);
    }

    let eligibility_score = compute_eligibility_score(&EligibilityProfile {
        annual_income,
        education_level: education_level.clone(),
        family_size,
        caste_category,
    });

    Ok(Beneficiary {
        id,
        name,
        age,
        gender,
        state,
        district,
        caste_category,
        aadhar_number,
        phone,
        email: optional_text(email),
        education_level,
        annual_income,
        family_size,
        occupation: optional_text(occupation),
        skills: optional_text(skills),
        bank_account: optional_text(bank_account),
        ifsc_code: optional_text(ifsc_code),
        verification_status: VerificationStatus::Pending,
        eligibility_score,
        registration_date: now,
        last_updated: now,
    })
}
