//! Field validators.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{is_known_state, Commitment, ProfileType};
use crate::error::ValidationError;

use super::field::{FieldCheck, FormField, FormValidation};
use super::form::PledgeForm;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s.]+$").expect("name pattern is valid"));

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Common domain misspellings and their corrections.
const DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("yahooo.com", "yahoo.com"),
    ("yaho.com", "yahoo.com"),
    ("outlok.com", "outlook.com"),
    ("hotmial.com", "hotmail.com"),
];

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
const MOBILE_DIGITS: usize = 10;
const MAX_COMMITMENTS: usize = Commitment::ALL.len();

/// Name: required, 2 to 50 characters once trimmed, letters, spaces and periods.
pub fn validate_name(name: &str) -> FieldCheck {
    let trimmed = name.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return FieldCheck::fail(ValidationError::NameRequired);
    }
    if len < NAME_MIN_CHARS {
        return FieldCheck::fail(ValidationError::NameTooShort);
    }
    if len > NAME_MAX_CHARS {
        return FieldCheck::fail(ValidationError::NameTooLong);
    }
    if !NAME_PATTERN.is_match(name) {
        return FieldCheck::fail(ValidationError::NameInvalidCharacters);
    }
    FieldCheck::ok()
}

/// Email: required and shaped like `local@domain.tld`.
///
/// A known misspelled domain still passes, with a suggestion attached.
pub fn validate_email(email: &str) -> FieldCheck {
    if email.trim().is_empty() {
        return FieldCheck::fail(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return FieldCheck::fail(ValidationError::EmailMalformed);
    }

    if let Some((local, domain)) = email.split_once('@') {
        let domain = domain.to_lowercase();
        if let Some((_, fixed)) = DOMAIN_TYPOS.iter().find(|(typo, _)| *typo == domain) {
            return FieldCheck::suggest(format!("Did you mean {}@{}?", local, fixed));
        }
    }
    FieldCheck::ok()
}

/// The ASCII digits of `mobile`, in order.
pub fn mobile_digits(mobile: &str) -> String {
    mobile.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mobile: ten digits once separators are stripped, starting with 6-9.
pub fn validate_mobile(mobile: &str) -> FieldCheck {
    if mobile.trim().is_empty() {
        return FieldCheck::fail(ValidationError::MobileRequired);
    }

    let digits = mobile_digits(mobile);
    if digits.len() != MOBILE_DIGITS {
        return FieldCheck::fail(ValidationError::MobileWrongLength);
    }
    if !matches!(digits.as_bytes()[0], b'6'..=b'9') {
        return FieldCheck::fail(ValidationError::MobileInvalidPrefix);
    }
    FieldCheck::ok()
}

/// Format a mobile number for display while it is being typed.
///
/// Up to five digits are returned as-is; beyond that a `-` follows the fifth
/// digit. Digits past the tenth are dropped.
pub fn format_mobile(mobile: &str) -> String {
    let digits: String = mobile_digits(mobile).chars().take(MOBILE_DIGITS).collect();
    if digits.len() <= 5 {
        digits
    } else {
        format!("{}-{}", &digits[..5], &digits[5..])
    }
}

/// State: required and present in the catalog.
pub fn validate_state(state: &str) -> FieldCheck {
    if state.is_empty() {
        return FieldCheck::fail(ValidationError::StateRequired);
    }
    if !is_known_state(state) {
        return FieldCheck::fail(ValidationError::StateUnknown);
    }
    FieldCheck::ok()
}

pub fn validate_profile_type(profile_type: &str) -> FieldCheck {
    if profile_type.is_empty() {
        return FieldCheck::fail(ValidationError::ProfileTypeRequired);
    }
    if profile_type.parse::<ProfileType>().is_err() {
        return FieldCheck::fail(ValidationError::ProfileTypeInvalid);
    }
    FieldCheck::ok()
}

/// Commitments: between one and nine catalog entries.
pub fn validate_commitments<S: AsRef<str>>(commitments: &[S]) -> FieldCheck {
    if commitments.is_empty() {
        return FieldCheck::fail(ValidationError::CommitmentsRequired);
    }
    if commitments.len() > MAX_COMMITMENTS {
        return FieldCheck::fail(ValidationError::CommitmentsTooMany);
    }
    if let Some(unknown) = commitments
        .iter()
        .map(AsRef::as_ref)
        .find(|c| c.parse::<Commitment>().is_err())
    {
        return FieldCheck::fail(ValidationError::CommitmentUnknown(unknown.to_string()));
    }
    FieldCheck::ok()
}

/// Run every field validator over the form.
pub fn validate_form(form: &PledgeForm) -> FormValidation {
    let mut validation = FormValidation::new();
    for field in FormField::ALL {
        let check = match field {
            FormField::Name => validate_name(&form.name),
            FormField::Email => validate_email(&form.email),
            FormField::Mobile => validate_mobile(&form.mobile),
            FormField::State => validate_state(&form.state),
            FormField::ProfileType => validate_profile_type(&form.profile_type),
            FormField::Commitments => validate_commitments(&form.commitments),
        };
        validation.record(field, check);
    }
    validation
}
