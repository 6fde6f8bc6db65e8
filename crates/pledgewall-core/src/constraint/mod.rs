//! Pledge form validation.
//!
//! Field validators are pure and never fail: each returns a [`FieldCheck`]
//! carrying an optional [`ValidationError`](crate::error::ValidationError)
//! and, for email, an advisory suggestion. [`validate_form`] composes them,
//! and [`PledgeForm::into_draft`] is the only way from raw form input to a
//! typed [`PledgeDraft`](crate::catalog::PledgeDraft).

mod field;
mod form;
mod validator;

pub use field::{FieldCheck, FormField, FormValidation};
pub use form::PledgeForm;
pub use validator::{
    format_mobile, mobile_digits, validate_commitments, validate_email, validate_form,
    validate_mobile, validate_name, validate_profile_type, validate_state,
};
