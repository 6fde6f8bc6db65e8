//! Raw pledge form input.

use serde::Deserialize;

use crate::catalog::{Commitment, PledgeDraft, ProfileType};
use crate::error::ValidationError;

use super::field::{FormField, FormValidation};
use super::validator::{mobile_digits, validate_form};

/// Pledge form exactly as entered: every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PledgeForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: String,
    pub commitments: Vec<String>,
}

impl PledgeForm {
    /// Check the whole form.
    pub fn validate(&self) -> FormValidation {
        validate_form(self)
    }

    /// Validate and convert into a typed draft.
    ///
    /// Name and email are trimmed and the mobile number is reduced to its ten
    /// digits. On failure every failing field is reported.
    pub fn into_draft(self) -> Result<PledgeDraft, FormValidation> {
        let validation = self.validate();
        if !validation.is_valid() {
            return Err(validation);
        }

        let profile_type = self.profile_type.parse::<ProfileType>().map_err(|_| {
            FormValidation::single(FormField::ProfileType, ValidationError::ProfileTypeInvalid)
        })?;

        let commitments = self
            .commitments
            .iter()
            .map(|c| {
                c.parse::<Commitment>().map_err(|_| {
                    FormValidation::single(
                        FormField::Commitments,
                        ValidationError::CommitmentUnknown(c.clone()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PledgeDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: mobile_digits(&self.mobile),
            state: self.state,
            profile_type,
            commitments,
        })
    }
}
