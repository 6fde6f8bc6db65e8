//! Validation result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ValidationError;

/// Outcome of checking a single field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldCheck {
    /// Why the value was rejected, if it was.
    pub error: Option<ValidationError>,
    /// Advisory correction. Never blocks submission.
    pub suggestion: Option<String>,
}

impl FieldCheck {
    /// A passing check with nothing to suggest.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A failing check.
    pub fn fail(error: ValidationError) -> Self {
        Self {
            error: Some(error),
            suggestion: None,
        }
    }

    /// A passing check carrying a suggestion.
    pub fn suggest(suggestion: impl Into<String>) -> Self {
        Self {
            error: None,
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The user-facing error message, if any.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// The six fields of the pledge form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Mobile,
    State,
    ProfileType,
    Commitments,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Mobile,
        FormField::State,
        FormField::ProfileType,
        FormField::Commitments,
    ];

    /// The form key for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Mobile => "mobile",
            FormField::State => "state",
            FormField::ProfileType => "profileType",
            FormField::Commitments => "commitments",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of checking the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValidation {
    errors: BTreeMap<FormField, ValidationError>,
}

impl FormValidation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one field check. Passing checks are ignored.
    pub fn record(&mut self, field: FormField, check: FieldCheck) {
        if let Some(error) = check.error {
            self.errors.insert(field, error);
        }
    }

    /// A validation failing on exactly one field.
    pub fn single(field: FormField, error: ValidationError) -> Self {
        let mut validation = Self::new();
        validation.errors.insert(field, error);
        validation
    }

    /// True only when every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: FormField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &BTreeMap<FormField, ValidationError> {
        &self.errors
    }

    /// Field to message map, the shape a front end renders.
    pub fn messages(&self) -> BTreeMap<FormField, String> {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.to_string()))
            .collect()
    }
}

impl fmt::Display for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("form is valid");
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect();
        write!(f, "invalid pledge form ({})", parts.join("; "))
    }
}

impl std::error::Error for FormValidation {}
