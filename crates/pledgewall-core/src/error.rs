//! Core error types.

use thiserror::Error;

/// Pledge store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    /// The backing store could not be read.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The updated collection could not be persisted.
    #[error("failed to save pledge: {0}")]
    StorageWrite(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Stored document was written by a newer schema.
    #[error("unsupported document version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in storage.
        found: u32,
        /// Highest version this build understands.
        supported: u32,
    },
}

impl Error {
    /// Whether the caller may retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Storage(_) | Error::StorageUnavailable(_) | Error::StorageWrite(_)
        )
    }
}

/// Field-level validation failures.
///
/// The `Display` text is the message shown next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Name must be less than 50 characters")]
    NameTooLong,
    #[error("Name can only contain letters and spaces")]
    NameInvalidCharacters,

    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailMalformed,

    #[error("Mobile number is required")]
    MobileRequired,
    #[error("Mobile number must be exactly 10 digits")]
    MobileWrongLength,
    #[error("Invalid Indian mobile number format")]
    MobileInvalidPrefix,

    #[error("Please select your state")]
    StateRequired,
    #[error("Please select a valid state")]
    StateUnknown,

    #[error("Please select your profile type")]
    ProfileTypeRequired,
    #[error("Invalid profile type")]
    ProfileTypeInvalid,

    #[error("Please select at least one commitment")]
    CommitmentsRequired,
    #[error("Maximum 9 commitments allowed")]
    CommitmentsTooMany,
    #[error("Unknown commitment: {0}")]
    CommitmentUnknown(String),
}
