//! The persisted document holding the pledge collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Pledge;
use crate::error::Error;

/// Current document layout version.
pub const DOCUMENT_VERSION: u32 = 1;

/// Version assigned to bare-array documents written before versioning.
pub const LEGACY_VERSION: u32 = 0;

/// Versioned envelope around the pledge collection, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PledgeDocument {
    pub version: u32,
    pub pledges: Vec<Pledge>,
}

impl PledgeDocument {
    /// Wrap a collection in a current-version document.
    pub fn new(pledges: Vec<Pledge>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            pledges,
        }
    }

    /// Serialize to JSON. Always writes the current version.
    pub fn to_json(&self) -> Result<String, Error> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            version: u32,
            pledges: &'a [Pledge],
        }

        serde_json::to_string(&Envelope {
            version: DOCUMENT_VERSION,
            pledges: &self.pledges,
        })
        .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parse a stored document.
    ///
    /// Accepts the versioned envelope and the legacy bare array. Documents
    /// from a newer version are rejected with [`Error::UnsupportedVersion`].
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::Deserialization(e.to_string()))?;

        match value {
            Value::Array(_) => {
                let pledges: Vec<Pledge> = serde_json::from_value(value)
                    .map_err(|e| Error::Deserialization(e.to_string()))?;
                Ok(Self {
                    version: LEGACY_VERSION,
                    pledges,
                })
            }
            Value::Object(ref fields) => {
                let version = fields
                    .get("version")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| Error::Deserialization("missing document version".into()))?;
                if version > u64::from(DOCUMENT_VERSION) {
                    return Err(Error::UnsupportedVersion {
                        found: u32::try_from(version).unwrap_or(u32::MAX),
                        supported: DOCUMENT_VERSION,
                    });
                }
                serde_json::from_value(value).map_err(|e| Error::Deserialization(e.to_string()))
            }
            _ => Err(Error::Deserialization(
                "expected a pledge document or array".into(),
            )),
        }
    }

    /// Whether the document predates versioning.
    pub fn is_legacy(&self) -> bool {
        self.version == LEGACY_VERSION
    }
}
