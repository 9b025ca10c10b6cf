use serde_json::Value;

use crate::error::ValidationError;
use crate::validate::{FromJson, UUID_URN, join, matches_pattern, section};

/// Unique identifier of the sample carrying the data (`sampleId`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SampleId(pub String);

/// Identifier of the stream a sample belongs to (`streamId`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StreamId(pub String);

/// IDs of samples related to this one (`relatedSampleIds`).
///
/// The related samples are not guaranteed to exist.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RelatedSampleIds(pub Vec<String>);

/// Read a top-level UUID URN string.
fn uuid_urn(root: &Value, key: &str, errors: &mut Vec<ValidationError>) -> Option<String> {
    let value = section(root, &[key])?;
    let Some(s) = String::from_json(value) else {
        errors.push(ValidationError::TypeMismatch {
            path: key.to_owned(),
            expected: String::EXPECTED,
        });
        return None;
    };
    matches_pattern(s, key, &UUID_URN, errors)
}

impl SampleId {
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        uuid_urn(root, "sampleId", errors).map(SampleId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StreamId {
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        uuid_urn(root, "streamId", errors).map(StreamId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RelatedSampleIds {
    /// Invalid elements are skipped individually; the rest are kept in order.
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        const PATH: &str = "relatedSampleIds";

        let value = section(root, &[PATH])?;
        let Some(items) = value.as_array() else {
            errors.push(ValidationError::TypeMismatch {
                path: PATH.to_owned(),
                expected: "array",
            });
            return None;
        };

        let mut ids = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let path = join(PATH, &i.to_string());
            let Some(s) = String::from_json(item) else {
                errors.push(ValidationError::TypeMismatch {
                    path,
                    expected: String::EXPECTED,
                });
                continue;
            };
            if let Some(id) = matches_pattern(s, &path, &UUID_URN, errors) {
                ids.push(id);
            }
        }

        Some(RelatedSampleIds(ids))
    }
}
