use serde_json::Value;

use crate::error::ValidationError;
use crate::validate::{PROTOCOL_VERSION, as_object, field, pattern_field, section};

const PATH: &str = "protocol";

/// Protocol identification (`protocol`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Protocol {
    pub name: String,
    /// `major.minor.patch`.
    pub version: String,
}

impl Protocol {
    /// Both fields are required. An invalid version discards the whole entity,
    /// including a valid name.
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(section(root, &[PATH])?, PATH, errors)?;

        for name in ["name", "version"] {
            if !object.contains_key(name) {
                errors.push(ValidationError::MissingField {
                    path: PATH.to_owned(),
                    name,
                });
            }
        }

        let name = field(object, "name", PATH, errors);
        let version = pattern_field(object, "version", PATH, &PROTOCOL_VERSION, errors);

        Some(Protocol {
            name: name?,
            version: version?,
        })
    }
}
