use serde_json::Value;

use crate::error::ValidationError;
use crate::types::Rational;
use crate::validate::{as_object, field, section};

const PATH: &str = "static/duration";

/// Duration of the clip in seconds (`static.duration`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Duration {
    pub rational: Rational,
}

impl Duration {
    /// Both `num` and `denom` are required unsigned 32-bit values.
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(section(root, &["static", "duration"])?, PATH, errors)?;

        let num: Option<u32> = field(object, "num", PATH, errors);
        let denom: Option<u32> = field(object, "denom", PATH, errors);

        match (num, denom) {
            (Some(num), Some(denom)) => Some(Duration {
                rational: Rational::new(num.into(), denom.into()),
            }),
            _ => {
                errors.push(ValidationError::MissingRequired { path: PATH.to_owned() });
                None
            }
        }
    }

    pub fn seconds(&self) -> Option<f64> {
        self.rational.to_f64()
    }
}
