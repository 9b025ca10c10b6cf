use serde_json::Value;

use crate::error::ValidationError;
use crate::validate::{as_object, field, section};

const PATH: &str = "globalStage";

/// Position of the stage origin in global ENU and geodetic coordinates.
///
/// May be dynamic, e.g. when the stage is inside a moving vehicle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GlobalStage {
    pub e: f64,
    pub n: f64,
    pub u: f64,
    pub lat0: f64,
    pub lon0: f64,
    pub h0: f64,
}

impl GlobalStage {
    /// All six coordinates are required; every one is checked so each problem is reported.
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(section(root, &[PATH])?, PATH, errors)?;

        let mut coordinate = |name: &'static str| -> Option<f64> {
            if !object.contains_key(name) {
                errors.push(ValidationError::MissingField {
                    path: PATH.to_owned(),
                    name,
                });
                return None;
            }
            field(object, name, PATH, errors)
        };

        let e = coordinate("E");
        let n = coordinate("N");
        let u = coordinate("U");
        let lat0 = coordinate("lat0");
        let lon0 = coordinate("lon0");
        let h0 = coordinate("h0");

        Some(GlobalStage {
            e: e?,
            n: n?,
            u: u?,
            lat0: lat0?,
            lon0: lon0?,
            h0: h0?,
        })
    }
}
