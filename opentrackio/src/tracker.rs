use serde_json::Value;

use crate::error::ValidationError;
use crate::validate::{Object, as_object, field, section};

const STATIC_PATH: &str = "static/tracker";
const PATH: &str = "tracker";

/// Tracking device description and state, merged from `static.tracker` and
/// the per-sample `tracker` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Tracker {
    pub firmware_version: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,

    /// Free-form notes about tracking.
    pub notes: Option<String>,
    /// Whether the system is recording data, e.g. for post-production.
    pub recording: Option<bool>,
    /// Slate identifier, e.g. `A101_A_4`.
    pub slate: Option<String>,
    pub status: Option<String>,
}

impl Tracker {
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let static_section = section(root, &["static", "tracker"]);
        let dynamic_section = section(root, &[PATH]);
        if static_section.is_none() && dynamic_section.is_none() {
            return None;
        }

        let static_object = static_section.and_then(|v| as_object(v, STATIC_PATH, errors));
        let dynamic_object = dynamic_section.and_then(|v| as_object(v, PATH, errors));
        if static_object.is_none() && dynamic_object.is_none() {
            return None;
        }

        let mut tracker = Tracker::default();
        if let Some(object) = static_object {
            tracker.read_static(object, errors);
        }
        if let Some(object) = dynamic_object {
            tracker.read_dynamic(object, errors);
        }
        Some(tracker)
    }

    fn read_static(&mut self, object: &Object, errors: &mut Vec<ValidationError>) {
        self.firmware_version = field(object, "firmwareVersion", STATIC_PATH, errors);
        self.make = field(object, "make", STATIC_PATH, errors);
        self.model = field(object, "model", STATIC_PATH, errors);
        self.serial_number = field(object, "serialNumber", STATIC_PATH, errors);
    }

    fn read_dynamic(&mut self, object: &Object, errors: &mut Vec<ValidationError>) {
        self.notes = field(object, "notes", PATH, errors);
        self.recording = field(object, "recording", PATH, errors);
        self.slate = field(object, "slate", PATH, errors);
        self.status = field(object, "status", PATH, errors);
    }
}
