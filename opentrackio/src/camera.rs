use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{Dimensions, Rational};
use crate::validate::{UUID_URN, as_object, field, in_range, join, nested, pattern_field, section};

const PATH: &str = "static/camera";

/// Valid shutter angles, in thousandths of a degree.
pub const SHUTTER_ANGLE_RANGE: (i64, i64) = (1, 360_000);

/// Static camera description (`static.camera`).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Camera {
    /// Active area of the sensor, in microns.
    pub active_sensor_physical_dimensions: Option<Dimensions>,
    /// Photosite resolution of the active area, in pixels.
    pub active_sensor_resolution: Option<Dimensions>,
    /// Nominal height/width ratio of an axis-aligned square as captured.
    pub anamorphic_squeeze: Option<Rational>,
    pub firmware_version: Option<String>,
    pub label: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// Capture frame rate in Hz.
    pub capture_frame_rate: Option<Rational>,
    /// URN of the Framing Decision List used by the camera.
    pub fdl_link: Option<String>,
    /// Arithmetic ISO scale (ISO 12232).
    pub iso_speed: Option<u32>,
    /// Shutter speed as a fraction of the capture frame rate.
    pub shutter_angle: Option<u32>,
}

impl Camera {
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(section(root, &["static", "camera"])?, PATH, errors)?;

        let (min, max) = SHUTTER_ANGLE_RANGE;

        Some(Camera {
            active_sensor_physical_dimensions: nested(
                object,
                "activeSensorPhysicalDimensions",
                PATH,
                errors,
                Dimensions::decode,
            ),
            active_sensor_resolution: nested(object, "activeSensorResolution", PATH, errors, Dimensions::decode),
            anamorphic_squeeze: nested(object, "anamorphicSqueeze", PATH, errors, Rational::decode),
            firmware_version: field(object, "firmwareVersion", PATH, errors),
            label: field(object, "label", PATH, errors),
            make: field(object, "make", PATH, errors),
            model: field(object, "model", PATH, errors),
            serial_number: field(object, "serialNumber", PATH, errors),
            capture_frame_rate: nested(object, "captureFrameRate", PATH, errors, Rational::decode),
            fdl_link: pattern_field(object, "fdlLink", PATH, &UUID_URN, errors),
            iso_speed: field(object, "isoSpeed", PATH, errors),
            // Read wide so that negative or oversized angles are range errors.
            shutter_angle: in_range(
                field::<i64>(object, "shutterAngle", PATH, errors),
                min,
                max,
                &join(PATH, "shutterAngle"),
                errors,
            )
            .and_then(|angle| u32::try_from(angle).ok()),
        })
    }
}
