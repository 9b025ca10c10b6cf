//! Small value types shared by several properties.

use serde_json::Value;

use crate::error::ValidationError;
use crate::validate::{as_object, field, in_range, join, nested, require_keys};

/// A rational number encoded as `{"num": .., "denom": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    pub fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    /// Decode a rational with unsigned 32-bit components (frame rates, squeeze).
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["num", "denom"], path, errors) {
            return None;
        }

        let num: Option<u32> = field(object, "num", path, errors);
        let denom: Option<u32> = field(object, "denom", path, errors);
        Some(Self::new(num?.into(), denom?.into()))
    }

    /// Value as a float, or `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        (self.denom != 0).then(|| self.num as f64 / self.denom as f64)
    }
}

/// Width and height, in pixels or microns depending on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["width", "height"], path, errors) {
            return None;
        }

        let width = field(object, "width", path, errors);
        let height = field(object, "height", path, errors);
        Some(Self {
            width: width?,
            height: height?,
        })
    }
}

/// PTP timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Timestamp {
    pub seconds: u64,
    pub nanoseconds: u32,
    /// Zero when the sender omits it.
    pub attoseconds: u32,
}

impl Timestamp {
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["seconds", "nanoseconds"], path, errors) {
            return None;
        }

        let seconds = field(object, "seconds", path, errors);
        let nanoseconds = field(object, "nanoseconds", path, errors);
        let attoseconds = field(object, "attoseconds", path, errors);
        Some(Self {
            seconds: seconds?,
            nanoseconds: nanoseconds?,
            attoseconds: attoseconds.unwrap_or(0),
        })
    }
}

/// Frame rate and field flags of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct TimecodeFormat {
    pub frame_rate: Rational,
    pub drop_frame: bool,
    pub odd_field: Option<bool>,
}

impl TimecodeFormat {
    fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["frameRate", "dropFrame"], path, errors) {
            return None;
        }

        let frame_rate = nested(object, "frameRate", path, errors, Rational::decode);
        let drop_frame = field(object, "dropFrame", path, errors);
        let odd_field = field(object, "oddField", path, errors);
        Some(Self {
            frame_rate: frame_rate?,
            drop_frame: drop_frame?,
            odd_field,
        })
    }
}

/// SMPTE-style timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
    pub format: TimecodeFormat,
}

impl Timecode {
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["hours", "minutes", "seconds", "frames", "format"], path, errors) {
            return None;
        }

        let hours: Option<u8> = field(object, "hours", path, errors);
        let hours = in_range(hours, 0, 23, &join(path, "hours"), errors);
        let minutes: Option<u8> = field(object, "minutes", path, errors);
        let minutes = in_range(minutes, 0, 59, &join(path, "minutes"), errors);
        let seconds: Option<u8> = field(object, "seconds", path, errors);
        let seconds = in_range(seconds, 0, 59, &join(path, "seconds"), errors);
        let frames: Option<u8> = field(object, "frames", path, errors);
        let format = nested(object, "format", path, errors, TimecodeFormat::decode);

        Some(Self {
            hours: hours?,
            minutes: minutes?,
            seconds: seconds?,
            frames: frames?,
            format: format?,
        })
    }
}

/// Translation or scale in metres along X, Y, Z.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["x", "y", "z"], path, errors) {
            return None;
        }

        let x = field(object, "x", path, errors);
        let y = field(object, "y", path, errors);
        let z = field(object, "z", path, errors);
        Some(Self { x: x?, y: y?, z: z? })
    }
}

/// Euler angles in degrees, applied intrinsically in ZXY order.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Rotation {
    pub pan: f64,
    pub tilt: f64,
    pub roll: f64,
}

impl Rotation {
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["pan", "tilt", "roll"], path, errors) {
            return None;
        }

        let pan = field(object, "pan", path, errors);
        let tilt = field(object, "tilt", path, errors);
        let roll = field(object, "roll", path, errors);
        Some(Self {
            pan: pan?,
            tilt: tilt?,
            roll: roll?,
        })
    }
}

/// One node of a transform hierarchy.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Rotation,
    pub scale: Option<Vector3>,
    pub transform_id: Option<String>,
    pub parent_transform_id: Option<String>,
}

impl Transform {
    pub fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["translation", "rotation"], path, errors) {
            return None;
        }

        let translation = nested(object, "translation", path, errors, Vector3::decode);
        let rotation = nested(object, "rotation", path, errors, Rotation::decode);
        let scale = nested(object, "scale", path, errors, Vector3::decode);
        let transform_id = field(object, "transformId", path, errors);
        let parent_transform_id = field(object, "parentTransformId", path, errors);

        Some(Self {
            translation: translation?,
            rotation: rotation?,
            scale,
            transform_id,
            parent_transform_id,
        })
    }
}
