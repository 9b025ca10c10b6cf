use serde_json::Value;

use crate::error::ValidationError;
use crate::types::Rational;
use crate::validate::{Object, as_object, field, nested, section};

const STATIC_PATH: &str = "static/lens";
const PATH: &str = "lens";

/// Radial and tangential coefficients of a (un)distortion model.
///
/// Materialised only when `radial` is present and valid.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Distortion {
    /// Spherical distortion coefficients k1..kN.
    pub radial: Vec<f64>,
    /// Tangential distortion coefficients p1..pN.
    pub tangential: Option<Vec<f64>>,
}

impl Distortion {
    fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        let radial = field(object, "radial", path, errors);
        let tangential = field(object, "tangential", path, errors);
        Some(Distortion {
            radial: radial?,
            tangential,
        })
    }
}

/// Shift of a projection centre in millimetres. Requires both axes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Shift {
    pub x: f64,
    pub y: f64,
}

impl Shift {
    fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        let x = field(object, "x", path, errors);
        let y = field(object, "y", path, errors);
        Some(Shift { x: x?, y: y? })
    }
}

/// Normalised (0-1) focus, iris and zoom encoder positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Encoders {
    pub focus: Option<f64>,
    pub iris: Option<f64>,
    pub zoom: Option<f64>,
}

/// Raw focus, iris and zoom encoder values, before homing or ranging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RawEncoders {
    pub focus: Option<u16>,
    pub iris: Option<u16>,
    pub zoom: Option<u16>,
}

macro_rules! encoder_group {
    ($ty:ty) => {
        impl $ty {
            /// Materialised when at least one axis is present and valid.
            fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
                let object = as_object(value, path, errors)?;
                let group = Self {
                    focus: field(object, "focus", path, errors),
                    iris: field(object, "iris", path, errors),
                    zoom: field(object, "zoom", path, errors),
                };
                (group != Self::default()).then_some(group)
            }
        }
    };
}

encoder_group!(Encoders);
encoder_group!(RawEncoders);

/// Exposure fall-off (vignetting) coefficients. Requires `a1`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ExposureFalloff {
    pub a1: f64,
    pub a2: Option<f64>,
    pub a3: Option<f64>,
}

impl ExposureFalloff {
    fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        let a1 = field(object, "a1", path, errors);
        let a2 = field(object, "a2", path, errors);
        let a3 = field(object, "a3", path, errors);
        Some(ExposureFalloff { a1: a1?, a2, a3 })
    }
}

/// Signed rational; materialised only when both `num` and `denom` are valid.
fn decode_pupil_offset(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Rational> {
    let object = as_object(value, path, errors)?;
    let num: Option<i64> = field(object, "num", path, errors);
    let denom: Option<i64> = field(object, "denom", path, errors);
    Some(Rational::new(num?, denom?))
}

/// Lens state, merged from `static.lens` and the per-sample `lens` section.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Lens {
    // static.lens
    pub firmware_version: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// Focal length printed on a prime lens, in millimetres.
    pub nominal_focal_length: Option<f64>,

    // lens
    /// Model-specific coefficients.
    pub custom: Option<Vec<f64>>,
    pub distortion: Option<Distortion>,
    pub distortion_overscan: Option<f64>,
    pub distortion_scale: Option<f64>,
    pub distortion_shift: Option<Shift>,
    pub encoders: Option<Encoders>,
    /// Entrance pupil position relative to the nominal imaging plane.
    pub entrance_pupil_offset: Option<Rational>,
    pub exposure_falloff: Option<ExposureFalloff>,
    pub f_stop: Option<u32>,
    /// Focal length in millimetres.
    pub focal_length: Option<f64>,
    /// Focus distance in millimetres.
    pub focus_distance: Option<u32>,
    pub perspective_shift: Option<Shift>,
    pub raw_encoders: Option<RawEncoders>,
    /// Units: 0.001.
    pub t_stop: Option<u32>,
    pub undistortion: Option<Distortion>,
}

impl Lens {
    /// Present if either `static.lens` or `lens` is present.
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let static_section = section(root, &["static", "lens"]);
        let dynamic_section = section(root, &[PATH]);
        if static_section.is_none() && dynamic_section.is_none() {
            return None;
        }

        let static_object = static_section.and_then(|v| as_object(v, STATIC_PATH, errors));
        let dynamic_object = dynamic_section.and_then(|v| as_object(v, PATH, errors));
        if static_object.is_none() && dynamic_object.is_none() {
            return None;
        }

        let mut lens = Lens::default();
        if let Some(object) = static_object {
            lens.read_static(object, errors);
        }
        if let Some(object) = dynamic_object {
            lens.read_dynamic(object, errors);
        }
        Some(lens)
    }

    fn read_static(&mut self, object: &Object, errors: &mut Vec<ValidationError>) {
        self.firmware_version = field(object, "firmwareVersion", STATIC_PATH, errors);
        self.make = field(object, "make", STATIC_PATH, errors);
        self.model = field(object, "model", STATIC_PATH, errors);
        self.nominal_focal_length = field(object, "nominalFocalLength", STATIC_PATH, errors);
        self.serial_number = field(object, "serialNumber", STATIC_PATH, errors);
    }

    fn read_dynamic(&mut self, object: &Object, errors: &mut Vec<ValidationError>) {
        self.custom = field(object, "custom", PATH, errors);
        self.distortion = nested(object, "distortion", PATH, errors, Distortion::decode);
        self.distortion_overscan = field(object, "distortionOverscan", PATH, errors);
        self.distortion_scale = field(object, "distortionScale", PATH, errors);
        self.distortion_shift = nested(object, "distortionShift", PATH, errors, Shift::decode);
        self.encoders = nested(object, "encoders", PATH, errors, Encoders::decode);
        self.entrance_pupil_offset = nested(object, "entrancePupilOffset", PATH, errors, decode_pupil_offset);
        self.exposure_falloff = nested(object, "exposureFalloff", PATH, errors, ExposureFalloff::decode);
        self.f_stop = field(object, "fStop", PATH, errors);
        self.focal_length = field(object, "focalLength", PATH, errors);
        self.focus_distance = field(object, "focusDistance", PATH, errors);
        self.perspective_shift = nested(object, "perspectiveShift", PATH, errors, Shift::decode);
        self.raw_encoders = nested(object, "rawEncoders", PATH, errors, RawEncoders::decode);
        self.t_stop = field(object, "tStop", PATH, errors);
        self.undistortion = nested(object, "undistortion", PATH, errors, Distortion::decode);
    }
}
