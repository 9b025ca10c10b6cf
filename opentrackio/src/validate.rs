//! Shared extraction routines used by every decoder.
//!
//! Each helper follows the same contract: a missing key is silent and yields
//! `None`; a key that is present but unusable appends one [`ValidationError`]
//! and also yields `None`.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;

pub type Object = Map<String, Value>;

/// `urn:uuid:` followed by a lowercase 8-4-4-4-12 hex UUID.
pub static UUID_URN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("UUID URN pattern")
});

/// Three dot-separated non-negative integers, e.g. `1.0.1`.
pub static PROTOCOL_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("protocol version pattern"));

/// Six colon-separated uppercase hex byte pairs.
pub static MAC_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-F0-9]{2}:){5}[A-F0-9]{2}$").expect("MAC address pattern"));

/// A JSON kind that a single field can be converted into.
pub trait FromJson: Sized {
    /// Name of the expected kind, as it appears in diagnostics.
    const EXPECTED: &'static str;

    fn from_json(value: &Value) -> Option<Self>;
}

impl FromJson for String {
    const EXPECTED: &'static str = "string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromJson for bool {
    const EXPECTED: &'static str = "bool";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromJson for f64 {
    const EXPECTED: &'static str = "double";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromJson for i64 {
    const EXPECTED: &'static str = "int64";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromJson for u64 {
    const EXPECTED: &'static str = "uint64";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

macro_rules! narrow_unsigned {
    ($ty:ty, $name:literal) => {
        impl FromJson for $ty {
            const EXPECTED: &'static str = $name;

            fn from_json(value: &Value) -> Option<Self> {
                value.as_u64().and_then(|v| <$ty>::try_from(v).ok())
            }
        }
    };
}

narrow_unsigned!(u8, "uint8");
narrow_unsigned!(u16, "uint16");
narrow_unsigned!(u32, "uint32");

impl FromJson for Vec<f64> {
    const EXPECTED: &'static str = "array of double";

    fn from_json(value: &Value) -> Option<Self> {
        populate_sequence(value.as_array()?)
    }
}

/// Join a parent path and a key into a diagnostic path.
pub fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}/{name}")
    }
}

/// Convert every element of `array`, failing on the first one that doesn't fit.
///
/// All-or-nothing: callers report a single error for the whole sequence.
pub fn populate_sequence<T: FromJson>(array: &[Value]) -> Option<Vec<T>> {
    array.iter().map(T::from_json).collect()
}

/// Read an optional field of a fixed JSON kind.
pub fn field<T: FromJson>(
    object: &Object,
    name: &str,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    let value = object.get(name)?;
    let converted = T::from_json(value);
    if converted.is_none() {
        errors.push(ValidationError::TypeMismatch {
            path: join(path, name),
            expected: T::EXPECTED,
        });
    }
    converted
}

/// Read an optional string field that must fully match `pattern`.
pub fn pattern_field(
    object: &Object,
    name: &str,
    path: &str,
    pattern: &Regex,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let value: String = field(object, name, path, errors)?;
    matches_pattern(value, &join(path, name), pattern, errors)
}

/// Check an already-extracted string against `pattern`.
pub fn matches_pattern(
    value: String,
    path: &str,
    pattern: &Regex,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    if pattern.is_match(&value) {
        Some(value)
    } else {
        errors.push(ValidationError::PatternMismatch { path: path.to_owned() });
        None
    }
}

/// Read an optional string field from a closed vocabulary.
pub fn enum_field<T: FromStr>(
    object: &Object,
    name: &str,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    let value: String = field(object, name, path, errors)?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(ValidationError::InvalidEnum {
                path: join(path, name),
                value,
            });
            None
        }
    }
}

/// Clear `value` if it falls outside `min..=max`.
pub fn in_range<T>(
    value: Option<T>,
    min: T,
    max: T,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<T>
where
    T: PartialOrd + Copy + Into<i64>,
{
    let v = value?;
    if v < min || v > max {
        errors.push(ValidationError::OutOfRange {
            path: path.to_owned(),
            min: min.into(),
            max: max.into(),
        });
        return None;
    }
    Some(v)
}

/// Check that every key in `names` is present, reporting once if not.
pub fn require_keys(
    object: &Object,
    names: &[&str],
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let complete = names.iter().all(|name| object.contains_key(*name));
    if !complete {
        errors.push(ValidationError::MissingRequired { path: path.to_owned() });
    }
    complete
}

/// Walk `segments` from the document root without reporting anything.
///
/// Returns `None` if any segment is missing or an intermediate node isn't an
/// object.
pub fn section<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| node.as_object()?.get(*segment))
}

/// Interpret a present section as an object, reporting it otherwise.
pub fn as_object<'a>(
    value: &'a Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a Object> {
    let object = value.as_object();
    if object.is_none() {
        errors.push(ValidationError::TypeMismatch {
            path: path.to_owned(),
            expected: "object",
        });
    }
    object
}

/// Look up `name` in `object` and require it to be an object when present.
pub fn object_field<'a>(
    object: &'a Object,
    name: &str,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a Object> {
    as_object(object.get(name)?, &join(path, name), errors)
}

/// Run `decode` on `object[name]` when the key is present.
pub fn nested<T>(
    object: &Object,
    name: &str,
    path: &str,
    errors: &mut Vec<ValidationError>,
    decode: impl FnOnce(&Value, &str, &mut Vec<ValidationError>) -> Option<T>,
) -> Option<T> {
    let value = object.get(name)?;
    decode(value, &join(path, name), errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_field_absent_is_silent() {
        let o = obj(json!({}));
        let mut errors = Vec::new();
        let v: Option<String> = field(&o, "make", "lens", &mut errors);
        assert!(v.is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_field_type_mismatch() {
        let o = obj(json!({"make": 12}));
        let mut errors = Vec::new();
        let v: Option<String> = field(&o, "make", "static/lens", &mut errors);
        assert!(v.is_none());
        assert_eq!(
            errors,
            vec![ValidationError::TypeMismatch {
                path: "static/lens/make".into(),
                expected: "string",
            }]
        );
    }

    #[test]
    fn test_narrow_unsigned_rejects_overflow_and_negatives() {
        assert_eq!(u16::from_json(&json!(65535)), Some(65535));
        assert_eq!(u16::from_json(&json!(65536)), None);
        assert_eq!(u32::from_json(&json!(-1)), None);
        assert_eq!(u8::from_json(&json!(1.5)), None);
    }

    #[test]
    fn test_populate_sequence_is_all_or_nothing() {
        let good = json!([1.0, 2, -3.5]);
        assert_eq!(
            populate_sequence::<f64>(good.as_array().unwrap()),
            Some(vec![1.0, 2.0, -3.5])
        );

        let bad = json!([1.0, "two", 3.0]);
        assert_eq!(populate_sequence::<f64>(bad.as_array().unwrap()), None);
    }

    #[test]
    fn test_pattern_field_reports_pattern_not_type() {
        let o = obj(json!({"sampleId": "not-a-uuid"}));
        let mut errors = Vec::new();
        let v = pattern_field(&o, "sampleId", "", &UUID_URN, &mut errors);
        assert!(v.is_none());
        assert_eq!(
            errors,
            vec![ValidationError::PatternMismatch { path: "sampleId".into() }]
        );
    }

    #[test]
    fn test_patterns() {
        assert!(UUID_URN.is_match("urn:uuid:12345678-1234-1234-1234-123456789abc"));
        assert!(!UUID_URN.is_match("urn:uuid:12345678-1234-1234-1234-123456789ABC"));
        assert!(!UUID_URN.is_match("12345678-1234-1234-1234-123456789abc"));

        assert!(PROTOCOL_VERSION.is_match("1.0.12"));
        assert!(!PROTOCOL_VERSION.is_match("1.0"));
        assert!(!PROTOCOL_VERSION.is_match("1x0x1"));

        assert!(MAC_ADDRESS.is_match("00:1B:44:11:3A:B7"));
        assert!(!MAC_ADDRESS.is_match("00:1b:44:11:3a:b7"));
        assert!(!MAC_ADDRESS.is_match("00:1B:44:11:3A"));
    }

    #[test]
    fn test_in_range_inclusive() {
        let mut errors = Vec::new();
        assert_eq!(in_range(Some(1u32), 1, 360000, "a", &mut errors), Some(1));
        assert_eq!(in_range(Some(360000u32), 1, 360000, "a", &mut errors), Some(360000));
        assert!(errors.is_empty());
        assert_eq!(in_range(Some(0u32), 1, 360000, "a", &mut errors), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(in_range(None::<u32>, 1, 360000, "a", &mut errors), None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_section_ignores_non_object_parents() {
        let root = json!({"static": {"camera": {"make": "A"}}, "lens": 3});
        assert!(section(&root, &["static", "camera"]).is_some());
        assert!(section(&root, &["static", "lens"]).is_none());
        assert!(section(&root, &["lens", "make"]).is_none());
        assert!(section(&json!([1, 2]), &["lens"]).is_none());
    }
}
