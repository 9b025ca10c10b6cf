use thiserror::Error;

/// Fatal errors that prevent a document from being decoded at all.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        source: serde_json::Error,
    },

    /// Truncated input also lands here, since CBOR has no textual position.
    #[error("malformed CBOR: {0}")]
    Cbor(#[from] ciborium::de::Error<std::io::Error>),
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        if source.is_io() {
            return Error::Io(source.into());
        }
        Error::Json {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A non-fatal problem with a single field of a sample.
///
/// Decoders append these to the caller's error list and carry on; the field
/// (or, for required fields, the enclosing entity) is left as `None`. `path`
/// is the slash-separated location in the document, e.g.
/// `timing/synchronization/ptp/master`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field: {path} isn't of type: {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("field: {path} doesn't match required pattern")]
    PatternMismatch { path: String },

    #[error("field: {path} is outside the expected range {min} - {max}")]
    OutOfRange { path: String, min: i64, max: i64 },

    #[error("field: {path} isn't a valid enumeration value: {value}")]
    InvalidEnum { path: String, value: String },

    #[error("field: {path} is missing required fields")]
    MissingRequired { path: String },

    #[error("field: {path} is missing required field: {name}")]
    MissingField { path: String, name: &'static str },
}

impl ValidationError {
    /// Document path of the offending field.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::TypeMismatch { path, .. }
            | ValidationError::PatternMismatch { path }
            | ValidationError::OutOfRange { path, .. }
            | ValidationError::InvalidEnum { path, .. }
            | ValidationError::MissingRequired { path }
            | ValidationError::MissingField { path, .. } => path,
        }
    }
}

impl serde::Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let e = ValidationError::OutOfRange {
            path: "static/camera/shutterAngle".into(),
            min: 1,
            max: 360000,
        };
        assert_eq!(
            e.to_string(),
            "field: static/camera/shutterAngle is outside the expected range 1 - 360000"
        );
        assert_eq!(e.path(), "static/camera/shutterAngle");

        let e = ValidationError::TypeMismatch {
            path: "timing".into(),
            expected: "object",
        };
        assert_eq!(e.to_string(), "field: timing isn't of type: object");
    }

    #[test]
    fn test_serialises_as_message() {
        let e = ValidationError::PatternMismatch { path: "sampleId".into() };
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, "\"field: sampleId doesn't match required pattern\"");
    }

    #[test]
    fn test_json_error_keeps_position() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .unwrap_err()
            .into();
        match err {
            Error::Json { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
