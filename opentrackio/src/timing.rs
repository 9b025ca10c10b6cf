use std::str::FromStr;

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{Rational, Timecode, Timestamp};
use crate::validate::{
    MAC_ADDRESS, Object, as_object, enum_field, field, nested, object_field, pattern_field,
    require_keys, section,
};

const PATH: &str = "timing";

/// Returned when a string is not part of a closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVariant;

/// Whether the transport carries timing or the sample must.
///
/// `External`: the transport packet has inherent timing. `Internal`: it does
/// not, so a PTP timestamp must be provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum TimingMode {
    External,
    Internal,
}

impl FromStr for TimingMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "external" => Ok(TimingMode::External),
            "internal" => Ok(TimingMode::Internal),
            _ => Err(UnknownVariant),
        }
    }
}

/// Source the tracking device synchronises to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SyncSource {
    #[serde(rename = "genlock")]
    GenLock,
    VideoIn,
    Ptp,
    Ntp,
}

impl FromStr for SyncSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "genlock" => Ok(SyncSource::GenLock),
            "videoIn" => Ok(SyncSource::VideoIn),
            "ptp" => Ok(SyncSource::Ptp),
            "ntp" => Ok(SyncSource::Ntp),
            _ => Err(UnknownVariant),
        }
    }
}

/// Per-stream offsets, in seconds, applied to the synchronised data.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SyncOffsets {
    pub translation: Option<f64>,
    pub rotation: Option<f64>,
    pub lens_encoders: Option<f64>,
}

/// PTP parameters, present when synchronising to a PTP grandmaster.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Ptp {
    pub domain: Option<u16>,
    pub offset: Option<f64>,
    /// MAC address of the grandmaster, e.g. `00:11:22:AA:BB:CC`.
    pub master: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Synchronization {
    pub frequency: Rational,
    pub locked: bool,
    pub source: SyncSource,
    pub offsets: Option<SyncOffsets>,
    pub present: Option<bool>,
    pub ptp: Option<Ptp>,
}

impl Synchronization {
    /// `frequency`, `locked` and `source` are required; a problem with any of
    /// them drops the whole synchronization.
    fn decode(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, path, errors)?;
        if !require_keys(object, &["frequency", "locked", "source"], path, errors) {
            return None;
        }

        let frequency = nested(object, "frequency", path, errors, Rational::decode);
        let locked = field(object, "locked", path, errors);
        let source = enum_field(object, "source", path, errors);

        let offsets = object_field(object, "offsets", path, errors)
            .and_then(|o| read_offsets(o, &format!("{path}/offsets"), errors));
        let present = field(object, "present", path, errors);
        let ptp = object_field(object, "ptp", path, errors)
            .and_then(|o| read_ptp(o, &format!("{path}/ptp"), errors));

        Some(Synchronization {
            frequency: frequency?,
            locked: locked?,
            source: source?,
            offsets,
            present,
            ptp,
        })
    }
}

fn read_offsets(object: &Object, path: &str, errors: &mut Vec<ValidationError>) -> Option<SyncOffsets> {
    let offsets = SyncOffsets {
        translation: field(object, "translation", path, errors),
        rotation: field(object, "rotation", path, errors),
        lens_encoders: field(object, "lensEncoders", path, errors),
    };
    (offsets != SyncOffsets::default()).then_some(offsets)
}

fn read_ptp(object: &Object, path: &str, errors: &mut Vec<ValidationError>) -> Option<Ptp> {
    let ptp = Ptp {
        domain: field(object, "domain", path, errors),
        offset: field(object, "offset", path, errors),
        master: pattern_field(object, "master", path, &MAC_ADDRESS, errors),
    };
    (ptp != Ptp::default()).then_some(ptp)
}

/// Timing information for a sample (`timing`).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Timing {
    /// Sample frame rate.
    pub frame_rate: Option<Rational>,
    pub mode: Option<TimingMode>,
    /// PTP time at which the data was recorded, for playback of recorded data.
    pub recorded_timestamp: Option<Timestamp>,
    /// PTP time of the data capture instant.
    pub sample_timestamp: Option<Timestamp>,
    pub sequence_number: Option<u16>,
    pub synchronization: Option<Synchronization>,
    pub timecode: Option<Timecode>,
}

impl Timing {
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(section(root, &[PATH])?, PATH, errors)?;

        Some(Timing {
            frame_rate: nested(object, "frameRate", PATH, errors, Rational::decode),
            mode: enum_field(object, "mode", PATH, errors),
            recorded_timestamp: nested(object, "recordedTimestamp", PATH, errors, Timestamp::decode),
            sample_timestamp: nested(object, "sampleTimestamp", PATH, errors, Timestamp::decode),
            sequence_number: field(object, "sequenceNumber", PATH, errors),
            synchronization: nested(object, "synchronization", PATH, errors, Synchronization::decode),
            timecode: nested(object, "timecode", PATH, errors, Timecode::decode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    const SYNC_PATH: &str = "timing/synchronization";

    fn timing_with_sync(sync: Value) -> Value {
        json!({"timing": {
            "mode": "internal",
            "frameRate": {"num": 24000, "denom": 1001},
            "sequenceNumber": 0,
            "timecode": {
                "hours": 1, "minutes": 2, "seconds": 3, "frames": 4,
                "format": {"frameRate": {"num": 24, "denom": 1}, "dropFrame": false}
            },
            "synchronization": sync
        }})
    }

    #[test]
    fn test_full_timing() {
        let root = timing_with_sync(json!({
            "frequency": {"num": 24000, "denom": 1001},
            "locked": true,
            "source": "ptp",
            "present": true,
            "offsets": {"translation": 1.0, "rotation": 2.0, "lensEncoders": 3.0},
            "ptp": {"domain": 1, "offset": 0.0, "master": "00:11:22:33:44:55"}
        }));
        let mut errors = Vec::new();
        let timing = Timing::from_sample(&root, &mut errors).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(timing.mode, Some(TimingMode::Internal));
        assert_eq!(timing.sequence_number, Some(0));
        assert_eq!(timing.timecode.unwrap().frames, 4);

        let sync = timing.synchronization.unwrap();
        assert_eq!(sync.source, SyncSource::Ptp);
        assert!(sync.locked);
        assert_eq!(sync.frequency, Rational::new(24000, 1001));
        assert_eq!(sync.present, Some(true));
        assert_eq!(sync.offsets.unwrap().lens_encoders, Some(3.0));
        let ptp = sync.ptp.unwrap();
        assert_eq!(ptp.domain, Some(1));
        assert_eq!(ptp.master.as_deref(), Some("00:11:22:33:44:55"));
    }

    #[test]
    fn test_sync_missing_locked_keeps_siblings() {
        let root = timing_with_sync(json!({
            "frequency": {"num": 25, "denom": 1},
            "source": "genlock"
        }));
        let mut errors = Vec::new();
        let timing = Timing::from_sample(&root, &mut errors).unwrap();
        assert_eq!(timing.synchronization, None);
        assert_eq!(timing.mode, Some(TimingMode::Internal));
        assert_eq!(timing.frame_rate, Some(Rational::new(24000, 1001)));
        assert!(timing.timecode.is_some());
        assert_eq!(
            errors,
            vec![ValidationError::MissingRequired { path: SYNC_PATH.into() }]
        );
    }

    #[test]
    fn test_sync_unknown_source_drops_sync() {
        let root = timing_with_sync(json!({
            "frequency": {"num": 25, "denom": 1},
            "locked": false,
            "source": "wordclock"
        }));
        let mut errors = Vec::new();
        let timing = Timing::from_sample(&root, &mut errors).unwrap();
        assert_eq!(timing.synchronization, None);
        assert_eq!(
            errors,
            vec![ValidationError::InvalidEnum {
                path: "timing/synchronization/source".into(),
                value: "wordclock".into(),
            }]
        );
    }

    #[test]
    fn test_sync_sources() {
        for (s, expected) in [
            ("genlock", SyncSource::GenLock),
            ("videoIn", SyncSource::VideoIn),
            ("ptp", SyncSource::Ptp),
            ("ntp", SyncSource::Ntp),
        ] {
            assert_eq!(s.parse::<SyncSource>(), Ok(expected));
        }
        assert!("VideoIn".parse::<SyncSource>().is_err());
    }

    #[test]
    fn test_optional_groups_collapse() {
        let root = timing_with_sync(json!({
            "frequency": {"num": 25, "denom": 1},
            "locked": true,
            "source": "ptp",
            "offsets": {"translation": "late", "rotation": null},
            "ptp": {"master": "00:11:22:33:44:5g"}
        }));
        let mut errors = Vec::new();
        let sync = Timing::from_sample(&root, &mut errors).unwrap().synchronization.unwrap();
        assert_eq!(sync.offsets, None);
        assert_eq!(sync.ptp, None);
        assert_eq!(
            errors,
            vec![
                ValidationError::TypeMismatch {
                    path: "timing/synchronization/offsets/translation".into(),
                    expected: "double",
                },
                ValidationError::TypeMismatch {
                    path: "timing/synchronization/offsets/rotation".into(),
                    expected: "double",
                },
                ValidationError::PatternMismatch {
                    path: "timing/synchronization/ptp/master".into(),
                },
            ]
        );
    }

    #[test]
    fn test_single_valid_member_keeps_group() {
        let root = timing_with_sync(json!({
            "frequency": {"num": 25, "denom": 1},
            "locked": true,
            "source": "ptp",
            "offsets": {"rotation": 0.25, "translation": "late"},
            "ptp": {"domain": 127, "master": "not-a-mac"}
        }));
        let mut errors = Vec::new();
        let sync = Timing::from_sample(&root, &mut errors).unwrap().synchronization.unwrap();
        assert_eq!(
            sync.offsets,
            Some(SyncOffsets { translation: None, rotation: Some(0.25), lens_encoders: None })
        );
        assert_eq!(sync.ptp, Some(Ptp { domain: Some(127), offset: None, master: None }));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path(), "timing/synchronization/offsets/translation");
        assert_eq!(errors[1].path(), "timing/synchronization/ptp/master");
    }

    #[test]
    fn test_empty_offsets_collapse_without_error() {
        let root = timing_with_sync(json!({
            "frequency": {"num": 25, "denom": 1},
            "locked": true,
            "source": "genlock",
            "offsets": {}
        }));
        let mut errors = Vec::new();
        let sync = Timing::from_sample(&root, &mut errors).unwrap().synchronization.unwrap();
        assert_eq!(sync.offsets, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_invalid_mode_is_cleared() {
        let mut errors = Vec::new();
        let root = json!({"timing": {"mode": "freerun", "sequenceNumber": 7}});
        let timing = Timing::from_sample(&root, &mut errors).unwrap();
        assert_eq!(timing.mode, None);
        assert_eq!(timing.sequence_number, Some(7));
        assert_eq!(
            errors,
            vec![ValidationError::InvalidEnum {
                path: "timing/mode".into(),
                value: "freerun".into(),
            }]
        );
    }

    #[test]
    fn test_absent_mode_is_silent() {
        let mut errors = Vec::new();
        let timing = Timing::from_sample(&json!({"timing": {"mode": "external"}}), &mut errors).unwrap();
        assert_eq!(timing.mode, Some(TimingMode::External));
        let timing = Timing::from_sample(&json!({"timing": {}}), &mut errors).unwrap();
        assert_eq!(timing, Timing::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_sequence_number_overflow() {
        let mut errors = Vec::new();
        let timing = Timing::from_sample(&json!({"timing": {"sequenceNumber": 65536}}), &mut errors).unwrap();
        assert_eq!(timing.sequence_number, None);
        assert_eq!(errors[0].to_string(), "field: timing/sequenceNumber isn't of type: uint16");
    }
}
