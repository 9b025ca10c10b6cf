use log::debug;
use serde_json::Value;

use crate::camera::Camera;
use crate::duration::Duration;
use crate::error::{Result, ValidationError};
use crate::global_stage::GlobalStage;
use crate::ids::{RelatedSampleIds, SampleId, StreamId};
use crate::lens::Lens;
use crate::protocol::Protocol;
use crate::timing::Timing;
use crate::tracker::Tracker;
use crate::transforms::Transforms;

/// One fully decoded OpenTrackIO sample.
///
/// Every property is decoded independently, so a broken section only clears
/// itself. `errors` lists what went wrong, in document-decoding order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Sample {
    pub camera: Option<Camera>,
    pub duration: Option<Duration>,
    pub global_stage: Option<GlobalStage>,
    pub lens: Option<Lens>,
    pub protocol: Option<Protocol>,
    pub related_sample_ids: Option<RelatedSampleIds>,
    pub sample_id: Option<SampleId>,
    pub stream_id: Option<StreamId>,
    pub timing: Option<Timing>,
    pub tracker: Option<Tracker>,
    pub transforms: Option<Transforms>,
    #[cfg_attr(feature = "jsonschema", schemars(with = "Vec<String>"))]
    pub errors: Vec<ValidationError>,
}

impl Sample {
    /// Decode an already-parsed JSON document.
    pub fn from_json(root: &Value) -> Sample {
        if !root.is_object() {
            return Sample {
                errors: vec![ValidationError::TypeMismatch {
                    path: "sample".to_owned(),
                    expected: "object",
                }],
                ..Default::default()
            };
        }

        let mut errors = Vec::new();
        let camera = Camera::from_sample(root, &mut errors);
        let duration = Duration::from_sample(root, &mut errors);
        let global_stage = GlobalStage::from_sample(root, &mut errors);
        let lens = Lens::from_sample(root, &mut errors);
        let protocol = Protocol::from_sample(root, &mut errors);
        let related_sample_ids = RelatedSampleIds::from_sample(root, &mut errors);
        let sample_id = SampleId::from_sample(root, &mut errors);
        let stream_id = StreamId::from_sample(root, &mut errors);
        let timing = Timing::from_sample(root, &mut errors);
        let tracker = Tracker::from_sample(root, &mut errors);
        let transforms = Transforms::from_sample(root, &mut errors);

        let sample = Sample {
            camera,
            duration,
            global_stage,
            lens,
            protocol,
            related_sample_ids,
            sample_id,
            stream_id,
            timing,
            tracker,
            transforms,
            errors,
        };
        debug!(
            "Decoded sample {}: {} of 11 properties present, {} diagnostics",
            sample.sample_id.as_ref().map(SampleId::as_str).unwrap_or("<no id>"),
            sample.present_count(),
            sample.errors.len()
        );
        sample
    }

    pub fn from_json_str(text: &str) -> Result<Sample> {
        let root: Value = serde_json::from_str(text)?;
        Ok(Sample::from_json(&root))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Sample> {
        let root: Value = serde_json::from_slice(bytes)?;
        Ok(Sample::from_json(&root))
    }

    /// Decode a CBOR-encoded sample. Maps must have text keys, as in JSON.
    pub fn from_cbor_slice(bytes: &[u8]) -> Result<Sample> {
        let root: Value = ciborium::de::from_reader(bytes)?;
        Ok(Sample::from_json(&root))
    }

    /// True if decoding produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    fn present_count(&self) -> usize {
        [
            self.camera.is_some(),
            self.duration.is_some(),
            self.global_stage.is_some(),
            self.lens.is_some(),
            self.protocol.is_some(),
            self.related_sample_ids.is_some(),
            self.sample_id.is_some(),
            self.stream_id.is_some(),
            self.timing.is_some(),
            self.tracker.is_some(),
            self.transforms.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
