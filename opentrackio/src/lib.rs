//! Decoder for OpenTrackIO camera-tracking samples.
//!
//! Each top-level property of a sample has its own decoder with the signature
//! `from_sample(&Value, &mut Vec<ValidationError>) -> Option<Self>`.
//! [`sample::Sample`] runs all of them over one document.

pub mod camera;
pub mod duration;
pub mod error;
pub mod global_stage;
pub mod ids;
pub mod lens;
pub mod protocol;
pub mod reader;
pub mod sample;
pub mod timing;
pub mod tracker;
pub mod transforms;
pub mod types;
pub mod validate;
pub mod version;

pub use error::{Error, Result, ValidationError};
pub use sample::Sample;

/// Protocol version the field set was written against.
pub const SUPPORTED_PROTOCOL_VERSION: &str = "1.0.1";
