use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use log::debug;

use crate::error::Result;
use crate::sample::Sample;

/// Encoding of a sample file, judged from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Json,
    Cbor,
}

impl SampleFormat {
    /// `.cbor` (optionally followed by `.gz`) is CBOR; anything else is JSON.
    pub fn from_path(path: &Path) -> SampleFormat {
        let name = path.to_str().unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(name);
        if name.ends_with(".cbor") {
            SampleFormat::Cbor
        } else {
            SampleFormat::Json
        }
    }
}

/// Open a sample file for reading, decompressing `.gz` files on the fly.
pub fn open_sample(path: &Path) -> std::io::Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    if path.to_str().is_some_and(|s| s.ends_with(".gz")) {
        debug!("{} is gzip-compressed", path.display());
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Parse one JSON document from `reader` and decode it.
///
/// Only I/O and JSON syntax failures are returned as errors; field-level
/// problems end up in [`Sample::errors`].
pub fn parse_sample<R: Read>(reader: R) -> Result<Sample> {
    let root: serde_json::Value = serde_json::from_reader(reader)?;
    Ok(Sample::from_json(&root))
}

/// Parse one CBOR-encoded document from `reader` and decode it.
pub fn parse_sample_cbor<R: Read>(reader: R) -> Result<Sample> {
    let root: serde_json::Value = ciborium::de::from_reader(reader)?;
    Ok(Sample::from_json(&root))
}

/// Open `path` and decode it according to [`SampleFormat::from_path`].
pub fn load_sample(path: &Path) -> Result<Sample> {
    let reader = open_sample(path)?;
    match SampleFormat::from_path(path) {
        SampleFormat::Json => parse_sample(reader),
        SampleFormat::Cbor => parse_sample_cbor(reader),
    }
}
