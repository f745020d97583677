use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    pub time: DateTime<Utc>,
}

/// A `<trkpt>` as written in the document. Only `lat`/`lon` are checked
/// while reading; `ele` and `time` are converted once the segment holding
/// the point is selected for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    /// Position of the point among all track points of the document.
    pub index: usize,
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub points: Vec<RawPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

/// All tracks of a GPX document, in document order.
#[derive(Debug, Clone, Default)]
pub struct GpxDocument {
    pub tracks: Vec<Track>,
}

/// One uploaded or extracted recording, not yet parsed.
#[derive(Debug, Clone)]
pub struct Recording {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Recording {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}
