mod gpx;

use crate::error::ParseError;
use crate::types::track::{GpxDocument, Segment, Track, TrackPoint};

pub use gpx::GpxParser;

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<GpxDocument, ParseError>;
}

/// Picks the segment to analyze: the first one, in document order, that
/// holds at least two points. Later tracks and segments are never looked at
/// and segments are never merged.
pub fn select_segment(tracks: &[Track]) -> Option<&Segment> {
    select_with_track(tracks).map(|(_, segment)| segment)
}

fn select_with_track(tracks: &[Track]) -> Option<(&Track, &Segment)> {
    segments(tracks).find(|(_, segment)| segment.points.len() >= 2)
}

fn segments(tracks: &[Track]) -> impl Iterator<Item = (&Track, &Segment)> {
    tracks
        .iter()
        .flat_map(|track| track.segments.iter().map(move |segment| (track, segment)))
}

/// Converts every point of `segment`. Points outside the selected segment are
/// never converted, so their `ele`/`time` content cannot fail a recording.
pub fn resolve_segment(segment: &Segment) -> Result<Vec<TrackPoint>, ParseError> {
    segment.points.iter().map(gpx::resolve_point).collect()
}

pub fn parse_document(bytes: &[u8]) -> Result<GpxDocument, ParseError> {
    GpxParser.parse(bytes)
}

/// Parses a recording and returns the points of its selected segment.
///
/// When no segment has two points, the first segment is returned as is so
/// the short sequence is reported by feature extraction. A document without
/// any segment is a [`ParseError::NoUsableSegment`].
pub fn parse(bytes: &[u8]) -> Result<Vec<TrackPoint>, ParseError> {
    let document = parse_document(bytes)?;

    let (track, segment) = select_with_track(&document.tracks)
        .or_else(|| segments(&document.tracks).next())
        .ok_or(ParseError::NoUsableSegment)?;

    tracing::debug!(
        "Analyzing segment of {} points from track {}",
        segment.points.len(),
        track.name.as_deref().unwrap_or("<unnamed>")
    );

    resolve_segment(segment)
}
