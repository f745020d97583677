use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::pipeline::parse::Parser;
use crate::types::track::{GpxDocument, RawPoint, Segment, Track, TrackPoint};

pub struct GpxParser;

impl Parser for GpxParser {
    fn parse(&self, bytes: &[u8]) -> Result<GpxDocument, ParseError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut builder = DocumentBuilder::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => builder.open(&e, false)?,
                Ok(Event::Empty(e)) => builder.open(&e, true)?,
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                    builder.text(&text)?;
                }
                Ok(Event::End(e)) => {
                    let name = std::str::from_utf8(e.local_name().as_ref())
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?
                        .to_string();
                    builder.close(&name)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::InvalidGpx(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        builder.finish()
    }
}

#[derive(Default)]
struct DocumentBuilder {
    document: GpxDocument,
    depth: usize,
    root_seen: bool,
    root_closed: bool,
    in_trk: bool,
    in_trkseg: bool,
    point_count: usize,
    current_point: Option<RawPoint>,
    current_element: String,
}

impl DocumentBuilder {
    fn open(&mut self, e: &BytesStart<'_>, is_empty: bool) -> Result<(), ParseError> {
        let name = std::str::from_utf8(e.local_name().as_ref())
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?
            .to_string();

        if !self.root_seen {
            if name != "gpx" {
                return Err(ParseError::UnexpectedRoot(name));
            }
            self.root_seen = true;
            self.root_closed = is_empty;
        } else if self.root_closed {
            return Err(ParseError::InvalidGpx(format!(
                "unexpected <{}> after </gpx>",
                name
            )));
        }

        match name.as_str() {
            "trk" => {
                self.in_trk = !is_empty;
                self.document.tracks.push(Track::default());
            }
            "trkseg" if self.in_trk => {
                self.in_trkseg = !is_empty;
                if let Some(track) = self.document.tracks.last_mut() {
                    track.segments.push(Segment::default());
                }
            }
            "trkpt" if self.in_trkseg => {
                let point = start_point(e, self.point_count)?;
                self.point_count += 1;
                if is_empty {
                    self.push_point(point);
                } else {
                    self.current_point = Some(point);
                }
            }
            _ if !is_empty => self.current_element.clone_from(&name),
            _ => {}
        }

        if !is_empty {
            self.depth += 1;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), ParseError> {
        if let Some(point) = self.current_point.as_mut() {
            match self.current_element.as_str() {
                "ele" => point.elevation = Some(text.to_string()),
                "time" => point.time = Some(text.to_string()),
                _ => {}
            }
        } else if self.in_trk && !self.in_trkseg && self.current_element == "name" {
            if let Some(track) = self.document.tracks.last_mut() {
                track.name = Some(text.to_string());
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), ParseError> {
        match name {
            "trkpt" => {
                if let Some(point) = self.current_point.take() {
                    self.push_point(point);
                }
            }
            "trkseg" => self.in_trkseg = false,
            "trk" => self.in_trk = false,
            _ => {}
        }
        self.current_element.clear();

        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.root_closed = true;
        }
        Ok(())
    }

    fn push_point(&mut self, point: RawPoint) {
        if let Some(segment) = self
            .document
            .tracks
            .last_mut()
            .and_then(|track| track.segments.last_mut())
        {
            segment.points.push(point);
        }
    }

    fn finish(self) -> Result<GpxDocument, ParseError> {
        if !self.root_seen {
            return Err(ParseError::EmptyDocument);
        }
        if !self.root_closed {
            return Err(ParseError::Truncated);
        }
        Ok(self.document)
    }
}

fn start_point(e: &BytesStart<'_>, index: usize) -> Result<RawPoint, ParseError> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

        match attr.key.local_name().as_ref() {
            b"lat" => lat = Some(parse_number(&value, index, "lat")?),
            b"lon" => lon = Some(parse_number(&value, index, "lon")?),
            _ => {}
        }
    }

    Ok(RawPoint {
        index,
        lat: lat.ok_or(ParseError::MissingField { index, field: "lat" })?,
        lon: lon.ok_or(ParseError::MissingField { index, field: "lon" })?,
        elevation: None,
        time: None,
    })
}

/// Converts a raw point into a [`TrackPoint`], requiring a valid `time` and,
/// when present, a numeric `ele`.
pub(crate) fn resolve_point(point: &RawPoint) -> Result<TrackPoint, ParseError> {
    let elevation = point
        .elevation
        .as_deref()
        .map(|text| parse_number(text, point.index, "ele"))
        .transpose()?;
    let time = point
        .time
        .as_deref()
        .ok_or(ParseError::MissingField {
            index: point.index,
            field: "time",
        })
        .and_then(|text| parse_time(text, point.index))?;

    Ok(TrackPoint {
        lat: point.lat,
        lon: point.lon,
        elevation,
        time,
    })
}

fn parse_number(text: &str, index: usize, field: &'static str) -> Result<f64, ParseError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseError::InvalidField {
            index,
            field,
            value: text.to_string(),
        })
}

/// Accepts RFC 3339 timestamps and zone-less ISO-8601 ones, which are read as UTC.
fn parse_time(text: &str, index: usize) -> Result<DateTime<Utc>, ParseError> {
    let text = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ParseError::InvalidField {
            index,
            field: "time",
            value: text.to_string(),
        })
}
