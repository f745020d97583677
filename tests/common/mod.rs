#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use gpx_guard::error::ClassifierError;
use gpx_guard::model::Classifier;
use gpx_guard::types::features::FeatureRow;
use gpx_guard::types::track::TrackPoint;

/// Returns a fixed prediction and remembers every row it was asked about.
pub struct StubClassifier {
    prediction: u8,
    pub rows: Mutex<Vec<FeatureRow>>,
}

impl StubClassifier {
    pub fn new(prediction: u8) -> Self {
        Self {
            prediction,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<u8, ClassifierError> {
        self.rows.lock().expect("rows lock").push(row.clone());
        Ok(self.prediction)
    }
}

/// Always rejects the row.
pub struct RejectingClassifier;

impl Classifier for RejectingClassifier {
    fn predict(&self, _row: &FeatureRow) -> Result<u8, ClassifierError> {
        Err(ClassifierError::MissingFeature("heart_rate".to_string()))
    }
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).expect("timestamp")
}

pub fn point(lat: f64, lon: f64, elevation: Option<f64>, seconds: i64) -> TrackPoint {
    TrackPoint {
        lat,
        lon,
        elevation,
        time: at(seconds),
    }
}

pub fn trkpt(lat: f64, lon: f64, elevation: Option<f64>, seconds: i64) -> String {
    let ele = elevation
        .map(|e| format!("<ele>{}</ele>", e))
        .unwrap_or_default();
    format!(
        r#"<trkpt lat="{}" lon="{}">{}<time>{}</time></trkpt>"#,
        lat,
        lon,
        ele,
        at(seconds).to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Wraps track bodies (each a list of segment bodies) into a GPX document.
pub fn gpx(tracks: &[&[String]]) -> String {
    let tracks: String = tracks
        .iter()
        .map(|segments| {
            let segments: String = segments
                .iter()
                .map(|points| format!("<trkseg>{}</trkseg>", points))
                .collect();
            format!("<trk><name>Test Ride</name>{}</trk>", segments)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">{}</gpx>"#,
        tracks
    )
}

pub fn sample_gpx() -> String {
    let points = [
        trkpt(0.0, 0.0, Some(10.0), 0),
        trkpt(0.0, 0.001, Some(15.0), 600),
    ]
    .concat();
    gpx(&[&[points]])
}

pub fn single_point_gpx() -> String {
    gpx(&[&[trkpt(52.52, 13.405, Some(34.0), 0)]])
}

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    for (name, body) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(body).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}
