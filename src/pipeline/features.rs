use crate::error::FeatureError;
use crate::types::features::FeatureVector;
use crate::types::track::TrackPoint;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Computes the feature vector of an ordered segment.
///
/// Duration is taken between the first and last point as recorded, so
/// out-of-order timestamps can produce a negative duration. Average speed is
/// only computed for a positive duration and is `0` otherwise.
pub fn extract(points: &[TrackPoint]) -> Result<FeatureVector, FeatureError> {
    if points.len() < 2 {
        return Err(FeatureError::InsufficientPoints(points.len()));
    }

    let mut distance_m = 0.0;
    let mut elevation_gain_m = 0.0;

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        distance_m += distance_3d(prev, curr);
        elevation_gain_m += (elevation_of(curr) - elevation_of(prev)).max(0.0);
    }

    let first = &points[0];
    let last = &points[points.len() - 1];

    let elapsed = last.time - first.time;
    let duration_seconds = match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => elapsed.num_milliseconds() as f64 / 1000.0,
    };
    let duration_minutes = duration_seconds / 60.0;
    let distance_km = distance_m / 1000.0;

    let avg_speed_kmh = if duration_minutes > 0.0 {
        distance_km / (duration_minutes / 60.0)
    } else {
        0.0
    };

    Ok(FeatureVector {
        total_distance_km: round2(distance_km),
        duration_minutes: round2(duration_minutes),
        avg_speed_kmh: round2(avg_speed_kmh),
        elevation_gain_m: round2(elevation_gain_m),
        activity_timestamp: last.time.timestamp(),
    })
}

/// Horizontal great-circle distance combined with the elevation delta, in
/// meters. A missing elevation counts as `0`.
pub fn distance_3d(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let horizontal = haversine_distance(a.lat, a.lon, b.lat, b.lon);
    let vertical = elevation_of(b) - elevation_of(a);
    (horizontal * horizontal + vertical * vertical).sqrt()
}

fn elevation_of(point: &TrackPoint) -> f64 {
    point.elevation.unwrap_or(0.0)
}

fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
