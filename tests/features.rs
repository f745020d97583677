mod common;

use common::point;
use gpx_guard::error::FeatureError;
use gpx_guard::pipeline::features::{distance_3d, extract};

#[test]
fn two_point_segment_yields_all_features() {
    let points = vec![
        point(0.0, 0.0, Some(10.0), 0),
        point(0.0, 0.001, Some(15.0), 600),
    ];

    let features = extract(&points).expect("features");

    assert_eq!(features.total_distance_km, 0.11);
    assert_eq!(features.duration_minutes, 10.0);
    assert_eq!(features.avg_speed_kmh, 0.67);
    assert_eq!(features.elevation_gain_m, 5.0);
    assert_eq!(features.activity_timestamp, 600);
}

#[test]
fn two_point_distance_matches_pairwise_3d_distance() {
    let a = point(48.8566, 2.3522, Some(35.0), 0);
    let b = point(48.8666, 2.3622, Some(80.0), 900);

    let features = extract(&[a.clone(), b.clone()]).expect("features");
    let expected = (distance_3d(&a, &b) / 1000.0 * 100.0).round() / 100.0;

    assert_eq!(features.total_distance_km, expected);
    assert!(features.total_distance_km > 0.0);
}

#[test]
fn distance_3d_includes_elevation_delta() {
    let a = point(0.0, 0.0, Some(0.0), 0);
    let b = point(0.0, 0.0, Some(30.0), 10);
    assert!((distance_3d(&a, &b) - 30.0).abs() < 1e-9);
}

#[test]
fn missing_elevation_counts_as_zero() {
    let a = point(0.0, 0.0, None, 0);
    let b = point(0.0, 0.0, Some(12.0), 60);
    assert!((distance_3d(&a, &b) - 12.0).abs() < 1e-9);

    let features = extract(&[a, b]).expect("features");
    assert_eq!(features.elevation_gain_m, 12.0);
}

#[test]
fn descents_do_not_reduce_elevation_gain() {
    let points = vec![
        point(0.0, 0.0, Some(10.0), 0),
        point(0.0, 0.001, Some(15.0), 60),
        point(0.0, 0.002, Some(8.0), 120),
    ];

    let features = extract(&points).expect("features");
    assert_eq!(features.elevation_gain_m, 5.0);
}

#[test]
fn non_increasing_elevation_has_zero_gain() {
    let points = vec![
        point(0.0, 0.0, Some(100.0), 0),
        point(0.0, 0.001, Some(100.0), 60),
        point(0.0, 0.002, Some(90.0), 120),
        point(0.0, 0.003, Some(40.5), 180),
    ];

    let features = extract(&points).expect("features");
    assert_eq!(features.elevation_gain_m, 0.0);
}

#[test]
fn zero_duration_has_zero_speed() {
    let points = vec![
        point(0.0, 0.0, Some(0.0), 300),
        point(0.0, 0.05, Some(0.0), 300),
    ];

    let features = extract(&points).expect("features");
    assert_eq!(features.duration_minutes, 0.0);
    assert_eq!(features.avg_speed_kmh, 0.0);
    assert!(features.total_distance_km > 5.0);
}

#[test]
fn sub_millisecond_duration_counts_as_positive() {
    let start = point(0.0, 0.0, None, 0);
    let mut end = point(0.0, 0.001, None, 0);
    end.time = start.time + chrono::Duration::microseconds(900);

    let features = extract(&[start, end]).expect("features");

    assert_eq!(features.duration_minutes, 0.0);
    assert!(features.avg_speed_kmh > 1000.0);
}

#[test]
fn out_of_order_timestamps_give_negative_duration_and_zero_speed() {
    let points = vec![
        point(0.0, 0.0, None, 1200),
        point(0.0, 0.01, None, 600),
    ];

    let features = extract(&points).expect("features");
    assert_eq!(features.duration_minutes, -10.0);
    assert_eq!(features.avg_speed_kmh, 0.0);
    assert_eq!(features.activity_timestamp, 600);
}

#[test]
fn activity_timestamp_is_last_point_epoch() {
    let points = vec![
        point(0.0, 0.0, None, 1_767_268_800),
        point(0.0, 0.001, None, 1_767_268_860),
        point(0.0, 0.002, None, 1_767_268_930),
    ];

    let features = extract(&points).expect("features");
    assert_eq!(features.activity_timestamp, 1_767_268_930);
}

#[test]
fn fewer_than_two_points_is_rejected() {
    let err = extract(&[]).expect_err("empty segment");
    assert!(matches!(err, FeatureError::InsufficientPoints(0)));

    let err = extract(&[point(0.0, 0.0, Some(1.0), 0)]).expect_err("single point");
    assert!(matches!(err, FeatureError::InsufficientPoints(1)));
    assert_eq!(err.to_string(), "Not enough points to calculate features.");
}
