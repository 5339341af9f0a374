// Latency aggregation tests

use loadbench::stats::{duration_ms, summarize};
use std::time::Duration;

#[test]
fn test_summarize_empty_is_none() {
    assert!(summarize(&[]).is_none());
}

#[test]
fn test_summarize_single_sample() {
    let summary = summarize(&[Duration::from_millis(250)]).unwrap();
    assert_eq!(summary.count, 1);
    assert!((summary.mean_ms - 250.0).abs() < 1e-9);
    assert!((summary.min_ms - 250.0).abs() < 1e-9);
    assert!((summary.max_ms - 250.0).abs() < 1e-9);
}

#[test]
fn test_summarize_mean_min_max() {
    let samples = [
        Duration::from_millis(100),
        Duration::from_millis(200),
        Duration::from_millis(600),
    ];
    let summary = summarize(&samples).unwrap();
    assert_eq!(summary.count, 3);
    assert!((summary.mean_ms - 300.0).abs() < 1e-9);
    assert!((summary.min_ms - 100.0).abs() < 1e-9);
    assert!((summary.max_ms - 600.0).abs() < 1e-9);
}

#[test]
fn test_duration_ms_sub_millisecond() {
    let ms = duration_ms(Duration::from_micros(1500));
    assert!((ms - 1.5).abs() < 1e-9);
}
