use chrono::Local;

use crate::core::client::series::Sample;

/// Local-clock layout used for point timestamps in responses.
pub const POINT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Arithmetic mean of the sample values. An empty series averages to 0.0.
pub fn average(samples: &[Sample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    samples.iter().map(|s| s.value).sum::<f64>() / samples.len() as f64
}

/// Maps samples to `(formatted local time, value)` pairs, preserving the
/// order the backend returned them in.
pub fn as_points(samples: &[Sample]) -> Vec<(String, f64)> {
    samples
        .iter()
        .map(|s| {
            let formatted = s.time.with_timezone(&Local).format(POINT_TIME_FORMAT);
            (formatted.to_string(), s.value)
        })
        .collect()
}
