//! Test assertion helpers
//!
//! Provides utilities for robust test assertions, particularly for the
//! floating-point percentages stored in the results and summary documents.

use std::path::Path;

/// Assert that two floating-point values are approximately equal
///
/// Use this instead of `assert_eq!` for f64 comparisons to avoid
/// floating-point precision issues.
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Assert that a percentage is rounded to at most three decimals
#[allow(dead_code)]
pub fn assert_three_decimals(percent: f64) {
    let scaled = percent * 1000.0;
    assert!(
        (scaled - scaled.round()).abs() < 1e-6,
        "Percentage {} has more than three decimals",
        percent
    );
}

/// Assert that a file exists and contains `needle`
#[allow(dead_code)]
pub fn assert_file_contains(path: &Path, needle: &str) {
    let contents = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    assert!(
        contents.contains(needle),
        "{} does not contain {:?}",
        path.display(),
        needle
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_within_epsilon() {
        assert_approx_eq(1.0001, 1.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "not approximately equal")]
    fn test_assert_approx_eq_outside_epsilon() {
        assert_approx_eq(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_three_decimals_accepts_rounded() {
        assert_three_decimals(12.346);
        assert_three_decimals(0.0);
    }
}
