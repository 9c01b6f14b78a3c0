//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons and aggregate responses.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Unpack a `[min, max, avg]` response, `None` when every entry is null.
///
/// # Panics
///
/// Panics if the value is not a three-element list, or mixes nulls and numbers.
pub fn parse_stats(value: &serde_json::Value) -> Option<(f64, f64, f64)> {
    let list = value.as_array().expect("aggregate response should be a list");
    assert_eq!(list.len(), 3, "aggregate response should have 3 entries");

    if list.iter().all(|v| v.is_null()) {
        return None;
    }

    let num = |i: usize| {
        list[i]
            .as_f64()
            .unwrap_or_else(|| panic!("entry {} is not a number: {}", i, list[i]))
    };
    Some((num(0), num(1), num(2)))
}

/// Assert that an aggregate response matches the expected values.
pub fn assert_stats_eq(actual: Option<(f64, f64, f64)>, expected: Option<(f64, f64, f64)>) {
    match (actual, expected) {
        (None, None) => {}
        (Some((min, max, avg)), Some((e_min, e_max, e_avg))) => {
            assert_approx_eq(min, e_min, None);
            assert_approx_eq(max, e_max, None);
            assert_approx_eq(avg, e_avg, Some(1e-6));
        }
        _ => panic!(
            "Aggregate mismatch: actual = {:?}, expected = {:?}",
            actual, expected
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats() {
        assert_eq!(
            parse_stats(&serde_json::json!([1.0, 3.0, 2.0])),
            Some((1.0, 3.0, 2.0))
        );
        assert_eq!(parse_stats(&serde_json::json!([null, null, null])), None);
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }
}
