//! Value quantization and value ↔ position conversion.
//!
//! The option array is the ordered set of values a handle may take. Positions
//! map onto it index-proportionally: option `i` of `n` sits at
//! `length * i / (n - 1)`, and a position converts back by rounding its
//! proportional index to the nearest entry.
//!
//! ## Guarantees
//!
//! - `value_to_position(options[0]) == 0`
//! - `value_to_position(options[n - 1]) == length`
//! - `position_to_value(value_to_position(v)) == v` for every option `v`
//! - Both conversions are monotonic

use serde::Serialize;

use crate::types::{ConfigurationError, SliderConfig};

/// Absorbs float error when counting generated steps (`0.1` spacing etc).
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Upper bound on generated option arrays.
pub const MAX_OPTIONS: usize = 1_000_000;

/// Ordered, strictly increasing set of allowed values. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionArray(Vec<f64>);

impl OptionArray {
    /// Generate `min, min + step, …` up to the last value not exceeding `max`.
    pub fn build(min: f64, max: f64, step: f64) -> Result<Self, ConfigurationError> {
        if !min.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("min"));
        }
        if !max.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("max"));
        }
        if !step.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("step"));
        }
        if step <= 0.0 {
            return Err(ConfigurationError::NonPositiveStep(step));
        }
        if max < min {
            return Err(ConfigurationError::InvertedRange { min, max });
        }

        let span = ((max - min) / step + STEP_COUNT_EPSILON).floor();
        if span >= MAX_OPTIONS as f64 {
            return Err(ConfigurationError::TooManyOptions(MAX_OPTIONS));
        }
        let count = span as usize + 1;
        let values = (0..count).map(|i| min + i as f64 * step).collect();
        Ok(Self(values))
    }

    /// Wrap an explicit option array after checking it is non-empty, finite
    /// and strictly increasing.
    pub fn from_values(values: Vec<f64>) -> Result<Self, ConfigurationError> {
        if values.is_empty() {
            return Err(ConfigurationError::EmptyOptions);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigurationError::NonFiniteParameter("options_array"));
        }
        if let Some(i) = values.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConfigurationError::NonMonotonicOptions(i + 1));
        }
        Ok(Self(values))
    }

    /// Resolve the option array a configuration describes.
    ///
    /// An explicit `options_array` wins over `min`/`max`/`step`.
    pub fn from_config(config: &SliderConfig) -> Result<Self, ConfigurationError> {
        match &config.options_array {
            Some(values) => Self::from_values(values.clone()),
            None => Self::build(config.min, config.max, config.step),
        }
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Smallest option.
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// Largest option.
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// All options in order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Index of the option closest to `value`.
    ///
    /// Values below the first option map to index 0, values above the last
    /// option map to the last index. Ties resolve to the lower index.
    pub fn nearest_index(&self, value: f64) -> usize {
        let upper = self.0.partition_point(|&opt| opt < value);
        if upper == 0 {
            return 0;
        }
        if upper == self.0.len() {
            return self.0.len() - 1;
        }
        let below = value - self.0[upper - 1];
        let above = self.0[upper] - value;
        if above < below {
            upper
        } else {
            upper - 1
        }
    }

    /// Option closest to `value`.
    pub fn nearest(&self, value: f64) -> f64 {
        self.0[self.nearest_index(value)]
    }

    /// Index of the option following `value`'s slot, saturating at the end.
    pub fn next_index(&self, value: f64) -> usize {
        (self.nearest_index(value) + 1).min(self.0.len() - 1)
    }

    /// Spacing of one option slot on a track of `length` pixels.
    pub fn step_length(&self, length: f64) -> f64 {
        length / self.0.len() as f64
    }

    /// Map `value` onto `[0, length]` by its option index.
    pub fn value_to_position(&self, value: f64, length: f64) -> f64 {
        self.index_to_position(self.nearest_index(value), length)
    }

    /// Pixel offset of option `index` on a track of `length` pixels.
    pub fn index_to_position(&self, index: usize, length: f64) -> f64 {
        let last = self.0.len() - 1;
        if last == 0 {
            return 0.0;
        }
        length * index as f64 / last as f64
    }

    /// Convert a pixel offset back to the nearest option.
    ///
    /// The proportional index is rounded and clamped, so any position,
    /// including ones outside `[0, length]`, yields a valid option.
    pub fn position_to_value(&self, position: f64, length: f64) -> f64 {
        let last = self.0.len() - 1;
        if last == 0 || length <= 0.0 || position.is_nan() {
            return self.0[0];
        }
        let index = (last as f64 * position / length).round();
        let index = index.clamp(0.0, last as f64) as usize;
        self.0[index]
    }
}

/// Build the option array for `(min, max, step)`.
pub fn build_options(min: f64, max: f64, step: f64) -> Result<OptionArray, ConfigurationError> {
    OptionArray::build(min, max, step)
}

/// Map `value` onto `[0, length]`.
pub fn value_to_position(value: f64, options: &OptionArray, length: f64) -> f64 {
    options.value_to_position(value, length)
}

/// Convert `position` on a track of `length` pixels to the nearest option.
pub fn position_to_value(position: f64, options: &OptionArray, length: f64) -> f64 {
    options.position_to_value(position, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_to_ten() -> OptionArray {
        build_options(0.0, 10.0, 1.0).unwrap()
    }

    #[test]
    fn test_build_inclusive_range() {
        let options = zero_to_ten();
        assert_eq!(options.len(), 11);
        assert_eq!(options.first(), 0.0);
        assert_eq!(options.last(), 10.0);
    }

    #[test]
    fn test_build_stops_below_max() {
        let options = build_options(0.0, 10.0, 3.0).unwrap();
        assert_eq!(options.as_slice(), &[0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_build_fractional_step() {
        let options = build_options(0.0, 1.0, 0.1).unwrap();
        assert_eq!(options.len(), 11);
        assert!((options.last() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_rejects_bad_parameters() {
        assert_eq!(build_options(0.0, 10.0, 0.0), Err(ConfigurationError::NonPositiveStep(0.0)));
        assert_eq!(build_options(0.0, 10.0, -1.0), Err(ConfigurationError::NonPositiveStep(-1.0)));
        assert_eq!(
            build_options(5.0, 1.0, 1.0),
            Err(ConfigurationError::InvertedRange { min: 5.0, max: 1.0 })
        );
        assert_eq!(
            build_options(f64::NAN, 1.0, 1.0),
            Err(ConfigurationError::NonFiniteParameter("min"))
        );
    }

    #[test]
    fn test_build_rejects_runaway_range() {
        assert_eq!(
            build_options(0.0, 1e12, 1.0),
            Err(ConfigurationError::TooManyOptions(MAX_OPTIONS))
        );
    }

    #[test]
    fn test_build_single_option() {
        let options = build_options(4.0, 4.0, 1.0).unwrap();
        assert_eq!(options.as_slice(), &[4.0]);
    }

    #[test]
    fn test_explicit_options_validation() {
        assert_eq!(OptionArray::from_values(vec![]), Err(ConfigurationError::EmptyOptions));
        assert_eq!(
            OptionArray::from_values(vec![1.0, 3.0, 3.0]),
            Err(ConfigurationError::NonMonotonicOptions(2))
        );
        assert!(OptionArray::from_values(vec![1.0, 2.5, 100.0]).is_ok());
    }

    #[test]
    fn test_explicit_options_override_range() {
        let config = SliderConfig::default().with_options(vec![1.0, 5.0, 25.0]);
        let options = OptionArray::from_config(&config).unwrap();
        assert_eq!(options.as_slice(), &[1.0, 5.0, 25.0]);
    }

    #[test]
    fn test_value_to_position_endpoints() {
        let options = zero_to_ten();
        assert_eq!(value_to_position(0.0, &options, 280.0), 0.0);
        assert_eq!(value_to_position(10.0, &options, 280.0), 280.0);
        assert_eq!(value_to_position(2.0, &options, 280.0), 56.0);
        assert_eq!(value_to_position(8.0, &options, 280.0), 224.0);
    }

    #[test]
    fn test_value_to_position_outside_range() {
        let options = zero_to_ten();
        assert_eq!(value_to_position(-3.0, &options, 280.0), 0.0);
        assert_eq!(value_to_position(42.0, &options, 280.0), 280.0);
    }

    #[test]
    fn test_position_to_value_rounds_and_clamps() {
        let options = zero_to_ten();
        assert_eq!(position_to_value(55.0, &options, 280.0), 2.0);
        assert_eq!(position_to_value(13.9, &options, 280.0), 0.0);
        assert_eq!(position_to_value(14.0, &options, 280.0), 1.0);
        assert_eq!(position_to_value(-50.0, &options, 280.0), 0.0);
        assert_eq!(position_to_value(10_000.0, &options, 280.0), 10.0);
    }

    #[test]
    fn test_round_trip() {
        let options = OptionArray::from_values(vec![1.0, 2.0, 4.0, 8.0, 16.0]).unwrap();
        for &v in options.as_slice() {
            let position = value_to_position(v, &options, 193.0);
            assert_eq!(position_to_value(position, &options, 193.0), v);
        }
    }

    #[test]
    fn test_degenerate_single_option() {
        let options = OptionArray::from_values(vec![7.0]).unwrap();
        assert_eq!(value_to_position(7.0, &options, 280.0), 0.0);
        assert_eq!(position_to_value(150.0, &options, 280.0), 7.0);
    }

    #[test]
    fn test_zero_length_track() {
        let options = zero_to_ten();
        assert_eq!(value_to_position(5.0, &options, 0.0), 0.0);
        assert_eq!(position_to_value(0.0, &options, 0.0), 0.0);
    }

    #[test]
    fn test_nearest_and_next() {
        let options = zero_to_ten();
        assert_eq!(options.nearest(2.4), 2.0);
        assert_eq!(options.nearest(2.6), 3.0);
        assert_eq!(options.nearest(2.5), 2.0);
        assert_eq!(options.next_index(4.0), 5);
        assert_eq!(options.next_index(10.0), 10);
    }

    #[test]
    fn test_step_length() {
        let options = zero_to_ten();
        assert!((options.step_length(280.0) - 280.0 / 11.0).abs() < 1e-12);
    }
}
