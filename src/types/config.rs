//! Slider configuration snapshot.
//!
//! A `SliderConfig` is immutable once handed to the engine. Hosts replace it
//! wholesale through [`SliderEngine::reconfigure`](crate::SliderEngine::reconfigure).
//!
//! ## Defaults
//!
//! | Option | Default |
//! |--------|---------|
//! | `values` | `[0]` |
//! | `min` / `max` / `step` | `0` / `10` / `1` |
//! | `slider_length` | `280` |
//! | `touch_dimensions.slip_displacement` | `200` |
//! | `allow_overlap` / `snapped` | `false` / `false` |
//! | `enabled_one` / `enabled_two` | `true` / `true` |

use serde::{Deserialize, Serialize};

use super::handle::Direction;
use crate::canonical::{quantize_float, Fingerprint};

/// Error raised when a configuration cannot describe a valid slider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// Step must be strictly positive.
    #[error("Step must be positive, got {0}")]
    NonPositiveStep(f64),
    /// `max` is below `min`.
    #[error("Inverted range: max {max} is below min {min}")]
    InvertedRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A numeric parameter is NaN or infinite.
    #[error("Parameter {0} must be finite")]
    NonFiniteParameter(&'static str),
    /// The option array resolved to no entries.
    #[error("Option array is empty")]
    EmptyOptions,
    /// The option array is not strictly increasing.
    #[error("Option array is not strictly increasing at index {0}")]
    NonMonotonicOptions(usize),
    /// The generated option array would exceed the supported size.
    #[error("Option array would exceed {0} entries")]
    TooManyOptions(usize),
    /// `values` must hold one or two entries.
    #[error("Expected 1 or 2 values, got {0}")]
    InvalidValueCount(usize),
    /// The low value exceeds the high value.
    #[error("Values out of order: {0} > {1}")]
    UnorderedValues(f64, f64),
    /// Slider length must be finite and non-negative.
    #[error("Slider length must be non-negative, got {0}")]
    InvalidSliderLength(f64),
    /// Configuration could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Touch target dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchDimensions {
    /// Vertical drag distance beyond which horizontal updates are suppressed.
    /// Zero disables the guard.
    pub slip_displacement: f64,
    /// Corner radius of the touch target (rendering only).
    pub border_radius: f64,
}

impl Default for TouchDimensions {
    fn default() -> Self {
        Self {
            slip_displacement: 200.0,
            border_radius: 15.0,
        }
    }
}

impl TouchDimensions {
    /// Whether a gesture with vertical delta `dy` has slipped off the track.
    pub fn slipped(&self, dy: f64) -> bool {
        self.slip_displacement > 0.0 && dy.abs() >= self.slip_displacement
    }
}

/// Immutable slider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Initial value(s); one entry for a single handle, two for a range.
    pub values: Vec<f64>,
    /// Lower bound of the generated option array.
    pub min: f64,
    /// Upper bound of the generated option array.
    pub max: f64,
    /// Spacing of the generated option array.
    pub step: f64,
    /// Explicit option array; overrides `min`/`max`/`step`.
    pub options_array: Option<Vec<f64>>,
    /// Total pixel length of the track.
    pub slider_length: f64,
    /// Disable the minimum separation between handles.
    pub allow_overlap: bool,
    /// Render handles at their quantized slot instead of the drag pixel.
    pub snapped: bool,
    /// Accept gestures on handle one.
    pub enabled_one: bool,
    /// Accept gestures on handle two.
    pub enabled_two: bool,
    /// Touch target dimensions.
    pub touch_dimensions: TouchDimensions,
    /// Horizontal marker offset (rendering only).
    pub marker_offset_x: f64,
    /// Vertical marker offset (rendering only).
    pub marker_offset_y: f64,
    /// Track thickness (rendering only).
    pub track_height: f64,
    /// Layout direction.
    pub direction: Direction,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            values: vec![0.0],
            min: 0.0,
            max: 10.0,
            step: 1.0,
            options_array: None,
            slider_length: 280.0,
            allow_overlap: false,
            snapped: false,
            enabled_one: true,
            enabled_two: true,
            touch_dimensions: TouchDimensions::default(),
            marker_offset_x: 0.0,
            marker_offset_y: 0.0,
            track_height: 2.0,
            direction: Direction::Ltr,
        }
    }
}

impl SliderConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Set the initial values.
    pub fn with_values(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.values = values.into();
        self
    }

    /// Set the generated range.
    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    /// Use an explicit option array.
    pub fn with_options(mut self, options: impl Into<Vec<f64>>) -> Self {
        self.options_array = Some(options.into());
        self
    }

    /// Set the track length.
    pub fn with_slider_length(mut self, slider_length: f64) -> Self {
        self.slider_length = slider_length;
        self
    }

    /// Allow or forbid overlapping handles.
    pub fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    /// Enable or disable snapping.
    pub fn with_snapped(mut self, snapped: bool) -> Self {
        self.snapped = snapped;
        self
    }

    /// Enable or disable each handle.
    pub fn with_enabled(mut self, enabled_one: bool, enabled_two: bool) -> Self {
        self.enabled_one = enabled_one;
        self.enabled_two = enabled_two;
        self
    }

    /// Set the slip displacement guard. Zero disables it.
    pub fn with_slip_displacement(mut self, slip_displacement: f64) -> Self {
        self.touch_dimensions.slip_displacement = slip_displacement;
        self
    }

    /// Set the layout direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Whether the configuration describes a two-handle range.
    pub fn is_range(&self) -> bool {
        self.values.len() == 2
    }

    /// Check the parameters that are independent of the option array.
    ///
    /// Option-array checks happen in
    /// [`OptionArray::from_config`](crate::discretizer::OptionArray::from_config).
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.slider_length.is_finite() && self.slider_length >= 0.0) {
            return Err(ConfigurationError::InvalidSliderLength(self.slider_length));
        }
        if !(self.values.len() == 1 || self.values.len() == 2) {
            return Err(ConfigurationError::InvalidValueCount(self.values.len()));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigurationError::NonFiniteParameter("values"));
        }
        if let [low, high] = self.values.as_slice() {
            if low > high {
                return Err(ConfigurationError::UnorderedValues(*low, *high));
            }
        }
        if !self.touch_dimensions.slip_displacement.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("slip_displacement"));
        }
        Ok(())
    }

    /// Fingerprint of everything that shapes the option array.
    ///
    /// Floats are quantized (×1e6, rounded to i64) before hashing so that
    /// equal configurations hash equally regardless of float formatting.
    pub fn options_fingerprint(&self) -> Fingerprint {
        let mut words = vec![
            quantize_float(self.min),
            quantize_float(self.max),
            quantize_float(self.step),
        ];
        match &self.options_array {
            Some(options) => {
                words.push(1);
                words.push(options.len() as i64);
                words.extend(options.iter().copied().map(quantize_float));
            }
            None => words.push(0),
        }
        Fingerprint::of_quantized(&words)
    }
}
