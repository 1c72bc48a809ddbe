//! Handle identity and per-handle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the two draggable handles on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleId {
    /// The low handle. Always present.
    One,
    /// The high handle. Present only for range sliders.
    Two,
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "one"),
            Self::Two => write!(f, "two"),
        }
    }
}

/// Layout direction of the track.
///
/// Right-to-left layouts negate the horizontal gesture delta before it is
/// applied to a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// Apply the direction to a raw horizontal delta.
    pub fn signed(&self, dx: f64) -> f64 {
        match self {
            Self::Ltr => dx,
            Self::Rtl => -dx,
        }
    }
}

/// Measured size of a handle's marker.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerSize {
    /// Rendered width in pixels.
    pub width: f64,
    /// Rendered height in pixels.
    pub height: f64,
}

impl MarkerSize {
    /// Create a new marker size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Mutable record for a single handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleState {
    /// Current value, always an element of the option array.
    pub value: f64,
    /// Rendered pixel offset along the track.
    pub position: f64,
    /// Position snapshotted when the current press began.
    pub past_position: f64,
    /// Whether a gesture currently owns this handle.
    pub pressed: bool,
    /// Last measured marker size.
    pub marker: MarkerSize,
}

impl HandleState {
    /// Create an idle handle resting at `position`.
    pub fn new(value: f64, position: f64) -> Self {
        Self {
            value,
            position,
            past_position: position,
            pressed: false,
            marker: MarkerSize::default(),
        }
    }

    /// Move the handle to `position` and make it the new drag origin.
    pub fn rest_at(&mut self, position: f64) {
        self.position = position;
        self.past_position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Ltr.signed(12.0), 12.0);
        assert_eq!(Direction::Rtl.signed(12.0), -12.0);
    }

    #[test]
    fn test_handle_id_names() {
        assert_eq!(HandleId::Two.to_string(), "two");
        assert_eq!(serde_json::to_string(&HandleId::One).unwrap(), "\"one\"");
    }

    #[test]
    fn test_rest_at_resets_origin() {
        let mut handle = HandleState::new(3.0, 10.0);
        handle.position = 40.0;
        handle.rest_at(25.0);
        assert_eq!(handle.position, 25.0);
        assert_eq!(handle.past_position, 25.0);
    }
}
