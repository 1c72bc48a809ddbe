//! Gesture events consumed by the engine and effects it produces.

use serde::{Deserialize, Serialize};

use super::handle::HandleId;

/// Cumulative gesture displacement as reported by the host recognizer.
///
/// `dx`/`dy` are measured from the point where the press began.
/// `move_x` is the latest horizontal pointer coordinate; recognizers report
/// `0` when the pointer never moved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureState {
    /// Horizontal displacement since press start.
    pub dx: f64,
    /// Vertical displacement since press start.
    pub dy: f64,
    /// Latest horizontal pointer coordinate.
    pub move_x: f64,
}

impl GestureState {
    /// Gesture with the given displacement and a non-zero pointer coordinate.
    pub fn drag(dx: f64, dy: f64) -> Self {
        Self { dx, dy, move_x: dx.abs().max(1.0) }
    }

    /// Release without any horizontal movement.
    pub fn tap() -> Self {
        Self::default()
    }

    /// Whether the release counts as a tap.
    ///
    /// A release is a tap when the pointer never moved horizontally
    /// (`move_x == 0`). A drag that returns to its start pixel still has a
    /// non-zero `move_x` and is not a tap.
    pub fn is_tap(&self) -> bool {
        self.move_x == 0.0
    }
}

/// A gesture event for one handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Press began.
    Start,
    /// Pointer moved.
    Move(GestureState),
    /// Press ended, by release or forced termination.
    End(GestureState),
}

/// Current handle values: one entry for a single slider, two for a range.
pub type SliderValues = Vec<f64>;

/// A user callback the engine asks the host to run.
///
/// Effects are produced by the reducers and executed by the engine only after
/// the new state has been committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "payload", rename_all = "snake_case")]
pub enum Effect {
    /// A handle was pressed.
    ValuesChangeStart,
    /// A handle's discretized value changed during a drag.
    ValuesChange(SliderValues),
    /// A drag completed.
    ValuesChangeFinish(SliderValues),
    /// A handle was tapped.
    Toggle(HandleId),
}

impl Effect {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValuesChangeStart => "values_change_start",
            Self::ValuesChange(_) => "values_change",
            Self::ValuesChangeFinish(_) => "values_change_finish",
            Self::Toggle(_) => "toggle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_detection() {
        assert!(GestureState::tap().is_tap());
        assert!(!GestureState::drag(0.0, 0.0).is_tap());
        assert!(!GestureState::drag(-40.0, 3.0).is_tap());
    }

    #[test]
    fn test_event_serde_shape() {
        let json = serde_json::to_value(GestureEvent::Move(GestureState::drag(5.0, 0.0))).unwrap();
        assert_eq!(json["kind"], "move");
        assert_eq!(json["dx"], 5.0);

        let effect = serde_json::to_value(Effect::Toggle(HandleId::Two)).unwrap();
        assert_eq!(effect["effect"], "toggle");
        assert_eq!(effect["payload"], "two");
    }
}
