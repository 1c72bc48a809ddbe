//! User callbacks.
//!
//! The engine runs callbacks only after the new state is committed, so a
//! failing callback never leaves the engine half-updated. Errors are returned
//! to the caller unchanged; the engine does not retry or swallow them.

use std::convert::Infallible;

use crate::types::{Effect, HandleId};

/// Host hooks invoked by the engine.
///
/// All methods have no-op defaults. A toggle hook only takes effect for
/// handles where [`has_toggle`](SliderCallbacks::has_toggle) returns `true`.
pub trait SliderCallbacks {
    /// Error type for callback failures.
    type Error: std::error::Error;

    /// A handle was pressed.
    fn on_values_change_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A handle's discretized value changed during a drag.
    fn on_values_change(&mut self, _values: &[f64]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A drag completed.
    fn on_values_change_finish(&mut self, _values: &[f64]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Whether taps on `handle` should toggle instead of finishing a drag.
    fn has_toggle(&self, _handle: HandleId) -> bool {
        false
    }

    /// `handle` was tapped.
    fn on_toggle(&mut self, _handle: HandleId) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Run one effect.
    fn dispatch(&mut self, effect: &Effect) -> Result<(), Self::Error> {
        match effect {
            Effect::ValuesChangeStart => self.on_values_change_start(),
            Effect::ValuesChange(values) => self.on_values_change(values),
            Effect::ValuesChangeFinish(values) => self.on_values_change_finish(values),
            Effect::Toggle(handle) => self.on_toggle(*handle),
        }
    }
}

/// Callbacks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallbacks;

impl SliderCallbacks for NoCallbacks {
    type Error = Infallible;
}

/// Callbacks that record every effect, for hosts that poll and for tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingCallbacks {
    /// Effects in the order they ran.
    pub effects: Vec<Effect>,
    /// Handles with a toggle hook registered.
    pub toggles: Vec<HandleId>,
}

impl RecordingCallbacks {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a toggle hook for `handle`.
    pub fn with_toggle(mut self, handle: HandleId) -> Self {
        if !self.toggles.contains(&handle) {
            self.toggles.push(handle);
        }
        self
    }

    /// Number of recorded effects with the given name.
    pub fn count(&self, name: &str) -> usize {
        self.effects.iter().filter(|e| e.name() == name).count()
    }

    /// Values of every recorded `ValuesChange`, in order.
    pub fn changes(&self) -> Vec<Vec<f64>> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::ValuesChange(values) => Some(values.clone()),
                _ => None,
            })
            .collect()
    }

    /// Values of every recorded `ValuesChangeFinish`, in order.
    pub fn finishes(&self) -> Vec<Vec<f64>> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::ValuesChangeFinish(values) => Some(values.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SliderCallbacks for RecordingCallbacks {
    type Error = Infallible;

    fn has_toggle(&self, handle: HandleId) -> bool {
        self.toggles.contains(&handle)
    }

    fn dispatch(&mut self, effect: &Effect) -> Result<(), Self::Error> {
        self.effects.push(effect.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("rejected")]
    struct Rejected;

    #[derive(Default)]
    struct Counting {
        finishes: usize,
    }

    impl SliderCallbacks for Counting {
        type Error = Rejected;

        fn on_values_change_finish(&mut self, _values: &[f64]) -> Result<(), Self::Error> {
            self.finishes += 1;
            Err(Rejected)
        }
    }

    #[test]
    fn test_default_dispatch_routes_to_hooks() {
        let mut cb = Counting::default();
        assert!(cb.dispatch(&Effect::ValuesChangeStart).is_ok());
        assert!(cb.dispatch(&Effect::ValuesChangeFinish(vec![1.0])).is_err());
        assert_eq!(cb.finishes, 1);
        assert!(!cb.has_toggle(HandleId::One));
    }

    #[test]
    fn test_recording_counts() {
        let mut cb = RecordingCallbacks::new().with_toggle(HandleId::Two);
        cb.dispatch(&Effect::ValuesChange(vec![1.0, 4.0])).unwrap();
        cb.dispatch(&Effect::ValuesChangeFinish(vec![1.0, 4.0])).unwrap();
        assert_eq!(cb.count("values_change"), 1);
        assert_eq!(cb.changes(), vec![vec![1.0, 4.0]]);
        assert_eq!(cb.finishes(), vec![vec![1.0, 4.0]]);
        assert!(cb.has_toggle(HandleId::Two));
        assert!(!cb.has_toggle(HandleId::One));
    }
}
