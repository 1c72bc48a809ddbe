//! Configuration reconciliation.
//!
//! A new configuration replaces the old one only while no handle is pressed;
//! an active gesture always wins over external re-configuration, and a
//! configuration offered mid-press is dropped without being inspected. When applied,
//! the option array and both handles are re-derived from scratch. Measured
//! marker sizes survive, since they belong to the rendered markers rather than
//! to the configuration.

use crate::discretizer::OptionArray;
use crate::types::{ConfigurationError, SliderConfig, SliderState};

/// Result of offering a configuration to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// A handle is pressed; the configuration was dropped.
    Ignored,
    /// The configuration took effect.
    Applied {
        /// The accepted configuration.
        config: SliderConfig,
        /// Option array for the new configuration.
        options: OptionArray,
        /// Freshly derived state.
        state: SliderState,
        /// Whether the option array had to be rebuilt.
        options_rebuilt: bool,
        /// Marker overflow under the new track length (zero when they fit).
        deficit: f64,
    },
}

/// Reconcile `incoming` against the current configuration and state.
///
/// While a handle is pressed the result is always [`Reconciliation::Ignored`],
/// even for a configuration that would fail validation.
pub fn reconcile(
    current: &SliderConfig,
    options: &OptionArray,
    state: &SliderState,
    incoming: SliderConfig,
) -> Result<Reconciliation, ConfigurationError> {
    if state.any_pressed() {
        return Ok(Reconciliation::Ignored);
    }

    incoming.validate()?;
    let rebuild = incoming.options_fingerprint() != current.options_fingerprint();
    let next_options = if rebuild {
        OptionArray::from_config(&incoming)?
    } else {
        options.clone()
    };

    let marker_two = state.two.map(|two| two.marker).unwrap_or_default();
    let (next_state, deficit) = SliderState::derive(&incoming, &next_options, state.one.marker, marker_two);

    Ok(Reconciliation::Applied {
        config: incoming,
        options: next_options,
        state: next_state,
        options_rebuilt: rebuild,
        deficit,
    })
}
