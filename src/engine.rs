//! Slider engine: owns configuration and state, commits reducer output, and
//! runs callbacks.
//!
//! Every entry point follows the same sequence:
//!
//! 1. Run a pure reducer over the current snapshot.
//! 2. Commit the resulting state.
//! 3. Run the resulting effects through [`SliderCallbacks`], in order.
//!
//! A callback error stops step 3 and is returned as-is. The committed state
//! stays in place.

use serde::{Deserialize, Serialize};

use crate::callbacks::{NoCallbacks, SliderCallbacks};
use crate::controller::{self, Disposition, GestureContext};
use crate::discretizer::OptionArray;
use crate::layout::{self, LayoutOutcome, MarkerMeasured};
use crate::reconcile::{self, Reconciliation};
use crate::types::{
    ConfigurationError, Effect, GestureEvent, GestureState, HandleId, MarkerSize, RenderGeometry,
    SliderConfig, SliderState, SliderValues,
};

/// Result of [`SliderEngine::reconfigure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOutcome {
    /// The configuration took effect.
    Applied {
        /// Whether the option array was rebuilt.
        options_rebuilt: bool,
    },
    /// A handle was pressed; the configuration was dropped.
    Ignored,
}

/// Interaction engine for a single or dual-handle slider.
///
/// ## Example
///
/// ```
/// use range_slider_kernel::{SliderEngine, SliderConfig, HandleId, GestureState, RecordingCallbacks};
///
/// let config = SliderConfig::default().with_values(vec![2.0, 8.0]);
/// let mut engine = SliderEngine::new(config, RecordingCallbacks::new()).unwrap();
///
/// engine.start(HandleId::One).unwrap();
/// engine.move_handle(HandleId::One, GestureState::drag(56.0, 0.0)).unwrap();
/// engine.end(HandleId::One, GestureState::drag(56.0, 0.0)).unwrap();
///
/// assert_eq!(engine.values(), vec![4.0, 8.0]);
/// assert_eq!(engine.callbacks().finishes(), vec![vec![4.0, 8.0]]);
/// ```
#[derive(Debug)]
pub struct SliderEngine<C: SliderCallbacks = NoCallbacks> {
    config: SliderConfig,
    options: OptionArray,
    state: SliderState,
    callbacks: C,
}

impl SliderEngine<NoCallbacks> {
    /// Create an engine without callbacks.
    pub fn without_callbacks(config: SliderConfig) -> Result<Self, ConfigurationError> {
        Self::new(config, NoCallbacks)
    }
}

impl<C: SliderCallbacks> SliderEngine<C> {
    /// Create an engine seeded from `config`.
    pub fn new(config: SliderConfig, callbacks: C) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let options = OptionArray::from_config(&config)?;
        let (state, _) = SliderState::derive(&config, &options, MarkerSize::default(), MarkerSize::default());

        tracing::debug!(
            handles = config.values.len(),
            options = options.len(),
            slider_length = config.slider_length,
            options_fingerprint = %config.options_fingerprint(),
            "slider engine created"
        );

        Ok(Self {
            config,
            options,
            state,
            callbacks,
        })
    }

    /// Deliver a gesture event for `handle`.
    pub fn dispatch(&mut self, handle: HandleId, event: GestureEvent) -> Result<Disposition, C::Error> {
        tracing::trace!(handle = %handle, event = ?event, "gesture event");

        let ctx = GestureContext::new(&self.config, &self.options)
            .with_toggle(self.callbacks.has_toggle(handle));
        let transition = controller::reduce(&ctx, &self.state, handle, &event);

        let mut next = transition.state;
        match transition.disposition {
            Disposition::Ignored(reason) => {
                tracing::debug!(handle = %handle, reason = ?reason, "gesture event ignored");
            }
            Disposition::Applied => {
                if matches!(event, GestureEvent::End(_)) {
                    let (settled, outcome) = layout::settle(&self.config, &self.options, &next);
                    log_layout(&outcome);
                    next = settled;
                }
            }
        }

        self.commit(next, &transition.effects)?;
        Ok(transition.disposition)
    }

    /// A press on `handle` began.
    pub fn start(&mut self, handle: HandleId) -> Result<Disposition, C::Error> {
        self.dispatch(handle, GestureEvent::Start)
    }

    /// The pointer pressing `handle` moved.
    pub fn move_handle(&mut self, handle: HandleId, gesture: GestureState) -> Result<Disposition, C::Error> {
        self.dispatch(handle, GestureEvent::Move(gesture))
    }

    /// The press on `handle` ended, by release or forced termination.
    pub fn end(&mut self, handle: HandleId, gesture: GestureState) -> Result<Disposition, C::Error> {
        self.dispatch(handle, GestureEvent::End(gesture))
    }

    /// Whether the host may take the gesture away from `handle`.
    ///
    /// Always `false`. The host must deliver an end event instead.
    pub fn grant_termination(&self, handle: HandleId) -> bool {
        let granted = controller::grant_termination(handle);
        tracing::trace!(handle = %handle, pressed = self.is_pressed(handle), "termination request refused");
        granted
    }

    /// Report the measured size of `handle`'s marker.
    pub fn measure_marker(&mut self, handle: HandleId, width: f64, height: f64) -> LayoutOutcome {
        let report = MarkerMeasured::new(handle, width, height);
        let (next, outcome) = layout::measure(&self.config, &self.options, &self.state, &report);
        log_layout(&outcome);
        if outcome == LayoutOutcome::Ignored {
            tracing::debug!(handle = %handle, "marker report for missing handle ignored");
        }
        self.state = next;
        outcome
    }

    /// Offer a new configuration.
    ///
    /// Dropped unexamined while either handle is pressed. Otherwise an
    /// invalid configuration is an error and leaves the engine untouched.
    pub fn reconfigure(&mut self, config: SliderConfig) -> Result<ConfigOutcome, ConfigurationError> {
        match reconcile::reconcile(&self.config, &self.options, &self.state, config)? {
            Reconciliation::Ignored => {
                tracing::debug!("configuration ignored while a handle is pressed");
                Ok(ConfigOutcome::Ignored)
            }
            Reconciliation::Applied {
                config,
                options,
                state,
                options_rebuilt,
                deficit,
            } => {
                if deficit > 0.0 {
                    tracing::warn!(
                        deficit = deficit,
                        slider_length = config.slider_length,
                        "markers overflow the reconfigured track"
                    );
                }
                tracing::debug!(
                    options_rebuilt = options_rebuilt,
                    options = options.len(),
                    values = ?state.values(),
                    "configuration applied"
                );
                self.config = config;
                self.options = options;
                self.state = state;
                Ok(ConfigOutcome::Applied { options_rebuilt })
            }
        }
    }

    fn commit(&mut self, state: SliderState, effects: &[Effect]) -> Result<(), C::Error> {
        self.state = state;
        for effect in effects {
            tracing::trace!(effect = effect.name(), "running callback");
            self.callbacks.dispatch(effect)?;
        }
        Ok(())
    }

    /// Active configuration.
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Active option array.
    pub fn options(&self) -> &OptionArray {
        &self.options
    }

    /// Current state snapshot.
    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Current values.
    pub fn values(&self) -> SliderValues {
        self.state.values()
    }

    /// Whether `handle` is pressed.
    pub fn is_pressed(&self, handle: HandleId) -> bool {
        self.state.handle(handle).map_or(false, |h| h.pressed)
    }

    /// Pixel width of one option slot.
    pub fn step_length(&self) -> f64 {
        self.options.step_length(self.config.slider_length)
    }

    /// Geometry for the rendering collaborator.
    pub fn geometry(&self) -> RenderGeometry {
        self.state.render(&self.config)
    }

    /// Registered callbacks.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Registered callbacks, mutably.
    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Consume the engine and return its callbacks.
    pub fn into_callbacks(self) -> C {
        self.callbacks
    }
}

fn log_layout(outcome: &LayoutOutcome) {
    match outcome {
        LayoutOutcome::Degenerate { geometry, deficit, recomputed } => {
            tracing::warn!(
                deficit = *deficit,
                unavailable_length = geometry.unavailable_length,
                recomputed = *recomputed,
                "markers overflow the track, available size clamped to zero"
            );
        }
        LayoutOutcome::Recomputed { geometry } => {
            tracing::debug!(
                available_size = geometry.available_size,
                unavailable_length = geometry.unavailable_length,
                "track geometry recomputed"
            );
        }
        LayoutOutcome::Deferred => {
            tracing::debug!("marker size stored, geometry deferred until release");
        }
        LayoutOutcome::Unchanged | LayoutOutcome::Ignored => {}
    }
}
