//! Scripted replay of gesture sessions.
//!
//! A [`ReplayScript`] is a JSON document holding an initial configuration and
//! a list of steps. [`run_script`] drives a [`SliderEngine`] with
//! [`RecordingCallbacks`] through every step and returns a [`ReplayReport`]
//! with the final state and the full effect log.
//!
//! ```json
//! {
//!   "config": { "values": [2, 8] },
//!   "toggles": ["one"],
//!   "steps": [
//!     { "step": "measure", "handle": "one", "width": 20, "height": 10 },
//!     { "step": "start", "handle": "two" },
//!     { "step": "move", "handle": "two", "dx": 28 },
//!     { "step": "end", "handle": "two", "dx": 28 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::callbacks::RecordingCallbacks;
use crate::controller::Disposition;
use crate::engine::{ConfigOutcome, SliderEngine};
use crate::layout::LayoutOutcome;
use crate::types::{
    ConfigurationError, Effect, GestureState, HandleId, RenderGeometry, SliderConfig, SliderValues,
    TrackGeometry,
};

/// Errors raised while loading or running a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The script file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON or has the wrong shape.
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    /// The initial configuration was rejected.
    #[error("invalid initial configuration: {0}")]
    Config(#[source] ConfigurationError),

    /// A `configure` step carried an invalid configuration.
    #[error("step {step}: invalid configuration: {source}")]
    Step {
        /// Zero-based step index.
        step: usize,
        /// Validation failure.
        #[source]
        source: ConfigurationError,
    },
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Press a handle.
    Start {
        /// Pressed handle.
        handle: HandleId,
    },
    /// Move the pointer; deltas are relative to the press origin.
    Move {
        /// Dragged handle.
        handle: HandleId,
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        #[serde(default)]
        dy: f64,
    },
    /// Release a handle. A zero `dx` is a tap.
    End {
        /// Released handle.
        handle: HandleId,
        /// Horizontal delta.
        #[serde(default)]
        dx: f64,
        /// Vertical delta.
        #[serde(default)]
        dy: f64,
    },
    /// Report a marker size.
    Measure {
        /// Measured handle.
        handle: HandleId,
        /// Rendered width.
        width: f64,
        /// Rendered height.
        height: f64,
    },
    /// Offer a new configuration.
    Configure {
        /// The configuration.
        config: SliderConfig,
    },
}

impl ReplayStep {
    fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Move { .. } => "move",
            Self::End { .. } => "end",
            Self::Measure { .. } => "measure",
            Self::Configure { .. } => "configure",
        }
    }
}

/// A replayable session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Initial configuration.
    #[serde(default)]
    pub config: SliderConfig,
    /// Handles with a toggle handler registered.
    #[serde(default)]
    pub toggles: Vec<HandleId>,
    /// Inputs, applied in order.
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    /// A gesture event and its disposition.
    Gesture {
        /// Applied or ignored.
        disposition: Disposition,
    },
    /// A marker report and its layout result.
    Layout {
        /// Layout result.
        layout: LayoutOutcome,
    },
    /// A configuration offer.
    Configure {
        /// Applied or ignored.
        result: ConfigOutcome,
    },
}

/// Per-step record in a [`ReplayReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Zero-based step index.
    pub index: usize,
    /// Step kind.
    pub step: &'static str,
    /// What happened.
    pub outcome: StepOutcome,
    /// Values after the step.
    pub values: SliderValues,
}

/// Result of running a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Final values.
    pub values: SliderValues,
    /// Final rendered positions, one per handle.
    pub positions: Vec<f64>,
    /// Final track geometry.
    pub track: TrackGeometry,
    /// Final render geometry.
    pub geometry: RenderGeometry,
    /// Every effect, in the order callbacks ran.
    pub effects: Vec<Effect>,
    /// Per-step log.
    pub steps: Vec<StepRecord>,
}

/// Run `script` against a fresh engine.
pub fn run_script(script: &ReplayScript) -> Result<ReplayReport, ReplayError> {
    let callbacks = script
        .toggles
        .iter()
        .fold(RecordingCallbacks::new(), |cb, handle| cb.with_toggle(*handle));
    let mut engine = SliderEngine::new(script.config.clone(), callbacks).map_err(ReplayError::Config)?;

    tracing::info!(steps = script.steps.len(), handles = script.config.values.len(), "replay started");

    let mut records = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let outcome = apply(&mut engine, step).map_err(|source| ReplayError::Step { step: index, source })?;
        tracing::debug!(index = index, step = step.name(), outcome = ?outcome, "replay step");
        records.push(StepRecord {
            index,
            step: step.name(),
            outcome,
            values: engine.values(),
        });
    }

    let state = engine.state();
    let mut positions = vec![state.one.position];
    if let Some(two) = state.two {
        positions.push(two.position);
    }
    let report = ReplayReport {
        values: engine.values(),
        positions,
        track: state.track,
        geometry: engine.geometry(),
        effects: engine.callbacks().effects.clone(),
        steps: records,
    };

    tracing::info!(values = ?report.values, effects = report.effects.len(), "replay finished");
    Ok(report)
}

fn apply(engine: &mut SliderEngine<RecordingCallbacks>, step: &ReplayStep) -> Result<StepOutcome, ConfigurationError> {
    let disposition = match step {
        ReplayStep::Start { handle } => engine.start(*handle),
        ReplayStep::Move { handle, dx, dy } => engine.move_handle(*handle, GestureState::drag(*dx, *dy)),
        ReplayStep::End { handle, dx, dy } => engine.end(*handle, release_gesture(*dx, *dy)),
        ReplayStep::Measure { handle, width, height } => {
            let layout = engine.measure_marker(*handle, *width, *height);
            return Ok(StepOutcome::Layout { layout });
        }
        ReplayStep::Configure { config } => {
            let result = engine.reconfigure(config.clone())?;
            return Ok(StepOutcome::Configure { result });
        }
    };
    // Recording callbacks are infallible.
    let disposition = match disposition {
        Ok(disposition) => disposition,
        Err(never) => match never {},
    };
    Ok(StepOutcome::Gesture { disposition })
}

fn release_gesture(dx: f64, dy: f64) -> GestureState {
    if dx == 0.0 {
        GestureState { dy, ..GestureState::tap() }
    } else {
        GestureState::drag(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAG_SCRIPT: &str = r#"{
        "config": { "values": [2, 8] },
        "steps": [
            { "step": "start", "handle": "two" },
            { "step": "move", "handle": "two", "dx": 28 },
            { "step": "end", "handle": "two", "dx": 28 }
        ]
    }"#;

    #[test]
    fn test_run_drag_script() {
        let script = ReplayScript::from_json(DRAG_SCRIPT).unwrap();
        let report = run_script(&script).unwrap();

        assert_eq!(report.values, vec![2.0, 9.0]);
        assert_eq!(report.positions, vec![56.0, 252.0]);
        assert_eq!(report.effects.len(), 3);
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.steps[1].values, vec![2.0, 9.0]);
        assert_eq!(
            report.steps[0].outcome,
            StepOutcome::Gesture {
                disposition: Disposition::Applied
            }
        );
    }

    #[test]
    fn test_toggle_script() {
        let script = ReplayScript::from_json(
            r#"{
                "config": { "values": [5] },
                "toggles": ["one"],
                "steps": [
                    { "step": "start", "handle": "one" },
                    { "step": "end", "handle": "one" }
                ]
            }"#,
        )
        .unwrap();
        let report = run_script(&script).unwrap();
        assert_eq!(report.effects, vec![Effect::ValuesChangeStart, Effect::Toggle(HandleId::One)]);
    }

    #[test]
    fn test_measure_and_configure_steps() {
        let script = ReplayScript {
            config: SliderConfig::default().with_values(vec![2.0, 8.0]),
            toggles: Vec::new(),
            steps: vec![
                ReplayStep::Measure {
                    handle: HandleId::One,
                    width: 20.0,
                    height: 10.0,
                },
                ReplayStep::Configure {
                    config: SliderConfig::default().with_values(vec![4.0, 6.0]),
                },
            ],
        };
        let report = run_script(&script).unwrap();
        assert!(matches!(report.steps[0].outcome, StepOutcome::Layout { .. }));
        assert_eq!(
            report.steps[1].outcome,
            StepOutcome::Configure {
                result: ConfigOutcome::Applied { options_rebuilt: false }
            }
        );
        assert_eq!(report.track.available_size, 260.0);
        assert_eq!(report.values, vec![4.0, 6.0]);
    }

    #[test]
    fn test_invalid_configure_step() {
        let script = ReplayScript {
            config: SliderConfig::default(),
            toggles: Vec::new(),
            steps: vec![ReplayStep::Configure {
                config: SliderConfig::default().with_range(5.0, 1.0, 1.0),
            }],
        };
        match run_script(&script) {
            Err(ReplayError::Step { step, .. }) => assert_eq!(step, 0),
            other => panic!("expected step error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(ReplayScript::from_json("{ not json"), Err(ReplayError::Parse(_))));
    }
}
