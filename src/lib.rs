//! # range-slider-kernel
//!
//! Deterministic interaction kernel for single and dual-handle range sliders.
//!
//! The kernel turns pointer gestures into discretized values. It owns no
//! rendering: a host feeds it gesture events and marker-size reports, and
//! reads back values, handle positions, and [`RenderGeometry`].
//!
//! ## Core Contract
//!
//! 1. Values are always members of the option array built from
//!    `min`/`max`/`step` or supplied explicitly.
//! 2. Handle One never passes handle Two. With `allow_overlap` disabled they
//!    stay at least one option apart while dragging.
//! 3. Drag deltas are applied to the press origin, so the same gesture always
//!    lands on the same value.
//! 4. An active press always wins over external re-configuration.
//!
//! ## Architecture
//!
//! ```text
//! GestureEvent ─▶ controller::reduce ─▶ Transition ─▶ SliderEngine ─▶ SliderCallbacks
//!                     │                                   ▲
//!               CollisionPolicy                  layout::measure / settle
//!               OptionArray                      reconcile::reconcile
//! ```
//!
//! Every reducer is a pure function over a [`SliderState`] snapshot. The
//! engine commits the result and only then runs callbacks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod canonical;
pub mod discretizer;
pub mod policy;
pub mod controller;
pub mod layout;
pub mod reconcile;
pub mod callbacks;
pub mod engine;
pub mod replay;

// Re-exports
pub use types::{
    ConfigurationError, Direction, Effect, GestureEvent, GestureState, HandleId, HandleState,
    MarkerContainer, MarkerSize, RenderGeometry, SelectedSegment, SliderConfig, SliderState,
    SliderValues, TouchDimensions, TrackGeometry,
};
pub use canonical::{quantize_float, Fingerprint, FLOAT_QUANTIZATION_FACTOR};
pub use discretizer::{build_options, position_to_value, value_to_position, OptionArray, MAX_OPTIONS};
pub use policy::{Bounds, CollisionPolicy};
pub use controller::{Disposition, GestureContext, IgnoreReason, Transition};
pub use layout::{LayoutOutcome, MarkerMeasured};
pub use reconcile::Reconciliation;
pub use callbacks::{NoCallbacks, RecordingCallbacks, SliderCallbacks};
pub use engine::{ConfigOutcome, SliderEngine};
pub use replay::{run_script, ReplayError, ReplayReport, ReplayScript, ReplayStep};
