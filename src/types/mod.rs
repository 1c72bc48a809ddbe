//! Core types for the slider kernel.

pub mod handle;
pub mod config;
pub mod gesture;
pub mod geometry;
pub mod state;

pub use handle::{HandleId, HandleState, Direction, MarkerSize};
pub use config::{SliderConfig, TouchDimensions, ConfigurationError};
pub use gesture::{GestureState, GestureEvent, Effect, SliderValues};
pub use geometry::{TrackGeometry, RenderGeometry, MarkerContainer, SelectedSegment};
pub use state::SliderState;
