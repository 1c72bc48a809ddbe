//! Layout reconciliation against measured marker sizes.
//!
//! Marker sizes arrive from the rendering collaborator whenever a marker is
//! laid out, in any order and at any time. Each report is stored; geometry is
//! re-derived only when no handle is pressed and only when `available_size`
//! actually changes, which makes repeated identical reports no-ops.
//!
//! Reports that arrive mid-drag are held until the press ends
//! ([`settle`] runs after every release).

use serde::{Deserialize, Serialize};

use crate::discretizer::OptionArray;
use crate::types::{HandleId, MarkerSize, SliderConfig, SliderState, TrackGeometry};

/// A marker-size report from the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerMeasured {
    /// Measured handle.
    pub handle: HandleId,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl MarkerMeasured {
    /// Create a report.
    pub fn new(handle: HandleId, width: f64, height: f64) -> Self {
        Self { handle, width, height }
    }

    fn size(&self) -> MarkerSize {
        MarkerSize::new(sanitize(self.width), sanitize(self.height))
    }
}

/// Non-finite or negative sizes measure as zero.
fn sanitize(dimension: f64) -> f64 {
    if dimension.is_finite() && dimension > 0.0 {
        dimension
    } else {
        0.0
    }
}

/// Result of a layout report or settle pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LayoutOutcome {
    /// Available size did not change; state is untouched.
    Unchanged,
    /// The report named a handle this slider does not have.
    Ignored,
    /// A handle is pressed; the size is stored and geometry waits for release.
    Deferred,
    /// Geometry and positions were re-derived.
    Recomputed {
        /// The new geometry.
        geometry: TrackGeometry,
    },
    /// Markers are wider than the track; available size clamped to zero.
    Degenerate {
        /// The clamped geometry.
        geometry: TrackGeometry,
        /// How far the markers overflow the track.
        deficit: f64,
        /// Whether positions were re-derived.
        recomputed: bool,
    },
}

impl LayoutOutcome {
    /// Whether handle positions were re-derived.
    pub fn recomputed(&self) -> bool {
        match self {
            Self::Recomputed { .. } => true,
            Self::Degenerate { recomputed, .. } => *recomputed,
            _ => false,
        }
    }

    /// Whether the markers overflow the track.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }
}

/// Apply a marker-size report.
pub fn measure(
    config: &SliderConfig,
    options: &OptionArray,
    state: &SliderState,
    report: &MarkerMeasured,
) -> (SliderState, LayoutOutcome) {
    let mut next = state.clone();
    match next.handle_mut(report.handle) {
        Some(handle) => handle.marker = report.size(),
        None => return (next, LayoutOutcome::Ignored),
    }
    if next.any_pressed() {
        return (next, LayoutOutcome::Deferred);
    }
    settle(config, options, &next)
}

/// Re-derive geometry from the stored marker sizes if `available_size`
/// changed. Pressed handles are left alone.
pub fn settle(config: &SliderConfig, options: &OptionArray, state: &SliderState) -> (SliderState, LayoutOutcome) {
    if state.any_pressed() {
        return (state.clone(), LayoutOutcome::Deferred);
    }

    let width_two = state.two.map_or(0.0, |two| two.marker.width);
    let (geometry, deficit) =
        TrackGeometry::for_markers(config.slider_length, state.one.marker.width, width_two);

    let changed = geometry.available_size != state.track.available_size;
    let mut next = state.clone();
    if changed {
        next.track = geometry;
        let position_one = options.value_to_position(next.one.value, geometry.available_size);
        next.one.rest_at(position_one);
        if let Some(two) = next.two.as_mut() {
            let position_two =
                geometry.unavailable_length + options.value_to_position(two.value, geometry.available_size);
            two.rest_at(position_two);
        }
    }

    let outcome = if deficit > 0.0 {
        LayoutOutcome::Degenerate {
            geometry,
            deficit,
            recomputed: changed,
        }
    } else if changed {
        LayoutOutcome::Recomputed { geometry }
    } else {
        LayoutOutcome::Unchanged
    };
    (next, outcome)
}
