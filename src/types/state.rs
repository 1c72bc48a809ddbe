//! Explicit engine state snapshot.

use serde::{Deserialize, Serialize};

use super::config::SliderConfig;
use super::geometry::{MarkerContainer, RenderGeometry, SelectedSegment, TrackGeometry};
use super::gesture::SliderValues;
use super::handle::{HandleId, HandleState, MarkerSize};
use crate::discretizer::OptionArray;

/// Complete mutable state of a slider.
///
/// Reducers take a snapshot by reference and return a new one; the engine
/// swaps it in before running any callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderState {
    /// Handle one.
    pub one: HandleState,
    /// Handle two, present for range sliders.
    pub two: Option<HandleState>,
    /// Current track geometry.
    pub track: TrackGeometry,
}

impl SliderState {
    /// Derive a resting state from configuration values and marker sizes.
    ///
    /// Values snap to their nearest option. Returns the state and the marker
    /// overflow (non-zero when the markers do not fit on the track).
    pub fn derive(
        config: &SliderConfig,
        options: &OptionArray,
        marker_one: MarkerSize,
        marker_two: MarkerSize,
    ) -> (Self, f64) {
        let marker_two = if config.is_range() { marker_two } else { MarkerSize::default() };
        let (track, overflow) =
            TrackGeometry::for_markers(config.slider_length, marker_one.width, marker_two.width);

        let value_one = options.nearest(config.values[0]);
        let mut one = HandleState::new(value_one, options.value_to_position(value_one, track.available_size));
        one.marker = marker_one;

        let two = config.values.get(1).map(|&raw| {
            let value = options.nearest(raw);
            let position = track.unavailable_length + options.value_to_position(value, track.available_size);
            let mut two = HandleState::new(value, position);
            two.marker = marker_two;
            two
        });

        (Self { one, two, track }, overflow)
    }

    /// Handle by id. `None` for handle two on a single slider.
    pub fn handle(&self, id: HandleId) -> Option<&HandleState> {
        match id {
            HandleId::One => Some(&self.one),
            HandleId::Two => self.two.as_ref(),
        }
    }

    /// Mutable handle by id.
    pub fn handle_mut(&mut self, id: HandleId) -> Option<&mut HandleState> {
        match id {
            HandleId::One => Some(&mut self.one),
            HandleId::Two => self.two.as_mut(),
        }
    }

    /// Whether this is a two-handle range.
    pub fn is_range(&self) -> bool {
        self.two.is_some()
    }

    /// Whether a gesture currently owns either handle.
    pub fn any_pressed(&self) -> bool {
        self.one.pressed || self.two.map_or(false, |two| two.pressed)
    }

    /// Sum of both marker widths.
    pub fn combined_marker_width(&self) -> f64 {
        self.one.marker.width + self.two.map_or(0.0, |two| two.marker.width)
    }

    /// Current values tuple.
    pub fn values(&self) -> SliderValues {
        let mut values = vec![self.one.value];
        if let Some(two) = &self.two {
            values.push(two.value);
        }
        values
    }

    /// Geometry for the rendering collaborator.
    pub fn render(&self, config: &SliderConfig) -> RenderGeometry {
        let slider_length = config.slider_length;
        let track_before = self.one.position;
        let track_after = self.two.map_or(0.0, |two| slider_length - two.position);
        let track_selected = slider_length - track_before - track_after;
        let half_track = config.track_height / 2.0;

        let marker_one = MarkerContainer {
            top: config.marker_offset_y + half_track - self.one.marker.height / 2.0,
            offset: track_before + config.marker_offset_x,
        };
        let marker_two = self.two.map(|two| MarkerContainer {
            top: config.marker_offset_y + half_track - two.marker.height / 2.0,
            offset: track_after + config.marker_offset_x,
        });

        let mut pressed = vec![self.one.pressed];
        if let Some(two) = &self.two {
            pressed.push(two.pressed);
        }

        RenderGeometry {
            track_before,
            track_selected,
            track_after,
            selected_segment: if self.is_range() { SelectedSegment::Between } else { SelectedSegment::Before },
            marker_one,
            marker_two,
            one_on_top: self.one.position > slider_length / 2.0,
            show_marker_two: self.is_range() && self.one.position != slider_length,
            touch_border_radius: config.touch_dimensions.border_radius,
            pressed,
            values: self.values(),
        }
    }
}
