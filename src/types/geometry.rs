//! Track geometry and derived render geometry.

use serde::{Deserialize, Serialize};

/// Portion of the track usable for value mapping.
///
/// `available_size = slider_length - marker_one_width - marker_two_width`,
/// clamped to zero. `unavailable_length` is its complement and offsets
/// handle two's rendered position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Track length usable for value mapping.
    pub available_size: f64,
    /// Track length taken by marker footprints.
    pub unavailable_length: f64,
}

impl TrackGeometry {
    /// Geometry for the given marker widths.
    ///
    /// Returns the geometry together with the amount by which the markers
    /// overflow the track (zero when they fit).
    pub fn for_markers(slider_length: f64, width_one: f64, width_two: f64) -> (Self, f64) {
        let raw = slider_length - width_one - width_two;
        let available_size = raw.max(0.0);
        let geometry = Self {
            available_size,
            unavailable_length: slider_length - available_size,
        };
        (geometry, (-raw).max(0.0))
    }
}

/// Placement of a marker container relative to the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerContainer {
    /// Offset from the top of the track container.
    pub top: f64,
    /// Offset from the anchoring edge (left for one, right for two).
    pub offset: f64,
}

/// Which track segment renders as selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedSegment {
    /// The segment before handle one (single-handle sliders).
    Before,
    /// The segment between the two handles (range sliders).
    Between,
}

/// Read-only geometry handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderGeometry {
    /// Segment from the track start to handle one.
    pub track_before: f64,
    /// Segment between the handles, or from handle one to the end.
    pub track_selected: f64,
    /// Segment from handle two to the track end; zero for a single handle.
    pub track_after: f64,
    /// Which segment renders as selected.
    pub selected_segment: SelectedSegment,
    /// Container for marker one, anchored left.
    pub marker_one: MarkerContainer,
    /// Container for marker two, anchored right.
    pub marker_two: Option<MarkerContainer>,
    /// Whether marker one should be stacked above marker two.
    pub one_on_top: bool,
    /// Whether marker two is drawn.
    pub show_marker_two: bool,
    /// Touch target corner radius.
    pub touch_border_radius: f64,
    /// Press state per handle.
    pub pressed: Vec<bool>,
    /// Current values.
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_markers_fits() {
        let (geometry, overflow) = TrackGeometry::for_markers(280.0, 20.0, 16.0);
        assert_eq!(geometry.available_size, 244.0);
        assert_eq!(geometry.unavailable_length, 36.0);
        assert_eq!(overflow, 0.0);
    }

    #[test]
    fn test_for_markers_overflow_clamps() {
        let (geometry, overflow) = TrackGeometry::for_markers(30.0, 20.0, 16.0);
        assert_eq!(geometry.available_size, 0.0);
        assert_eq!(geometry.unavailable_length, 30.0);
        assert_eq!(overflow, 6.0);
    }
}
