//! Collision policy: how close a handle may approach its sibling.
//!
//! ## Safe positions
//!
//! ```text
//! one moving right: safe = two.position - (w1 + w2)
//! two moving left:  safe = one.position + (w1 + w2) + gap
//! gap = allow_overlap ? 0 : step_length
//! ```
//!
//! Only handle two's safe position carries the extra `gap`. The asymmetry is
//! intentional and kept as-is; see DESIGN.md.
//!
//! At release, handle two is checked against the marker margin only
//! ([`CollisionPolicy::release_boundary`]).
//!
//! Whatever the sibling rules produce, a handle never leaves its own
//! stretch of track ([`CollisionPolicy::track_range`]).

use crate::types::{HandleId, SliderState};

/// Allowed pixel range for a handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lowest allowed position.
    pub lower: f64,
    /// Highest allowed position.
    pub upper: f64,
}

impl Bounds {
    /// Clamp `position` into the range.
    ///
    /// `lower` is checked first. On an inverted range, positions below
    /// `lower` take `lower` and every other position takes `upper`.
    pub fn confine(&self, position: f64) -> f64 {
        if position < self.lower {
            self.lower
        } else if position > self.upper {
            self.upper
        } else {
            position
        }
    }
}

/// Collision rules for a configured slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPolicy {
    /// Whether handles may share a value.
    pub allow_overlap: bool,
    /// Pixel width of one option slot.
    pub step_length: f64,
    /// Total track length.
    pub slider_length: f64,
}

impl CollisionPolicy {
    /// Create a policy.
    pub fn new(allow_overlap: bool, step_length: f64, slider_length: f64) -> Self {
        Self {
            allow_overlap,
            step_length,
            slider_length,
        }
    }

    /// Extra separation required between handles.
    pub fn gap(&self) -> f64 {
        if self.allow_overlap {
            0.0
        } else {
            self.step_length
        }
    }

    /// Position at which `handle` collides with its sibling while moving
    /// toward it. `None` on a single slider.
    pub fn safe_position(&self, handle: HandleId, state: &SliderState) -> Option<f64> {
        let two = state.two?;
        let margin = state.combined_marker_width();
        Some(match handle {
            HandleId::One => two.position - margin,
            HandleId::Two => state.one.position + margin + self.gap(),
        })
    }

    /// Allowed range for a regular (non-colliding) move of `handle`.
    pub fn bounds(&self, handle: HandleId, state: &SliderState) -> Bounds {
        let unavailable = state.track.unavailable_length;
        match (handle, state.two) {
            (HandleId::One, Some(two)) => Bounds {
                lower: 0.0,
                upper: two.position - unavailable - self.gap(),
            },
            (HandleId::One, None) => Bounds {
                lower: 0.0,
                upper: state.track.available_size,
            },
            (HandleId::Two, _) => Bounds {
                lower: state.one.position + unavailable + self.gap(),
                upper: self.slider_length,
            },
        }
    }

    /// Stretch of track `handle` may occupy regardless of its sibling:
    /// `[0, available_size]` for one, `[unavailable_length, slider_length]`
    /// for two.
    pub fn track_range(&self, handle: HandleId, state: &SliderState) -> Bounds {
        let track = state.track;
        match handle {
            HandleId::One => Bounds {
                lower: 0.0,
                upper: track.available_size,
            },
            HandleId::Two => Bounds {
                lower: track.unavailable_length,
                upper: self.slider_length.max(track.unavailable_length),
            },
        }
    }

    /// Boundary to clamp to when `handle` is already at or past its safe
    /// position and the gesture pushes further toward the sibling.
    ///
    /// `signed_dx` is the direction-adjusted horizontal delta.
    pub fn collision(&self, handle: HandleId, state: &SliderState, signed_dx: f64) -> Option<f64> {
        let safe = self.safe_position(handle, state)?;
        let current = state.handle(handle)?.position;
        let colliding = match handle {
            HandleId::One => current >= safe && signed_dx > 0.0,
            HandleId::Two => current <= safe && signed_dx < 0.0,
        };
        colliding.then_some(safe)
    }

    /// Boundary checked when a drag ends, correcting any transient crossing.
    ///
    /// Uses the marker margin only; the step gap is not applied at release.
    pub fn release_boundary(&self, handle: HandleId, state: &SliderState, signed_dx: f64) -> Option<f64> {
        let two = state.two?;
        let margin = state.combined_marker_width();
        match handle {
            HandleId::One => {
                let safe = two.position - margin;
                (state.one.position >= safe && signed_dx > 0.0).then_some(safe)
            }
            HandleId::Two => {
                let safe = state.one.position + margin;
                (two.position <= safe && signed_dx < 0.0).then_some(safe)
            }
        }
    }
}
