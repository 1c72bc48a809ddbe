//! Per-handle gesture controller.
//!
//! Each handle is a two-state machine:
//!
//! ```text
//!          start (enabled)            end (release or termination)
//!   Idle ───────────────────▶ Pressed ───────────────────────────▶ Idle
//!                              │  ▲
//!                              └──┘ move
//! ```
//!
//! The controller is a pure reducer: `reduce(ctx, state, handle, event)`
//! returns the next [`SliderState`] together with the [`Effect`]s to run once
//! that state is committed. It never calls user code itself.
//!
//! ## Move
//!
//! 1. Ignored when the handle is disabled, idle, the gesture slipped off
//!    the track vertically, or the markers leave no track to move on.
//! 2. `unconfined = past_position + signed_dx`. Deltas are always applied to
//!    the press origin, never accumulated.
//! 3. Already at the collision boundary and pushing toward the sibling →
//!    clamp to the boundary. Otherwise confine to [`CollisionPolicy::bounds`].
//!    Either way the result is kept inside [`CollisionPolicy::track_range`].
//! 4. Value = nearest option at that position, never past the sibling's
//!    value; snapped sliders render at the value's slot.
//! 5. `ValuesChange` is emitted only when the discretized value changes.
//!
//! ## End
//!
//! A tap (no horizontal movement) with a toggle handler emits `Toggle` and
//! nothing else. Otherwise the release boundary is re-applied (skipped on a
//! collapsed track), the position becomes the next press origin, and
//! `ValuesChangeFinish` is always emitted.

use serde::{Deserialize, Serialize};

use crate::discretizer::OptionArray;
use crate::policy::CollisionPolicy;
use crate::types::{Effect, GestureEvent, GestureState, HandleId, SliderConfig, SliderState};

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The handle does not exist on this slider.
    NoSuchHandle,
    /// The handle is disabled.
    Disabled,
    /// A move or end arrived without a preceding start.
    NotPressed,
    /// A start arrived while the handle was already pressed.
    AlreadyPressed,
    /// The vertical delta exceeded the slip displacement.
    Slipped,
    /// The markers cover the whole track.
    CollapsedTrack,
}

/// What the reducer did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The event was applied.
    Applied,
    /// The event was dropped.
    Ignored(IgnoreReason),
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State to commit.
    pub state: SliderState,
    /// Callbacks to run after commit, in order.
    pub effects: Vec<Effect>,
    /// What happened.
    pub disposition: Disposition,
}

impl Transition {
    fn ignored(state: &SliderState, reason: IgnoreReason) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            disposition: Disposition::Ignored(reason),
        }
    }

    fn applied(state: SliderState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            disposition: Disposition::Applied,
        }
    }
}

/// Read-only inputs of the reducer.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    /// Active configuration.
    pub config: &'a SliderConfig,
    /// Active option array.
    pub options: &'a OptionArray,
    /// Collision rules derived from the configuration.
    pub policy: CollisionPolicy,
    /// Whether a toggle handler is registered for the handle being reduced.
    pub toggle_armed: bool,
}

impl<'a> GestureContext<'a> {
    /// Build a context for `config` and `options`.
    pub fn new(config: &'a SliderConfig, options: &'a OptionArray) -> Self {
        let policy = CollisionPolicy::new(
            config.allow_overlap,
            options.step_length(config.slider_length),
            config.slider_length,
        );
        Self {
            config,
            options,
            policy,
            toggle_armed: false,
        }
    }

    /// Arm or disarm tap-to-toggle.
    pub fn with_toggle(mut self, toggle_armed: bool) -> Self {
        self.toggle_armed = toggle_armed;
        self
    }

    fn enabled(&self, handle: HandleId) -> bool {
        match handle {
            HandleId::One => self.config.enabled_one,
            HandleId::Two => self.config.enabled_two,
        }
    }

    /// Option under `position` for `handle`. Handle two's positions carry the
    /// unavailable-length offset.
    fn value_at(&self, handle: HandleId, position: f64, state: &SliderState) -> f64 {
        let track = state.track;
        let local = match handle {
            HandleId::One => position,
            HandleId::Two => position - track.unavailable_length,
        };
        self.options.position_to_value(local, track.available_size)
    }

    /// Keep `value` on its own side of the sibling's value.
    fn ordered(&self, handle: HandleId, value: f64, state: &SliderState) -> f64 {
        match (handle, state.two) {
            (HandleId::One, Some(two)) => value.min(two.value),
            (HandleId::Two, _) => value.max(state.one.value),
            (HandleId::One, None) => value,
        }
    }

    /// Confine `position` to `handle`'s stretch of track.
    fn on_track(&self, handle: HandleId, position: f64, state: &SliderState) -> f64 {
        self.policy.track_range(handle, state).confine(position)
    }

    /// Rendered position of `value`'s slot for `handle`.
    fn slot_of(&self, handle: HandleId, value: f64, state: &SliderState) -> f64 {
        let track = state.track;
        let local = self.options.value_to_position(value, track.available_size);
        match handle {
            HandleId::One => local,
            HandleId::Two => track.unavailable_length + local,
        }
    }
}

/// Reduce one gesture event for `handle`.
pub fn reduce(ctx: &GestureContext<'_>, state: &SliderState, handle: HandleId, event: &GestureEvent) -> Transition {
    match event {
        GestureEvent::Start => start(ctx, state, handle),
        GestureEvent::Move(gesture) => drag(ctx, state, handle, gesture),
        GestureEvent::End(gesture) => release(ctx, state, handle, gesture),
    }
}

/// A press on `handle` began.
pub fn start(ctx: &GestureContext<'_>, state: &SliderState, handle: HandleId) -> Transition {
    let Some(current) = state.handle(handle) else {
        return Transition::ignored(state, IgnoreReason::NoSuchHandle);
    };
    if !ctx.enabled(handle) {
        return Transition::ignored(state, IgnoreReason::Disabled);
    }
    if current.pressed {
        return Transition::ignored(state, IgnoreReason::AlreadyPressed);
    }

    let mut next = state.clone();
    if let Some(h) = next.handle_mut(handle) {
        h.pressed = true;
        h.past_position = h.position;
    }
    Transition::applied(next, vec![Effect::ValuesChangeStart])
}

/// The pointer moved while `handle` is pressed.
pub fn drag(ctx: &GestureContext<'_>, state: &SliderState, handle: HandleId, gesture: &GestureState) -> Transition {
    let Some(current) = state.handle(handle) else {
        return Transition::ignored(state, IgnoreReason::NoSuchHandle);
    };
    if !ctx.enabled(handle) {
        return Transition::ignored(state, IgnoreReason::Disabled);
    }
    if !current.pressed {
        return Transition::ignored(state, IgnoreReason::NotPressed);
    }
    if ctx.config.touch_dimensions.slipped(gesture.dy) {
        return Transition::ignored(state, IgnoreReason::Slipped);
    }
    if collapsed(state) {
        return Transition::ignored(state, IgnoreReason::CollapsedTrack);
    }

    let signed_dx = ctx.config.direction.signed(gesture.dx);
    let position = match ctx.policy.collision(handle, state, signed_dx) {
        Some(boundary) => boundary,
        None => ctx
            .policy
            .bounds(handle, state)
            .confine(current.past_position + signed_dx),
    };
    let position = ctx.on_track(handle, position, state);
    let value = ctx.ordered(handle, ctx.value_at(handle, position, state), state);
    let rendered = if ctx.config.snapped {
        ctx.slot_of(handle, value, state)
    } else {
        position
    };

    let mut next = state.clone();
    let mut changed = false;
    if let Some(h) = next.handle_mut(handle) {
        h.position = rendered;
        if h.value != value {
            h.value = value;
            changed = true;
        }
    }

    let effects = if changed {
        vec![Effect::ValuesChange(next.values())]
    } else {
        Vec::new()
    };
    Transition::applied(next, effects)
}

/// The press on `handle` ended.
pub fn release(ctx: &GestureContext<'_>, state: &SliderState, handle: HandleId, gesture: &GestureState) -> Transition {
    let Some(current) = state.handle(handle) else {
        return Transition::ignored(state, IgnoreReason::NoSuchHandle);
    };
    if !current.pressed {
        return Transition::ignored(state, IgnoreReason::NotPressed);
    }

    let mut next = state.clone();

    if gesture.is_tap() && ctx.toggle_armed {
        if let Some(h) = next.handle_mut(handle) {
            h.pressed = false;
            h.past_position = h.position;
        }
        return Transition::applied(next, vec![Effect::Toggle(handle)]);
    }

    let mut effects = Vec::new();
    let signed_dx = ctx.config.direction.signed(gesture.dx);
    let boundary = if collapsed(state) {
        None
    } else {
        ctx.policy.release_boundary(handle, state, signed_dx)
    };
    if let Some(boundary) = boundary {
        let boundary = ctx.on_track(handle, boundary, state);
        let (value, position) = match handle {
            HandleId::Two if ctx.config.snapped => {
                // Overlapping snapped handle two moves up one slot.
                let value = ctx
                    .options
                    .get(ctx.options.next_index(current.value))
                    .unwrap_or(current.value);
                (value, ctx.slot_of(handle, value, state))
            }
            _ => {
                let value = ctx.ordered(handle, ctx.value_at(handle, boundary, state), state);
                let position = if ctx.config.snapped {
                    ctx.slot_of(handle, value, state)
                } else {
                    boundary
                };
                (value, position)
            }
        };

        let mut changed = false;
        if let Some(h) = next.handle_mut(handle) {
            h.position = position;
            if h.value != value {
                h.value = value;
                changed = true;
            }
        }
        if changed {
            effects.push(Effect::ValuesChange(next.values()));
        }
    }

    if let Some(h) = next.handle_mut(handle) {
        h.past_position = h.position;
        h.pressed = false;
    }
    effects.push(Effect::ValuesChangeFinish(next.values()));
    Transition::applied(next, effects)
}

/// Markers leave no room for value mapping.
fn collapsed(state: &SliderState) -> bool {
    state.track.available_size <= 0.0
}

/// Whether the host may take the gesture away from a handle mid-drag.
///
/// Always `false`: a press only ends through an end event.
pub fn grant_termination(_handle: HandleId) -> bool {
    false
}
