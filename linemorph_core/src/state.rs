// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node animation state machine.
//!
//! Each node carries an [`AnimationState`] that sweeps a `scale` value
//! between two resting endpoints (0 and 1) in fixed [`SCALE_STEP`]
//! increments. One full sweep is an *excursion*. The state is idle exactly
//! when `direction == 0`; [`begin`](AnimationState::begin) arms an excursion
//! and [`advance`](AnimationState::advance) steps it, reporting progress as
//! an explicit [`StepOutcome`] rather than through callbacks.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Scale change applied per tick while an excursion is in progress.
pub const SCALE_STEP: f64 = 0.1;

/// Result of a single [`AnimationState::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// No excursion in progress; nothing changed.
    Idle,
    /// The excursion moved one step and has further to travel.
    Advancing,
    /// The excursion just reached its far endpoint and the state is idle
    /// again.
    Completed,
}

/// Scale/direction state for one node.
///
/// At rest, `scale == previous_scale` and both are exactly `0.0` or `1.0`.
/// Mid-excursion, `direction` is the sign of travel and `previous_scale`
/// still holds the resting value the excursion departed from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    scale: f64,
    previous_scale: f64,
    direction: i8,
}

impl AnimationState {
    /// Creates a state at rest at scale 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scale: 0.0,
            previous_scale: 0.0,
            direction: 0,
        }
    }

    /// Returns the current scale in `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the resting scale this excursion departed from (or sits at).
    #[inline]
    #[must_use]
    pub const fn previous_scale(&self) -> f64 {
        self.previous_scale
    }

    /// Returns the sign of travel: `0` when idle, otherwise `±1`.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> i8 {
        self.direction
    }

    /// Returns whether no excursion is in progress.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.direction == 0
    }

    /// Arms an excursion if the state is idle.
    ///
    /// The travel direction alternates between endpoints: `+1` departing
    /// from 0, `-1` departing from 1. Returns `false` (and changes nothing)
    /// if an excursion is already in progress — this is how duplicate
    /// triggers are suppressed.
    pub fn begin(&mut self) -> bool {
        if self.direction != 0 {
            return false;
        }
        self.direction = if 1.0 - 2.0 * self.previous_scale > 0.0 {
            1
        } else {
            -1
        };
        true
    }

    /// Steps the excursion by one [`SCALE_STEP`].
    ///
    /// When the accumulated travel exceeds one full unit, the scale is
    /// clamped to the exact far endpoint, the state returns to idle, and
    /// [`StepOutcome::Completed`] is reported exactly once. Calling this
    /// while idle reports [`StepOutcome::Idle`] and changes nothing.
    pub fn advance(&mut self) -> StepOutcome {
        if self.direction == 0 {
            return StepOutcome::Idle;
        }
        self.scale += f64::from(self.direction) * SCALE_STEP;
        if (self.scale - self.previous_scale).abs() > 1.0 {
            self.scale = self.previous_scale + f64::from(self.direction);
            self.direction = 0;
            self.previous_scale = self.scale;
            StepOutcome::Completed
        } else {
            StepOutcome::Advancing
        }
    }
}
