// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the tick loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the [`Runner`](crate::runner::Runner) calls as the animation progresses.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates the per-step [`StepEvent`] and
//!   the corresponding `TraceSink` method.

use crate::chain::{Direction, NodeId};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of every runner tick.
#[derive(Clone, Copy, Debug)]
pub struct TickEvent {
    /// Monotonic tick counter across all excursions.
    pub tick_index: u64,
    /// The node currently animating.
    pub node: NodeId,
}

/// Emitted when a trigger arms a new excursion.
#[derive(Clone, Copy, Debug)]
pub struct ExcursionBeginEvent {
    /// The node that will animate.
    pub node: NodeId,
    /// Sign of scale travel: `+1` opening upward from 0, `-1` returning
    /// from 1.
    pub travel: i8,
}

/// Emitted when an excursion reaches its far endpoint.
#[derive(Clone, Copy, Debug)]
pub struct ExcursionEndEvent {
    /// The node whose excursion completed.
    pub node: NodeId,
    /// The resting scale the node settled at (exactly 0 or 1).
    pub resting_scale: f64,
}

/// Emitted when the current pointer moves to a neighbor.
#[derive(Clone, Copy, Debug)]
pub struct HandoffEvent {
    /// The node whose excursion just completed.
    pub from: NodeId,
    /// The new current node.
    pub to: NodeId,
}

/// Emitted when traversal reverses at a chain boundary.
#[derive(Clone, Copy, Debug)]
pub struct FlipEvent {
    /// The boundary node (still current).
    pub at: NodeId,
    /// The new travel direction.
    pub direction: Direction,
}

/// Per-tick scale sample (requires the `trace-rich` feature).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct StepEvent {
    /// Tick counter, matching [`TickEvent::tick_index`].
    pub tick_index: u64,
    /// The node being stepped.
    pub node: NodeId,
    /// The node's scale after this step.
    pub scale: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the tick loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of every tick.
    fn on_tick(&mut self, e: &TickEvent) {
        _ = e;
    }

    /// Called when a trigger arms an excursion.
    fn on_excursion_begin(&mut self, e: &ExcursionBeginEvent) {
        _ = e;
    }

    /// Called when an excursion completes.
    fn on_excursion_end(&mut self, e: &ExcursionEndEvent) {
        _ = e;
    }

    /// Called when the current pointer moves to a neighbor.
    fn on_handoff(&mut self, e: &HandoffEvent) {
        _ = e;
    }

    /// Called when traversal reverses at a boundary.
    fn on_flip(&mut self, e: &FlipEvent) {
        _ = e;
    }

    /// Called with a per-tick scale sample (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_step(&mut self, e: &StepEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TickEvent`].
    #[inline]
    pub fn tick(&mut self, e: &TickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ExcursionBeginEvent`].
    #[inline]
    pub fn excursion_begin(&mut self, e: &ExcursionBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_excursion_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ExcursionEndEvent`].
    #[inline]
    pub fn excursion_end(&mut self, e: &ExcursionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_excursion_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HandoffEvent`].
    #[inline]
    pub fn handoff(&mut self, e: &HandoffEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_handoff(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlipEvent`].
    #[inline]
    pub fn flip(&mut self, e: &FlipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StepEvent`] (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn step(&mut self, e: &StepEvent) {
        if let Some(s) = &mut self.sink {
            s.on_step(e);
        }
    }
}
