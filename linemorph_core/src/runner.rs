// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The whole-system tick cycle.
//!
//! A [`Runner`] owns the [`Chain`] and walks the observable state machine:
//! **Idle** (no tick source armed) → [`trigger`](Runner::trigger) arms an
//! excursion → **Excursing** ([`tick`](Runner::tick) drives draw-then-advance
//! at the platform's cadence) → the completing tick reports
//! [`TickOutcome::Finished`] and the caller disarms its tick source.
//!
//! # Tick loop pseudocode
//!
//! A platform driver wires the pieces together like this:
//!
//! ```rust,ignore
//! on_input(|| {
//!     if runner.trigger(&mut tracer) {
//!         ticker.start(|_| {
//!             surface.clear(backdrop);
//!             match runner.tick(&viewport, &mut surface, &mut tracer) {
//!                 TickOutcome::Running => ControlFlow::Continue(()),
//!                 TickOutcome::Finished => ControlFlow::Break(()),
//!             }
//!         });
//!     }
//! });
//! ```
//!
//! Triggering while an excursion is in flight is a no-op (the state machine
//! suppresses it before any tick source is touched), and the tick source's
//! own running guard independently prevents double-arming.

use crate::chain::{Advance, Chain, Handoff};
use crate::draw::{Surface, Viewport};
use crate::trace::{
    ExcursionBeginEvent, ExcursionEndEvent, FlipEvent, HandoffEvent, TickEvent, Tracer,
};

/// Observable phase of the whole system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// No excursion in progress; no ticks expected.
    Idle,
    /// An excursion is in flight and ticks are being consumed.
    Excursing,
}

/// What the caller should do with its tick source after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Keep ticking.
    Running,
    /// The excursion completed (or nothing is animating); disarm the tick
    /// source until the next trigger.
    Finished,
}

/// Drives one excursion at a time across the chain.
#[derive(Debug)]
pub struct Runner {
    chain: Chain,
    ticks: u64,
}

impl Runner {
    /// Creates a runner over a fresh chain of `node_count` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `node_count` is zero.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self::with_chain(Chain::new(node_count))
    }

    /// Creates a runner over an existing chain.
    #[must_use]
    pub fn with_chain(chain: Chain) -> Self {
        Self { chain, ticks: 0 }
    }

    /// Returns the chain.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        if self.chain.state(self.chain.current()).is_idle() {
            RunPhase::Idle
        } else {
            RunPhase::Excursing
        }
    }

    /// Handles a user trigger: arms an excursion on the current node.
    ///
    /// Returns `true` if an excursion began — the caller should arm its
    /// tick source. Returns `false` if one was already in flight; the
    /// existing run simply continues.
    pub fn trigger(&mut self, tracer: &mut Tracer<'_>) -> bool {
        if !self.chain.begin() {
            return false;
        }
        tracer.excursion_begin(&ExcursionBeginEvent {
            node: self.chain.current(),
            travel: self.chain.state(self.chain.current()).direction(),
        });
        true
    }

    /// Runs one tick: draws the whole chain, then steps the excursion.
    ///
    /// The caller clears the surface beforehand and disarms its tick source
    /// when this returns [`TickOutcome::Finished`]. A tick with no
    /// excursion in flight also reports `Finished`, so a stray timer
    /// disarms itself.
    pub fn tick(
        &mut self,
        viewport: &Viewport,
        surface: &mut dyn Surface,
        tracer: &mut Tracer<'_>,
    ) -> TickOutcome {
        let tick_index = self.ticks;
        self.ticks += 1;
        tracer.tick(&TickEvent {
            tick_index,
            node: self.chain.current(),
        });

        self.chain.draw(viewport, surface);

        let stepped = self.chain.current();
        match self.chain.advance() {
            Advance::Idle => TickOutcome::Finished,
            Advance::Advancing => {
                #[cfg(feature = "trace-rich")]
                tracer.step(&crate::trace::StepEvent {
                    tick_index,
                    node: stepped,
                    scale: self.chain.state(stepped).scale(),
                });
                TickOutcome::Running
            }
            Advance::Completed(handoff) => {
                tracer.excursion_end(&ExcursionEndEvent {
                    node: stepped,
                    resting_scale: self.chain.state(stepped).scale(),
                });
                match handoff {
                    Handoff::Moved { from, to } => {
                        tracer.handoff(&HandoffEvent { from, to });
                    }
                    Handoff::Flipped { at, direction } => {
                        tracer.flip(&FlipEvent { at, direction });
                    }
                }
                TickOutcome::Finished
            }
        }
    }
}
