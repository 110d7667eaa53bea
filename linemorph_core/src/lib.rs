// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machine, node chain, and drawing contract for the linemorph
//! glyph animation.
//!
//! `linemorph_core` models a fixed row of glyphs, each an X shape that
//! unfolds into a vertical line and lifts toward the top of the viewport.
//! One glyph animates at a time; when its sweep finishes, control hands off
//! to the neighbor in the current travel direction, reversing at either end
//! of the row. It is `no_std` compatible (with `alloc`) and keeps all nodes
//! in a single arena allocation with index-based adjacency.
//!
//! # Architecture
//!
//! The crate is organized around a tick loop that a platform driver feeds at
//! a fixed cadence:
//!
//! ```text
//!   trigger ──► Runner::trigger() ──► AnimationState::begin()
//!                                          │ (excursion armed)
//!                 ┌────────────────────────┘
//!                 ▼
//!   tick ──► Runner::tick() ──► Chain::draw(Surface) ──► Chain::advance()
//!                 ▲                                            │
//!                 └──────────── Running ◄──────────────────────┤
//!                                                              ▼
//!                               Finished (disarm tick source) ─┘
//! ```
//!
//! **[`state`]** — Per-node scale/direction state machine. One *excursion*
//! sweeps `scale` between 0 and 1 in fixed steps; outcomes are explicit
//! return values, not callbacks.
//!
//! **[`chain`]** — Arena of nodes with `next`/`prev` index links, a current
//! pointer, and a travel direction that reverses at the boundaries.
//!
//! **[`draw`]** — The [`Surface`](draw::Surface) capability that platform
//! backends implement, plus the glyph geometry derived from each node's
//! scale.
//!
//! **[`runner`]** — The whole-system Idle/Excursing cycle: draw, advance,
//! and tell the caller when to disarm its tick source.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! tick-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates the
//!   per-step scale event.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod chain;
pub mod draw;
pub mod runner;
pub mod state;
pub mod trace;
