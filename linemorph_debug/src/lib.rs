// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON Lines export for Linemorph diagnostics.
//!
//! This crate provides [`TraceSink`](linemorph_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`jsonl::JsonLinesSink`] — one JSON object per event, for piping into
//!   `jq` or log tooling.

pub mod jsonl;
pub mod pretty;
