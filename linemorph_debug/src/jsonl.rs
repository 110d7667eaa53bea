// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON Lines trace export.
//!
//! [`JsonLinesSink`] implements [`TraceSink`] and writes one JSON object per
//! event, newline-delimited, to a [`Write`](std::io::Write) destination.
//! The stream is suitable for `jq`, log collectors, or post-mortem diffing
//! of two runs.

use std::io::Write;

use serde_json::{Value, json};

use linemorph_core::trace::{
    ExcursionBeginEvent, ExcursionEndEvent, FlipEvent, HandoffEvent, StepEvent, TickEvent,
    TraceSink,
};

/// Writes newline-delimited JSON trace events to a [`Write`](std::io::Write)
/// destination.
pub struct JsonLinesSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl JsonLinesSink {
    /// Creates a sink that writes to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, value: &Value) {
        let _ = writeln!(self.writer, "{value}");
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_tick(&mut self, e: &TickEvent) {
        self.emit(&json!({
            "event": "tick",
            "tick_index": e.tick_index,
            "node": e.node.index(),
        }));
    }

    fn on_excursion_begin(&mut self, e: &ExcursionBeginEvent) {
        self.emit(&json!({
            "event": "excursion_begin",
            "node": e.node.index(),
            "travel": e.travel,
        }));
    }

    fn on_excursion_end(&mut self, e: &ExcursionEndEvent) {
        self.emit(&json!({
            "event": "excursion_end",
            "node": e.node.index(),
            "resting_scale": e.resting_scale,
        }));
    }

    fn on_handoff(&mut self, e: &HandoffEvent) {
        self.emit(&json!({
            "event": "handoff",
            "from": e.from.index(),
            "to": e.to.index(),
        }));
    }

    fn on_flip(&mut self, e: &FlipEvent) {
        self.emit(&json!({
            "event": "flip",
            "at": e.at.index(),
            "direction": format!("{:?}", e.direction),
        }));
    }

    fn on_step(&mut self, e: &StepEvent) {
        self.emit(&json!({
            "event": "step",
            "tick_index": e.tick_index,
            "node": e.node.index(),
            "scale": e.scale,
        }));
    }
}

#[cfg(test)]
mod tests {
    use linemorph_core::draw::{Color, LineCap, Surface, Viewport};
    use linemorph_core::runner::{Runner, TickOutcome};
    use linemorph_core::trace::Tracer;

    use super::*;

    #[derive(Debug, Default)]
    struct NullSurface;

    impl Surface for NullSurface {
        fn set_stroke_color(&mut self, _color: Color) {}
        fn set_line_width(&mut self, _width: f64) {}
        fn set_line_cap(&mut self, _cap: LineCap) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _offset: kurbo::Vec2) {}
        fn rotate(&mut self, _radians: f64) {}
        fn stroke_line(&mut self, _line: kurbo::Line) {}
    }

    #[test]
    fn every_line_is_valid_json() {
        let mut sink = JsonLinesSink::with_writer(Vec::<u8>::new());
        let mut runner = Runner::new(3);
        let viewport = Viewport::new(600.0, 400.0);
        let mut surface = NullSurface;
        {
            let mut tracer = Tracer::new(&mut sink);
            assert!(runner.trigger(&mut tracer));
            while runner.tick(&viewport, &mut surface, &mut tracer) == TickOutcome::Running {}
        }

        let output = String::from_utf8(sink.writer).unwrap();
        let events: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        // begin + 11 ticks + 10 steps + end + handoff.
        assert_eq!(events.len(), 24);
        assert_eq!(events[0]["event"], "excursion_begin");
        assert_eq!(events[0]["travel"], 1);

        let last = events.last().unwrap();
        assert_eq!(last["event"], "handoff");
        assert_eq!(last["from"], 0);
        assert_eq!(last["to"], 1);
    }

    #[test]
    fn boundary_flip_is_reported() {
        let mut sink = JsonLinesSink::with_writer(Vec::<u8>::new());
        let mut runner = Runner::new(1);
        let viewport = Viewport::new(600.0, 400.0);
        let mut surface = NullSurface;
        {
            let mut tracer = Tracer::new(&mut sink);
            assert!(runner.trigger(&mut tracer));
            while runner.tick(&viewport, &mut surface, &mut tracer) == TickOutcome::Running {}
        }

        let output = String::from_utf8(sink.writer).unwrap();
        let flip: Value = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .find(|event: &Value| event["event"] == "flip")
            .unwrap();
        assert_eq!(flip["at"], 0);
        assert_eq!(flip["direction"], "Reverse");
    }
}
