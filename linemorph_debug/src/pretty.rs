// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use linemorph_core::chain::Direction;
use linemorph_core::trace::{
    ExcursionBeginEvent, ExcursionEndEvent, FlipEvent, HandoffEvent, StepEvent, TickEvent,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Reverse => "reverse",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_tick(&mut self, e: &TickEvent) {
        let _ = writeln!(
            self.writer,
            "[tick] index={} node={}",
            e.tick_index,
            e.node.index(),
        );
    }

    fn on_excursion_begin(&mut self, e: &ExcursionBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[excursion:begin] node={} travel={:+}",
            e.node.index(),
            e.travel,
        );
    }

    fn on_excursion_end(&mut self, e: &ExcursionEndEvent) {
        let _ = writeln!(
            self.writer,
            "[excursion:end] node={} resting={}",
            e.node.index(),
            e.resting_scale,
        );
    }

    fn on_handoff(&mut self, e: &HandoffEvent) {
        let _ = writeln!(
            self.writer,
            "[handoff] from={} to={}",
            e.from.index(),
            e.to.index(),
        );
    }

    fn on_flip(&mut self, e: &FlipEvent) {
        let _ = writeln!(
            self.writer,
            "[flip] at={} direction={}",
            e.at.index(),
            direction_name(e.direction),
        );
    }

    fn on_step(&mut self, e: &StepEvent) {
        let _ = writeln!(
            self.writer,
            "[step] index={} node={} scale={:.1}",
            e.tick_index,
            e.node.index(),
            e.scale,
        );
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
    fn pretty_print_single_events() {
        use linemorph_core::chain::Chain;

        let chain = Chain::new(2);
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tick(&TickEvent {
            tick_index: 7,
            node: chain.head(),
        });
        sink.on_excursion_begin(&ExcursionBeginEvent {
            node: chain.head(),
            travel: 1,
        });

        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[tick] index=7 node=0"), "got: {output}");
        assert!(output.contains("travel=+1"), "got: {output}");
    }

    #[test]
    fn one_excursion_prints_begin_and_end_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut runner = Runner::new(2);
        let viewport = Viewport::new(600.0, 400.0);
        let mut surface = NullSurface;
        {
            let mut tracer = Tracer::new(&mut sink);
            assert!(runner.trigger(&mut tracer));
            while runner.tick(&viewport, &mut surface, &mut tracer) == TickOutcome::Running {}
        }

        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[excursion:begin] node=0 travel=+1"), "got: {output}");
        assert!(output.contains("[excursion:end] node=0 resting=1"), "got: {output}");
        assert!(output.contains("[handoff] from=0 to=1"), "got: {output}");
        assert_eq!(output.matches("[tick]").count(), 11);
        assert_eq!(output.matches("[step]").count(), 10, "ten advancing steps");
    }
}
