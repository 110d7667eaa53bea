// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terminal demo: the X-to-line wave rendered as ASCII art.
//!
//! A row of five X glyphs sits at the center of the terminal. Press Enter to
//! trigger an excursion: the current glyph folds into a vertical line and
//! lifts to the top (or unfolds back down), then the wave hands off to its
//! neighbor, ping-ponging across the row on subsequent triggers. Type `q` to
//! quit.
//!
//! Set `LINEMORPH_TRACE=pretty` or `LINEMORPH_TRACE=json` to stream trace
//! events to stderr while the animation runs.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kurbo::{Affine, Line, Point, Vec2};

use linemorph_backend_timer::IntervalLoop;
use linemorph_core::draw::{Color, LineCap, Surface, Viewport};
use linemorph_core::runner::{Runner, TickOutcome};
use linemorph_core::trace::{NoopSink, TraceSink, Tracer};
use linemorph_debug::jsonl::JsonLinesSink;
use linemorph_debug::pretty::PrettyPrintSink;

/// Terminal grid size, in cells.
const COLS: usize = 72;
const ROWS: usize = 18;

/// Terminal cells are roughly twice as tall as they are wide; the surface
/// works in square units and halves the y coordinate when plotting.
const CELL_ASPECT: f64 = 2.0;

const NODE_COUNT: usize = 5;

/// A character-cell [`Surface`] with a kurbo [`Affine`] transform stack.
struct AsciiSurface {
    cells: Vec<char>,
    transform: Affine,
    stack: Vec<Affine>,
}

impl AsciiSurface {
    fn new() -> Self {
        Self {
            cells: vec![' '; COLS * ROWS],
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// The drawing area in surface units (square, not cell, coordinates).
    fn viewport() -> Viewport {
        #[expect(
            clippy::cast_precision_loss,
            reason = "terminal dimensions are tiny integers"
        )]
        Viewport::new(COLS as f64, ROWS as f64 * CELL_ASPECT)
    }

    /// Resets every cell to the blank backdrop.
    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn plot(&mut self, point: Point) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "negative and oversized coordinates are rejected first"
        )]
        let cell = {
            let col = point.x.round();
            let row = (point.y / CELL_ASPECT).round();
            if col < 0.0 || row < 0.0 {
                return;
            }
            let (col, row) = (col as usize, row as usize);
            if col >= COLS || row >= ROWS {
                return;
            }
            row * COLS + col
        };
        self.cells[cell] = '#';
    }

    /// Renders the grid into one newline-separated string.
    fn frame(&self) -> String {
        let mut out = String::with_capacity((COLS + 1) * ROWS);
        for row in self.cells.chunks(COLS) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl Surface for AsciiSurface {
    // Character cells carry no stroke style.
    fn set_stroke_color(&mut self, _color: Color) {}
    fn set_line_width(&mut self, _width: f64) {}
    fn set_line_cap(&mut self, _cap: LineCap) {}

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform *= Affine::rotate(radians);
    }

    fn stroke_line(&mut self, line: Line) {
        let p0 = self.transform * line.p0;
        let p1 = self.transform * line.p1;
        // Oversample along the segment so steep lines stay connected.
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "distances on a terminal-sized surface are small and non-negative"
        )]
        let steps = (p0.distance(p1).ceil() as usize).max(1) * 2;
        #[expect(
            clippy::cast_precision_loss,
            reason = "step counts are tiny integers"
        )]
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot(p0.lerp(p1, t));
        }
    }
}

/// Locks a mutex, ignoring poisoning.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Picks a trace sink from the `LINEMORPH_TRACE` environment variable.
fn trace_sink() -> Box<dyn TraceSink + Send> {
    match std::env::var("LINEMORPH_TRACE").as_deref() {
        Ok("pretty") => Box::new(PrettyPrintSink::with_writer(io::stderr())),
        Ok("json") => Box::new(JsonLinesSink::with_writer(io::stderr())),
        _ => Box::new(NoopSink),
    }
}

fn main() -> io::Result<()> {
    let runner = Arc::new(Mutex::new(Runner::new(NODE_COUNT)));
    let sink: Arc<Mutex<Box<dyn TraceSink + Send>>> = Arc::new(Mutex::new(trace_sink()));
    let triggers = Arc::new(AtomicU64::new(0));

    let ticker = {
        let runner = Arc::clone(&runner);
        let sink = Arc::clone(&sink);
        let triggers = Arc::clone(&triggers);
        let mut surface = AsciiSurface::new();
        IntervalLoop::new(move |_| {
            surface.clear();
            let outcome = {
                let mut runner = lock(&runner);
                let mut sink = lock(&sink);
                let mut tracer = Tracer::new(&mut **sink);
                runner.tick(&AsciiSurface::viewport(), &mut surface, &mut tracer)
            };

            let mut stdout = io::stdout().lock();
            let _ = write!(
                stdout,
                "\x1b[2J\x1b[H{}\ntriggers: {}  [Enter] trigger  [q] quit\n",
                surface.frame(),
                triggers.load(Ordering::Relaxed),
            );
            let _ = stdout.flush();

            match outcome {
                TickOutcome::Running => ControlFlow::Continue(()),
                TickOutcome::Finished => ControlFlow::Break(()),
            }
        })
    };

    println!("terminal_wave — press Enter to trigger the next excursion, q to quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line?.trim() {
            "q" | "quit" => break,
            "" => {
                triggers.fetch_add(1, Ordering::Relaxed);
                {
                    let mut runner = lock(&runner);
                    let mut sink = lock(&sink);
                    let mut tracer = Tracer::new(&mut **sink);
                    // Duplicate triggers mid-excursion are suppressed here.
                    let _ = runner.trigger(&mut tracer);
                }
                // Always re-arm: `start` is idempotent while the worker is
                // live, and a trigger can land while the previous worker is
                // still storing its disarmed flag. A stray tick on an idle
                // runner reports `Finished` and disarms itself.
                ticker.start();
            }
            other => println!("unrecognized input {other:?} — Enter triggers, q quits"),
        }
    }

    ticker.stop();
    Ok(())
}
