// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing contract and glyph geometry.
//!
//! The core draws through the [`Surface`] trait — an abstract 2-D vector
//! sink with a save/restore transform stack, modeled after a canvas-style
//! stroking API. Platform backends (and test doubles) implement it; the
//! core never touches pixels.
//!
//! Each node renders as two mirrored line segments. The node's scale in
//! `[0, 1]` splits into two sub-progress values (see [`GlyphPose`]): the
//! first half of the range rotates the X closed into a single vertical
//! line, the second half lifts that line from the vertical center toward
//! the top of the viewport.

use core::f64::consts::FRAC_PI_4;

use kurbo::{Line, Vec2};

use crate::chain::Chain;

/// An opaque sRGB stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// The stroke color used for every glyph.
    pub const WHITE: Self = Self {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };
}

/// Stroke endpoint style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Squared-off ends at the endpoint.
    #[default]
    Butt,
    /// Semicircular ends.
    Round,
    /// Squared-off ends extending half a line width past the endpoint.
    Square,
}

/// An abstract 2-D vector drawing sink with a transform stack.
///
/// Calls arrive in canvas order: style setters, then `save`, transforms,
/// strokes, and a matching `restore`. `translate` and `rotate` compose onto
/// the current transform; `save`/`restore` push and pop it. Implementations
/// only need to honor that discipline — the core always emits balanced
/// save/restore pairs.
pub trait Surface {
    /// Sets the stroke color for subsequent strokes.
    fn set_stroke_color(&mut self, color: Color);

    /// Sets the stroke width for subsequent strokes, in surface units.
    fn set_line_width(&mut self, width: f64);

    /// Sets the stroke endpoint style for subsequent strokes.
    fn set_line_cap(&mut self, cap: LineCap);

    /// Pushes the current transform onto the stack.
    fn save(&mut self);

    /// Pops the most recently saved transform.
    fn restore(&mut self);

    /// Composes a translation onto the current transform.
    fn translate(&mut self, offset: Vec2);

    /// Composes a rotation (radians, about the current origin) onto the
    /// current transform.
    fn rotate(&mut self, radians: f64);

    /// Strokes a line segment under the current transform and style.
    fn stroke_line(&mut self, line: Line);
}

/// The drawing area, in surface units.
///
/// Derived metrics place one glyph per node along the horizontal axis with
/// a leading and trailing margin of one gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in surface units.
    pub width: f64,
    /// Height in surface units.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal spacing between glyph centers for a chain of `node_count`
    /// nodes.
    #[must_use]
    pub fn gap(&self, node_count: usize) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "node counts are far below f64 precision limits"
        )]
        let slots = (node_count + 1) as f64;
        self.width / slots
    }

    /// Glyph extent: half the inter-glyph gap.
    #[must_use]
    pub fn glyph_size(&self, node_count: usize) -> f64 {
        self.gap(node_count) / 2.0
    }

    /// Stroke width for every glyph: 1/50th of the smaller viewport side.
    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.width.min(self.height) / 50.0
    }
}

/// The two sub-progress values derived from a node's scale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphPose {
    /// How far the X has closed into a vertical line, in `[0, 1]`. Consumes
    /// the first half of the scale range.
    pub closing: f64,
    /// How far the glyph has lifted toward the top edge, in `[0, 1]`.
    /// Consumes the second half of the scale range.
    pub lift: f64,
}

impl GlyphPose {
    /// Splits a scale in `[0, 1]` into its closing and lift phases.
    #[must_use]
    pub fn from_scale(scale: f64) -> Self {
        Self {
            closing: scale.min(0.5) * 2.0,
            lift: (scale - 0.5).max(0.0).min(0.5) * 2.0,
        }
    }
}

impl Chain {
    /// Draws every node, head to tail, onto the given surface.
    ///
    /// Drawing is read-only: it never changes animation state or linkage,
    /// and repeated calls emit an identical operation stream. The caller is
    /// responsible for clearing the surface first.
    pub fn draw(&self, viewport: &Viewport, surface: &mut dyn Surface) {
        let gap = viewport.gap(self.node_count());
        let size = viewport.glyph_size(self.node_count());

        for id in self.nodes() {
            let pose = GlyphPose::from_scale(self.state(id).scale());

            surface.set_line_width(viewport.line_width());
            surface.set_line_cap(LineCap::Round);
            surface.set_stroke_color(Color::WHITE);

            surface.save();
            surface.translate(Vec2::new(
                f64::from(id.index()) * gap + gap,
                viewport.height / 2.0 - (viewport.height / 2.0 - size) * pose.lift,
            ));
            for mirror in [1.0, -1.0] {
                surface.save();
                surface.rotate(FRAC_PI_4 * mirror * (1.0 - pose.closing));
                surface.stroke_line(Line::new((0.0, -size / 2.0), (0.0, size / 2.0)));
                surface.restore();
            }
            surface.restore();
        }
    }
}
