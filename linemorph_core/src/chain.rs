// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed chain of animatable nodes.
//!
//! A [`Chain`] owns every node in a single arena allocation: per-node
//! [`AnimationState`]s plus `next`/`prev` index links (with [`INVALID`] as
//! the "no neighbor" sentinel) laid out as parallel arrays. The chain is
//! built once by [`Chain::new`] and never changes shape afterward; node
//! lifetime is the chain's lifetime.
//!
//! Exactly one node — the *current* node — animates at a time. When its
//! excursion completes, the current pointer moves to the neighbor in the
//! travel [`Direction`]; at either end of the chain the direction reverses
//! instead, and the boundary node keeps the current pointer until the next
//! completion. The flip happens only at the moment a neighbor lookup fails,
//! so each boundary touch flips exactly once.

use alloc::vec::Vec;

use crate::state::{AnimationState, StepOutcome};

use core::fmt;

/// Sentinel value indicating "no neighbor" in link fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`Chain`].
///
/// Node slots are fixed at construction, so a `NodeId` is a plain index;
/// chain methods panic on out-of-range handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Travel direction of the current pointer along the chain.
///
/// There is no idle variant: traversal always has a heading, and it only
/// ever reverses at a boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher node indices.
    #[default]
    Forward,
    /// Toward lower node indices.
    Reverse,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Returns the direction as a sign: `+1` forward, `-1` reverse.
    #[inline]
    #[must_use]
    pub const fn signum(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// How the current pointer changed when an excursion completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handoff {
    /// The current pointer moved to a neighbor.
    Moved {
        /// The node whose excursion just completed.
        from: NodeId,
        /// The new current node.
        to: NodeId,
    },
    /// A boundary was reached: the direction reversed and the current
    /// pointer stayed put.
    Flipped {
        /// The boundary node (still current).
        at: NodeId,
        /// The new travel direction.
        direction: Direction,
    },
}

/// Result of a single [`Chain::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Advance {
    /// The current node is idle; nothing changed.
    Idle,
    /// The current node's excursion moved one step.
    Advancing,
    /// The current node's excursion completed and the current pointer was
    /// handed off.
    Completed(Handoff),
}

/// The fixed ordered sequence of animatable nodes.
#[derive(Debug)]
pub struct Chain {
    pub(crate) states: Vec<AnimationState>,
    pub(crate) next: Vec<u32>,
    pub(crate) prev: Vec<u32>,
    current: u32,
    direction: Direction,
}

impl Chain {
    /// Creates a chain of `node_count` nodes, all at rest, with the current
    /// pointer at the head and a forward travel direction.
    ///
    /// # Panics
    ///
    /// Panics if `node_count` is zero.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        assert!(node_count >= 1, "chain needs at least one node");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "node counts are tiny; u32 links match the arena layout"
        )]
        let count = node_count as u32;

        let states = alloc::vec![AnimationState::new(); node_count];
        let mut next = Vec::with_capacity(node_count);
        let mut prev = Vec::with_capacity(node_count);
        for i in 0..count {
            next.push(if i + 1 < count { i + 1 } else { INVALID });
            prev.push(if i > 0 { i - 1 } else { INVALID });
        }

        Self {
            states,
            next,
            prev,
            current: 0,
            direction: Direction::Forward,
        }
    }

    /// Returns the number of nodes in the chain.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.states.len()
    }

    /// Returns the first node.
    #[must_use]
    pub fn head(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the last node.
    #[must_use]
    pub fn tail(&self) -> NodeId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length fits in u32 by construction"
        )]
        NodeId(self.states.len() as u32 - 1)
    }

    /// Returns the node that is presently animating (or next to animate).
    #[must_use]
    pub const fn current(&self) -> NodeId {
        NodeId(self.current)
    }

    /// Returns the current travel direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the animation state of a node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range.
    #[must_use]
    pub fn state(&self, id: NodeId) -> &AnimationState {
        self.validate(id);
        &self.states[id.0 as usize]
    }

    /// Returns the neighbor toward the tail, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range.
    #[must_use]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let n = self.next[id.0 as usize];
        (n != INVALID).then_some(NodeId(n))
    }

    /// Returns the neighbor toward the head, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range.
    #[must_use]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.prev[id.0 as usize];
        (p != INVALID).then_some(NodeId(p))
    }

    /// Returns the neighbor of `id` in the given direction, or `None` at a
    /// chain boundary.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range.
    #[must_use]
    pub fn neighbor_in(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Forward => self.next(id),
            Direction::Reverse => self.prev(id),
        }
    }

    /// Returns an iterator over all nodes, head to tail, following the
    /// `next` links.
    #[must_use]
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            chain: self,
            current: 0,
        }
    }

    /// Arms an excursion on the current node.
    ///
    /// Returns `false` (a no-op) if the current node is already
    /// mid-excursion, so duplicate triggers are suppressed here before any
    /// tick source is armed.
    pub fn begin(&mut self) -> bool {
        self.states[self.current as usize].begin()
    }

    /// Steps the current node's excursion and, on completion, hands the
    /// current pointer off to the neighbor in the travel direction.
    ///
    /// At a boundary the direction flips instead and the current pointer
    /// stays on the boundary node; the following completion then finds a
    /// neighbor in the flipped direction, so no double flip can occur.
    pub fn advance(&mut self) -> Advance {
        match self.states[self.current as usize].advance() {
            StepOutcome::Idle => Advance::Idle,
            StepOutcome::Advancing => Advance::Advancing,
            StepOutcome::Completed => {
                let from = NodeId(self.current);
                let handoff = match self.neighbor_in(from, self.direction) {
                    Some(to) => {
                        self.current = to.0;
                        Handoff::Moved { from, to }
                    }
                    None => {
                        self.direction = self.direction.flipped();
                        Handoff::Flipped {
                            at: from,
                            direction: self.direction,
                        }
                    }
                };
                Advance::Completed(handoff)
            }
        }
    }

    /// Panics if the handle is out of range.
    fn validate(&self, id: NodeId) {
        assert!(
            (id.0 as usize) < self.states.len(),
            "NodeId out of range: {id:?} (node count: {})",
            self.states.len()
        );
    }
}

/// An iterator over the nodes of a chain, head to tail.
///
/// Created by [`Chain::nodes`].
#[derive(Debug)]
pub struct Nodes<'a> {
    chain: &'a Chain,
    current: u32,
}

impl Iterator for Nodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.chain.next[idx as usize];
        Some(NodeId(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs one full excursion on the current node and returns the handoff.
    fn run_excursion(chain: &mut Chain) -> Handoff {
        assert!(chain.begin(), "current node should be at rest");
        loop {
            match chain.advance() {
                Advance::Advancing => {}
                Advance::Completed(handoff) => return handoff,
                Advance::Idle => panic!("excursion went idle without completing"),
            }
        }
    }

    #[test]
    fn links_form_an_unbroken_path() {
        for count in 1..=6 {
            let chain = Chain::new(count);
            assert_eq!(chain.node_count(), count);

            let forward: Vec<u32> = chain.nodes().map(NodeId::index).collect();
            let expected: Vec<u32> = (0..count as u32).collect();
            assert_eq!(forward, expected, "next links, count {count}");

            // prev links mirror the path exactly in reverse.
            let mut backward = Vec::new();
            let mut node = Some(chain.tail());
            while let Some(id) = node {
                backward.push(id.index());
                node = chain.prev(id);
            }
            let expected: Vec<u32> = (0..count as u32).rev().collect();
            assert_eq!(backward, expected, "prev links, count {count}");
        }
    }

    #[test]
    fn boundary_nodes_have_no_outward_neighbor() {
        let chain = Chain::new(3);
        assert_eq!(chain.prev(chain.head()), None);
        assert_eq!(chain.next(chain.tail()), None);
        assert_eq!(chain.neighbor_in(chain.head(), Direction::Reverse), None);
        assert_eq!(chain.neighbor_in(chain.tail(), Direction::Forward), None);
        assert_eq!(
            chain.neighbor_in(chain.head(), Direction::Forward),
            Some(NodeId(1))
        );
    }

    #[test]
    #[should_panic(expected = "chain needs at least one node")]
    fn empty_chain_panics() {
        let _ = Chain::new(0);
    }

    #[test]
    #[should_panic(expected = "NodeId out of range")]
    fn out_of_range_handle_panics() {
        let chain = Chain::new(2);
        let _ = chain.state(NodeId(7));
    }

    #[test]
    fn advance_while_idle_changes_nothing() {
        let mut chain = Chain::new(3);
        assert_eq!(chain.advance(), Advance::Idle);
        assert_eq!(chain.current(), chain.head());
        assert_eq!(chain.direction(), Direction::Forward);
    }

    #[test]
    fn completion_hands_off_to_the_forward_neighbor() {
        let mut chain = Chain::new(5);
        let handoff = run_excursion(&mut chain);
        assert_eq!(
            handoff,
            Handoff::Moved {
                from: NodeId(0),
                to: NodeId(1)
            }
        );
        assert_eq!(chain.current(), NodeId(1));
        assert_eq!(chain.direction(), Direction::Forward);
        assert_eq!(chain.state(NodeId(0)).scale(), 1.0);
    }

    #[test]
    fn boundary_flips_exactly_once() {
        let mut chain = Chain::new(5);
        // Walk the current pointer to the tail.
        for _ in 0..4 {
            let _ = run_excursion(&mut chain);
        }
        assert_eq!(chain.current(), chain.tail());

        // The tail's first completion flips; the pointer stays put.
        let handoff = run_excursion(&mut chain);
        assert_eq!(
            handoff,
            Handoff::Flipped {
                at: NodeId(4),
                direction: Direction::Reverse
            }
        );
        assert_eq!(chain.current(), NodeId(4));

        // The very next completion moves — no second flip.
        let handoff = run_excursion(&mut chain);
        assert_eq!(
            handoff,
            Handoff::Moved {
                from: NodeId(4),
                to: NodeId(3)
            }
        );
        assert_eq!(chain.direction(), Direction::Reverse);
    }

    #[test]
    fn ping_pong_round_trip_repeats_without_drift() {
        let count = 5;
        let mut chain = Chain::new(count);

        for cycle in 0..3 {
            // count-1 completions reach the tail.
            for _ in 0..count - 1 {
                let _ = run_excursion(&mut chain);
            }
            assert_eq!(chain.current(), chain.tail(), "cycle {cycle}");

            // One more completion flips to reverse.
            let _ = run_excursion(&mut chain);
            assert_eq!(chain.direction(), Direction::Reverse, "cycle {cycle}");

            // count-1 completions return to the head.
            for _ in 0..count - 1 {
                let _ = run_excursion(&mut chain);
            }
            assert_eq!(chain.current(), chain.head(), "cycle {cycle}");

            // And the flip back to forward.
            let _ = run_excursion(&mut chain);
            assert_eq!(chain.direction(), Direction::Forward, "cycle {cycle}");
        }
    }

    #[test]
    fn single_node_chain_flips_in_place() {
        let mut chain = Chain::new(1);
        for expected in [Direction::Reverse, Direction::Forward, Direction::Reverse] {
            let handoff = run_excursion(&mut chain);
            assert_eq!(
                handoff,
                Handoff::Flipped {
                    at: NodeId(0),
                    direction: expected
                }
            );
            assert_eq!(chain.current(), chain.head());
        }
    }

    #[test]
    fn begin_is_suppressed_mid_excursion() {
        let mut chain = Chain::new(2);
        assert!(chain.begin());
        let _ = chain.advance();
        assert!(!chain.begin(), "trigger during an excursion must be ignored");
        assert_eq!(chain.current(), chain.head(), "pointer unaffected");
    }
}
