//! Best-first (A*-ordered) search.
//!
//! The frontier is a min-heap keyed by `(f, h, insertion order)`, so the
//! globally cheapest node is always expanded next and ties favour the node
//! closer to solved, then the older one. A state is marked visited when it
//! is first pushed and never pushed again.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, info};
use rustc_hash::FxHashSet;

use super::arena::{NodeArena, NodeId};
use super::{SearchResult, SearchStatus};
use crate::cube::{CubeState, StateKey};
use crate::filter::successors;
use crate::heuristic::Heuristic;
use crate::moves::Move;
use crate::progress::{Halt, Limits, Progress, Session};
use crate::Solver;

#[derive(Debug, Clone, Default)]
pub struct BestFirst {
    pub limits: Limits,
    pub heuristic: Heuristic,
}

impl BestFirst {
    pub fn new(limits: Limits, heuristic: Heuristic) -> Self {
        Self { limits, heuristic }
    }
}

impl Solver for BestFirst {
    fn name(&self) -> &'static str {
        "best-first"
    }

    fn solve(
        &self,
        cube: &CubeState,
        bound: u32,
        on_progress: Option<&mut dyn FnMut(&Progress)>,
    ) -> SearchResult {
        let mut session = Session::new(&self.limits, on_progress);
        if cube.is_solved() {
            return session.finish(SearchStatus::Found, Vec::new());
        }

        let outcome = Frontier::new(self.heuristic).search(&mut session, cube, bound);
        let result = session.conclude(outcome);
        info!(
            "{}: {:?} after {} nodes in {} ms",
            self.name(),
            result.status,
            result.nodes_explored,
            result.time_elapsed_ms()
        );
        result
    }
}

/// Heap key: `(f, h, insertion order)`.
type Priority = (u32, u32, u64);

struct Frontier {
    heuristic: Heuristic,
    arena: NodeArena,
    heap: BinaryHeap<Reverse<(Priority, NodeId)>>,
    visited: FxHashSet<StateKey>,
    pushed: u64,
}

impl Frontier {
    fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            arena: NodeArena::default(),
            heap: BinaryHeap::new(),
            visited: FxHashSet::default(),
            pushed: 0,
        }
    }

    /// Queues `id` unless its state was already seen.
    fn push(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        if !self.visited.insert(node.cube.encode()) {
            return;
        }
        let h = self.heuristic.estimate(&node.cube);
        let priority = (node.depth + h, h, self.pushed);
        self.pushed += 1;
        self.heap.push(Reverse((priority, id)));
    }

    fn search(
        mut self,
        session: &mut Session<'_, '_>,
        cube: &CubeState,
        bound: u32,
    ) -> Result<Option<Vec<Move>>, Halt> {
        let root = self.arena.root(*cube);
        self.push(root);

        let mut deepest = 0;
        while let Some(Reverse(((f, _, _), id))) = self.heap.pop() {
            let node = self.arena.get(id);
            let (state, depth, last_move) = (node.cube, node.depth, node.last_move);
            if depth > deepest {
                deepest = depth;
                debug!("reached depth {depth} at f = {f}, {} queued", self.heap.len());
            }
            session.visit(deepest)?;

            if state.is_solved() {
                return Ok(Some(self.arena.path_to(id)));
            }
            if depth >= bound {
                continue;
            }

            for mv in successors(last_move, &Move::ALL) {
                let next = state.apply(mv);
                if self.visited.contains(&next.encode()) {
                    continue;
                }
                let child = self.arena.child(id, mv, next);
                self.push(child);
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::{assert_solves, limits, random_scrambles, scrambled};

    #[test]
    fn test_solves_short_random_scrambles() {
        let solver = BestFirst::new(limits(), Heuristic::Combined);
        for scramble in random_scrambles(4, 5, 5) {
            let result = solver.solve(&scramble.cube, 20, None);
            assert_solves(&result, &scramble.cube);
            assert!(result.solution.len() <= 20);
        }
    }

    #[test]
    fn test_single_move_is_solved_in_one() {
        let solver = BestFirst::new(limits(), Heuristic::Combined);
        let cube = scrambled("F'");
        let result = solver.solve(&cube, 20, None);
        assert_solves(&result, &cube);
        assert_eq!(result.solution.len(), 1);
    }

    #[test]
    fn test_bound_limits_expansion() {
        let solver = BestFirst::new(limits(), Heuristic::Combined);
        let cube = scrambled("R U");
        let result = solver.solve(&cube, 1, None);
        assert_eq!(result.status, SearchStatus::Exhausted);
        assert!(result.solution.is_empty());
        assert_eq!(result.nodes_explored, 19);
    }

    #[test]
    fn test_progress_depth_never_decreases() {
        let solver = BestFirst::new(
            Limits {
                yield_interval: 5,
                ..limits()
            },
            Heuristic::Combined,
        );
        let cube = scrambled("R U R' U' F");
        let mut seen: Vec<Progress> = Vec::new();
        let mut record = |p: &Progress| seen.push(*p);
        solver.solve(&cube, 20, Some(&mut record));

        for pair in seen.windows(2) {
            assert!(pair[0].depth() <= pair[1].depth());
            assert!(pair[0].nodes() < pair[1].nodes());
        }
    }
}
