//! Breadth-first search.
//!
//! Explores states in order of increasing move count. Children are tested
//! as they are generated, and every shallower state was tested before them,
//! so the first solved child has a minimum-length solution. Every queued
//! state goes into one global visited set and is never enqueued twice.
//! Children at the bound are only tested, never stored. Memory still grows
//! with the whole explored frontier, so only shallow bounds are practical.

use std::collections::VecDeque;

use log::{debug, info};
use rustc_hash::FxHashSet;

use super::arena::NodeArena;
use super::{SearchResult, SearchStatus};
use crate::cube::{CubeState, StateKey};
use crate::filter::successors;
use crate::moves::Move;
use crate::progress::{Halt, Limits, Progress, Session};
use crate::Solver;

#[derive(Debug, Clone, Default)]
pub struct BreadthFirst {
    pub limits: Limits,
}

impl BreadthFirst {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl Solver for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
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

        let outcome = search(&mut session, cube, bound);
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

fn search(
    session: &mut Session<'_, '_>,
    cube: &CubeState,
    bound: u32,
) -> Result<Option<Vec<Move>>, Halt> {
    let mut arena = NodeArena::default();
    let mut visited: FxHashSet<StateKey> = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(cube.encode());
    queue.push_back(arena.root(*cube));

    let mut current_depth = 0;
    while let Some(id) = queue.pop_front() {
        let node = arena.get(id);
        let (state, depth, last_move) = (node.cube, node.depth, node.last_move);

        if depth > current_depth {
            current_depth = depth;
            debug!(
                "depth {depth}: {} queued, {} visited",
                queue.len() + 1,
                visited.len()
            );
        }
        session.visit(depth)?;
        if depth >= bound {
            continue;
        }

        let leaf = depth + 1 == bound;
        for mv in successors(last_move, &Move::ALL) {
            let next = state.apply(mv);
            if next.is_solved() {
                let goal = arena.child(id, mv, next);
                return Ok(Some(arena.path_to(goal)));
            }
            if !leaf && visited.insert(next.encode()) {
                queue.push_back(arena.child(id, mv, next));
            }
        }
    }

    Ok(None)
}
