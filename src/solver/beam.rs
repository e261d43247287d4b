//! Beam search.
//!
//! Expands one whole level at a time and keeps only the `width` children
//! with the lowest `f` for the next level. Anything cut from the beam is
//! gone for good, so the search can miss solutions that exist within the
//! bound and the solutions it finds need not be shortest.

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

/// Nodes kept per level unless configured otherwise.
pub const DEFAULT_BEAM_WIDTH: usize = 100;

#[derive(Debug, Clone)]
pub struct Beam {
    pub limits: Limits,
    pub heuristic: Heuristic,
    pub width: usize,
}

impl Default for Beam {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            heuristic: Heuristic::default(),
            width: DEFAULT_BEAM_WIDTH,
        }
    }
}

impl Solver for Beam {
    fn name(&self) -> &'static str {
        "beam"
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

        let outcome = self.search(&mut session, cube, bound);
        let result = session.conclude(outcome);
        info!(
            "{} (width {}): {:?} after {} nodes in {} ms",
            self.name(),
            self.width,
            result.status,
            result.nodes_explored,
            result.time_elapsed_ms()
        );
        result
    }
}

impl Beam {
    fn search(
        &self,
        session: &mut Session<'_, '_>,
        cube: &CubeState,
        bound: u32,
    ) -> Result<Option<Vec<Move>>, Halt> {
        let mut arena = NodeArena::default();
        let mut visited: FxHashSet<StateKey> = FxHashSet::default();
        visited.insert(cube.encode());
        let mut level = vec![arena.root(*cube)];

        for depth in 0..=bound {
            for &id in &level {
                session.visit(depth)?;
                if arena.get(id).cube.is_solved() {
                    return Ok(Some(arena.path_to(id)));
                }
            }
            if depth == bound {
                break;
            }

            let g = depth + 1;
            let mut candidates: Vec<(u32, NodeId)> = Vec::new();
            for &id in &level {
                let node = arena.get(id);
                let (state, last_move) = (node.cube, node.last_move);
                for mv in successors(last_move, &Move::ALL) {
                    let next = state.apply(mv);
                    let h = self.heuristic.estimate(&next);
                    if h > bound - g || !visited.insert(next.encode()) {
                        continue;
                    }
                    candidates.push((g + h, arena.child(id, mv, next)));
                }
            }

            candidates.sort_unstable();
            candidates.truncate(self.width.max(1));
            debug!(
                "level {g}: kept {} of {} candidates",
                candidates.len(),
                visited.len()
            );
            if candidates.is_empty() {
                break;
            }
            level = candidates.into_iter().map(|(_, id)| id).collect();
        }

        Ok(None)
    }
}
