//! Iterative-deepening depth-first search.
//!
//! Runs a bounded depth-first search at limits 1, 2, ... up to the bound and
//! returns the first solution, which is therefore as short as any. Only the
//! states on the current path are excluded from revisiting. The same
//! deepening loop drives both phases of the two-phase engine.

use std::ops::RangeInclusive;

use log::{debug, info};

use super::path::PathSet;
use super::{SearchResult, SearchStatus};
use crate::cube::CubeState;
use crate::filter::successors;
use crate::moves::Move;
use crate::progress::{Halt, Limits, Progress, Session};
use crate::Solver;

#[derive(Debug, Clone, Default)]
pub struct IterativeDeepening {
    pub limits: Limits,
}

impl IterativeDeepening {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl Solver for IterativeDeepening {
    fn name(&self) -> &'static str {
        "depth-first"
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

        let outcome = deepen(&mut session, cube, &Move::ALL, CubeState::is_solved, 1..=bound);
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

/// Searches `cube` at each depth limit in `limits` until `goal` holds.
///
/// Progress snapshots report the current limit.
pub(crate) fn deepen(
    session: &mut Session<'_, '_>,
    cube: &CubeState,
    moves: &[Move],
    goal: fn(&CubeState) -> bool,
    limits: RangeInclusive<u32>,
) -> Result<Option<Vec<Move>>, Halt> {
    for limit in limits {
        debug!("depth limit {limit}, {} nodes so far", session.nodes());
        let mut search = Bounded {
            session: &mut *session,
            moves,
            goal,
            limit,
            path: Vec::with_capacity(limit as usize),
        };
        if search.descend(&mut PathSet::default(), cube, 0, None)? {
            return Ok(Some(search.path));
        }
    }
    Ok(None)
}

/// One depth-limited pass.
struct Bounded<'a, 'l, 'p> {
    session: &'a mut Session<'l, 'p>,
    moves: &'a [Move],
    goal: fn(&CubeState) -> bool,
    limit: u32,
    path: Vec<Move>,
}

impl Bounded<'_, '_, '_> {
    fn descend(
        &mut self,
        on_path: &mut PathSet,
        cube: &CubeState,
        depth: u32,
        last: Option<Move>,
    ) -> Result<bool, Halt> {
        self.session.visit(self.limit)?;

        let Some(mut entry) = on_path.enter(cube.encode()) else {
            return Ok(false);
        };
        if (self.goal)(cube) {
            return Ok(true);
        }
        if depth >= self.limit {
            return Ok(false);
        }

        let moves = self.moves;
        for mv in successors(last, moves) {
            self.path.push(mv);
            if self.descend(&mut entry, &cube.apply(mv), depth + 1, Some(mv))? {
                return Ok(true);
            }
            self.path.pop();
        }
        Ok(false)
    }
}
