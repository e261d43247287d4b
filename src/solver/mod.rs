//! Search engines.
//!
//! Every engine implements [`Solver`](crate::Solver) and shares the same
//! plumbing: the redundancy filter from [`crate::filter`], a
//! [`Session`](crate::progress::Session) for progress and budgets, and either
//! a parent-pointer [`arena`] (queue/heap based engines) or a scoped
//! [`path`] set (depth-first engines).
//!
//! Lifecycle of every solve: `Idle -> Searching -> Found | Exhausted |
//! TimedOut`, with `Cancelled` and `NodeLimitReached` as the other ways a
//! budget can end it. Iterative engines re-enter `Searching` once per depth
//! or threshold step.

mod arena;
mod beam;
mod best_first;
mod breadth_first;
mod iddfs;
mod ida_star;
mod path;
mod two_phase;

use std::time::Duration;

pub use beam::{Beam, DEFAULT_BEAM_WIDTH};
pub use best_first::BestFirst;
pub use breadth_first::BreadthFirst;
pub use iddfs::IterativeDeepening;
pub use ida_star::IdaStar;
pub use two_phase::{
    in_phase_one_goal, TwoPhase, DEFAULT_PHASE1_DEPTH, DEFAULT_PHASE2_DEPTH, PHASE_TWO_MOVES,
};

use crate::cube::CubeState;
use crate::moves::Move;

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A verified-by-construction solution was found.
    Found,
    /// The bound was searched completely without reaching the goal.
    Exhausted,
    /// The wall-clock ceiling passed.
    TimedOut,
    /// The cancel flag was raised.
    Cancelled,
    /// The node budget ran out.
    NodeLimitReached,
}

/// Outcome of one top-level solve.
///
/// An unsolved result is ordinary data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Moves that take the input state to solved. Empty when not found,
    /// except for a two-phase run whose second phase failed.
    pub solution: Vec<Move>,
    pub found: bool,
    pub nodes_explored: u64,
    pub elapsed: Duration,
    pub status: SearchStatus,
}

impl SearchResult {
    /// Elapsed wall-clock time in whole milliseconds.
    pub fn time_elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Replays the solution on `start` and checks that it ends solved.
    pub fn solves(&self, start: &CubeState) -> bool {
        start.apply_moves(&self.solution).is_solved()
    }
}
