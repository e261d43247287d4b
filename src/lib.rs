//! Rubik's Cube Solver Library
//!
//! Models a 3x3x3 cube as 54 colored stickers and finds move sequences that
//! return it to the solved state. Several search engines share one move
//! model, one redundancy filter and one progress/budget mechanism, and are
//! interchangeable behind the [`Solver`] trait.

pub mod config;
pub mod cube;
pub mod filter;
pub mod geometry;
pub mod heuristic;
pub mod moves;
pub mod progress;
pub mod scramble;
pub mod solver;

pub use config::{Algorithm, SolverConfig};
pub use cube::{Color, CubeState};
pub use heuristic::Heuristic;
pub use moves::{Face, Move, Turn};
pub use progress::{Limits, Progress};
pub use solver::{SearchResult, SearchStatus};

/// A search engine, usable through dynamic dispatch.
///
/// Engine-specific settings (heuristic, beam width, phase depths, budgets)
/// live on the implementing type, so callers only pass the state, a move
/// bound and an optional progress callback.
pub trait Solver {
    /// Short kebab-case name, matching the CLI's algorithm names.
    fn name(&self) -> &'static str;

    /// Searches for a sequence of at most `bound` moves that solves `cube`.
    ///
    /// Never fails: running out of depth, time or nodes is reported through
    /// [`SearchResult::status`].
    fn solve(
        &self,
        cube: &CubeState,
        bound: u32,
        on_progress: Option<&mut dyn FnMut(&Progress)>,
    ) -> SearchResult;
}
