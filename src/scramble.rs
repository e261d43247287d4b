//! Random scrambles for testing and demos.
//!
//! Scrambles go through the same redundancy filter as the search engines, so
//! they never cancel themselves out move by move.

use crate::cube::CubeState;
use crate::filter::is_redundant;
use crate::moves::{invert_sequence, Move};

/// A scrambled state together with the moves that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    pub cube: CubeState,
    pub moves: Vec<Move>,
}

impl Scramble {
    /// Applies `moves` to a solved cube as given, without filtering.
    pub fn from_moves(moves: Vec<Move>) -> Self {
        Self {
            cube: CubeState::solved().apply_moves(&moves),
            moves,
        }
    }

    /// The sequence that undoes this scramble.
    pub fn inverse(&self) -> Vec<Move> {
        invert_sequence(&self.moves)
    }
}

/// Applies `length` random moves to a solved cube.
///
/// Each move is redrawn until it passes the filter against the previous one.
pub fn random(length: usize, rng: &mut fastrand::Rng) -> Scramble {
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let candidate = Move::ALL[rng.usize(..Move::ALL.len())];
        if moves.last().is_some_and(|&last| is_redundant(last, candidate)) {
            continue;
        }
        moves.push(candidate);
    }
    Scramble::from_moves(moves)
}
