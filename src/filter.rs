//! Move legality filter shared by every search engine and the scramble generator.
//!
//! Two consecutive turns of one face collapse into a single turn, and turns
//! of opposite faces commute. Rejecting both cases prunes branches that can
//! only reach states some other branch already reaches in as many moves.

use crate::moves::Move;

/// Returns true if `next` should not follow `last` on a search path.
///
/// Rejects a turn of the same face. For opposite faces, only the ordering
/// whose second letter sorts after the first (`L` then `R`, never `R` then
/// `L`) is kept.
#[inline]
pub fn is_redundant(last: Move, next: Move) -> bool {
    if last.face == next.face {
        return true;
    }
    last.face.opposite() == next.face && next.face.letter() < last.face.letter()
}

/// Moves from `moves` that may follow `last`, in their given order.
#[inline]
pub fn successors(last: Option<Move>, moves: &[Move]) -> impl Iterator<Item = Move> + '_ {
    moves
        .iter()
        .copied()
        .filter(move |&next| last.map_or(true, |last| !is_redundant(last, next)))
}
