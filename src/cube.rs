//! Cube state representation and move application.
//!
//! A state is a flat array of 54 stickers: six faces in the order
//! U, R, F, D, L, B, each a row-major 3x3 grid seen from outside the cube.
//! States are small `Copy` values, so every move produces a fresh snapshot
//! and nothing on a search path is ever shared.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::{CENTER, FACELETS, TURN_TABLES};
use crate::moves::{Face, Move};

/// Canonical encoding of a state, used as a visited-set key.
///
/// One byte per sticker, so two states share a key exactly when they are equal.
pub type StateKey = [u8; FACELETS];

/// One of the six sticker colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Orange = 4,
    Blue = 5,
}

impl Color {
    /// Colors in the order of the faces they cover on a solved cube.
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
    ];

    /// Single-letter form used by the text format.
    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Blue => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|color| color.letter() == letter.to_ascii_uppercase())
    }
}

/// A full cube configuration.
///
/// Any arrangement of colors is accepted. Color counts are never validated
/// because states may come from an external recognizer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    stickers: [Color; FACELETS],
}

impl CubeState {
    /// The solved cube: every face uniform in its designated color.
    pub fn solved() -> Self {
        let mut stickers = [Color::White; FACELETS];
        for (i, sticker) in stickers.iter_mut().enumerate() {
            *sticker = Color::ALL[i / 9];
        }
        Self { stickers }
    }

    /// Builds a state from six 3x3 grids in U, R, F, D, L, B order.
    pub fn from_faces(faces: [[[Color; 3]; 3]; 6]) -> Self {
        let mut stickers = [Color::White; FACELETS];
        for (face, grid) in faces.iter().enumerate() {
            for (row, line) in grid.iter().enumerate() {
                for (col, &color) in line.iter().enumerate() {
                    stickers[face * 9 + row * 3 + col] = color;
                }
            }
        }
        Self { stickers }
    }

    /// Color of the sticker at `row`, `col` of `face`.
    #[inline]
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Color {
        self.stickers[face.index() * 9 + row * 3 + col]
    }

    /// Color of the center sticker of `face`.
    #[inline]
    pub fn center(&self, face: Face) -> Color {
        self.stickers[face.index() * 9 + CENTER]
    }

    /// Color at a raw facelet index.
    #[inline(always)]
    pub(crate) fn facelet(&self, index: usize) -> Color {
        self.stickers[index]
    }

    /// Returns the state after applying `mv`.
    ///
    /// Every move is a fixed sticker permutation composed from one of the six
    /// clockwise face turns, so this is total for any input.
    #[inline]
    pub fn apply(&self, mv: Move) -> Self {
        let table = &TURN_TABLES[mv.face.index()][mv.turn.quarter_turns() - 1];
        let mut stickers = [Color::White; FACELETS];
        for (dest, &src) in table.iter().enumerate() {
            stickers[dest] = self.stickers[src as usize];
        }
        Self { stickers }
    }

    /// Returns the state after applying every move of `moves` in order.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |state, &mv| state.apply(mv))
    }

    /// True if every face shows a single color.
    ///
    /// Each face is compared against its own top-left sticker, so a uniform
    /// cube in any color scheme counts as solved.
    pub fn is_solved(&self) -> bool {
        self.stickers
            .chunks_exact(9)
            .all(|face| face.iter().all(|&sticker| sticker == face[0]))
    }

    /// Canonical collision-free key for hashing.
    #[inline]
    pub fn encode(&self) -> StateKey {
        let mut key = [0u8; FACELETS];
        for (byte, &sticker) in key.iter_mut().zip(&self.stickers) {
            *byte = sticker as u8;
        }
        key
    }

    /// The 54 sticker letters in storage order without separators.
    pub fn to_facelet_string(&self) -> String {
        self.stickers.iter().map(|color| color.letter()).collect()
    }

    fn row_string(&self, face: Face, row: usize) -> String {
        (0..3).map(|col| self.sticker(face, row, col).letter()).collect()
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CubeState")
            .field(&self.to_facelet_string())
            .finish()
    }
}

/// Draws the cube as an unfolded net: U on top, L F R B across, D below.
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            writeln!(f, "    {}", self.row_string(Face::Up, row))?;
        }
        for row in 0..3 {
            let strip: Vec<String> = [Face::Left, Face::Front, Face::Right, Face::Back]
                .into_iter()
                .map(|face| self.row_string(face, row))
                .collect();
            writeln!(f, "{}", strip.join(" "))?;
        }
        for row in 0..3 {
            writeln!(f, "    {}", self.row_string(Face::Down, row))?;
        }
        Ok(())
    }
}

/// Error returned when a sticker string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseStateError {
    #[error("expected 54 stickers, found {0}")]
    WrongLength(usize),
    #[error("unknown color `{letter}` at sticker {index}")]
    UnknownColor { index: usize, letter: char },
}

/// Parses either the net drawn by `Display` or 54 color letters in storage
/// order (U, R, F, D, L, B).
///
/// Nine non-empty lines whose middle three hold four groups each are read as
/// a net. Anything else has its whitespace ignored and is read in storage
/// order, so a compact facelet string works as well as one face row per line.
impl FromStr for CubeState {
    type Err = ParseStateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = match net_letters(text) {
            Some(letters) => letters,
            None => text.chars().filter(|c| !c.is_whitespace()).collect(),
        };
        if letters.len() != FACELETS {
            return Err(ParseStateError::WrongLength(letters.len()));
        }

        let mut stickers = [Color::White; FACELETS];
        for (index, (&letter, sticker)) in letters.iter().zip(stickers.iter_mut()).enumerate() {
            *sticker =
                Color::from_letter(letter).ok_or(ParseStateError::UnknownColor { index, letter })?;
        }
        Ok(Self { stickers })
    }
}

/// Reorders a net (U, then L F R B side by side, then D) into storage order.
fn net_letters(text: &str) -> Option<Vec<char>> {
    let rows: Vec<Vec<&str>> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();
    let shaped = rows.len() == 9
        && rows
            .iter()
            .enumerate()
            .all(|(i, row)| row.len() == if (3..6).contains(&i) { 4 } else { 1 });
    if !shaped {
        return None;
    }

    let band = |first: usize| -> String { rows[first..first + 3].concat().concat() };
    let strip = |column: usize| -> String { rows[3..6].iter().map(|row| row[column]).collect() };
    let ordered = [band(0), strip(2), strip(1), band(6), strip(0), strip(3)].concat();
    Some(ordered.chars().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{parse_sequence, Turn};

    fn quarter(face: Face) -> Move {
        Move::new(face, Turn::Clockwise)
    }

    #[test]
    fn test_solved_is_solved() {
        assert!(CubeState::solved().is_solved());
    }

    #[test]
    fn test_no_single_move_keeps_solved() {
        let solved = CubeState::solved();
        for mv in Move::ALL {
            assert!(!solved.apply(mv).is_solved(), "{mv} left the cube solved");
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let start = CubeState::solved().apply_moves(&parse_sequence("R U F' L2 D B").unwrap());
        for mv in Move::ALL.into_iter().filter(|m| m.is_quarter()) {
            let back = start.apply(mv).apply(mv).apply(mv).apply(mv);
            assert_eq!(back, start, "{mv} four times");
        }
    }

    #[test]
    fn test_half_turn_is_two_quarter_turns() {
        let start = CubeState::solved().apply_moves(&parse_sequence("F D' R2 B U").unwrap());
        for face in Face::ALL {
            let half = start.apply(Move::new(face, Turn::Half));
            let twice = start.apply(quarter(face)).apply(quarter(face));
            assert_eq!(half, twice, "{}2", face.letter());
        }
    }

    #[test]
    fn test_inverse_undoes_every_move() {
        let start = CubeState::solved().apply_moves(&parse_sequence("L U2 B' D").unwrap());
        for mv in Move::ALL {
            assert_eq!(start.apply(mv).apply(mv.inverse()), start, "{mv}");
        }
    }

    #[test]
    fn test_up_turn_moves_front_row_to_left() {
        let turned = CubeState::solved().apply(quarter(Face::Up));
        for col in 0..3 {
            assert_eq!(turned.sticker(Face::Left, 0, col), Color::Green);
            assert_eq!(turned.sticker(Face::Front, 0, col), Color::Red);
            assert_eq!(turned.sticker(Face::Front, 1, col), Color::Green);
        }
    }

    #[test]
    fn test_right_turn_moves_front_column_up() {
        let turned = CubeState::solved().apply(quarter(Face::Right));
        for row in 0..3 {
            assert_eq!(turned.sticker(Face::Up, row, 2), Color::Green);
            assert_eq!(turned.sticker(Face::Back, row, 0), Color::White);
            assert_eq!(turned.sticker(Face::Down, row, 2), Color::Blue);
            assert_eq!(turned.sticker(Face::Front, row, 2), Color::Yellow);
        }
    }

    #[test]
    fn test_face_grid_rotates_clockwise() {
        // paint one corner of F and check where the turn carries it
        let mut faces = [[[Color::White; 3]; 3]; 6];
        for (face, grid) in faces.iter_mut().enumerate() {
            *grid = [[Color::ALL[face]; 3]; 3];
        }
        faces[Face::Front.index()][0][0] = Color::Red;
        let state = CubeState::from_faces(faces);

        let turned = state.apply(quarter(Face::Front));
        assert_eq!(turned.sticker(Face::Front, 0, 2), Color::Red);
        assert_eq!(turned.sticker(Face::Front, 0, 0), Color::Green);
    }

    #[test]
    fn test_every_color_count_is_preserved() {
        let state = CubeState::solved().apply_moves(&parse_sequence("R U F L D B R' U2").unwrap());
        for color in Color::ALL {
            let count = (0..FACELETS).filter(|&i| state.facelet(i) == color).count();
            assert_eq!(count, 9, "{color:?}");
        }
    }

    #[test]
    fn test_encode_distinguishes_states() {
        let solved = CubeState::solved();
        assert_eq!(solved.encode(), CubeState::solved().encode());
        for mv in Move::ALL {
            assert_ne!(solved.apply(mv).encode(), solved.encode(), "{mv}");
        }
    }

    #[test]
    fn test_facelet_string_roundtrip() {
        let state = CubeState::solved().apply_moves(&parse_sequence("R U R' U'").unwrap());
        let text = state.to_facelet_string();
        assert_eq!(text.parse::<CubeState>(), Ok(state));
    }

    #[test]
    fn test_net_roundtrip() {
        for moves in ["R U", "F' L2 D B R U'", "B2 L D' F R2"] {
            let state = CubeState::solved().apply_moves(&parse_sequence(moves).unwrap());
            assert_eq!(state.to_string().parse::<CubeState>(), Ok(state), "{moves}");
        }
    }

    #[test]
    fn test_net_reports_storage_index() {
        let mut net = CubeState::solved().to_string();
        // first sticker of the L strip is storage index 36
        let at = net.find('O').unwrap();
        net.replace_range(at..at + 1, "X");
        assert_eq!(
            net.parse::<CubeState>(),
            Err(ParseStateError::UnknownColor {
                index: 36,
                letter: 'X'
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "WWW".parse::<CubeState>(),
            Err(ParseStateError::WrongLength(3))
        );
        let mut text = CubeState::solved().to_facelet_string();
        text.replace_range(10..11, "X");
        assert_eq!(
            text.parse::<CubeState>(),
            Err(ParseStateError::UnknownColor {
                index: 10,
                letter: 'X'
            })
        );
    }

    #[test]
    fn test_malformed_state_still_moves() {
        let uniform = CubeState::from_faces([[[Color::Blue; 3]; 3]; 6]);
        assert!(uniform.is_solved());
        assert_eq!(uniform.apply(quarter(Face::Right)), uniform);
    }

    #[test]
    fn test_net_rendering() {
        let state = CubeState::solved().apply(quarter(Face::Right));
        insta::assert_snapshot!(state.to_string(), @r"
            WWG
            WWG
            WWG
        OOO GGY RRR WBB
        OOO GGY RRR WBB
        OOO GGY RRR WBB
            YYB
            YYB
            YYB
        ");
    }
}
