//! Face turn notation.
//!
//! A move is a face (`R L U D F B`) combined with a turn: clockwise (`R`),
//! counter-clockwise (`R'`) or a half turn (`R2`). Clockwise is judged
//! looking straight at the face from outside the cube.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the six outer faces.
///
/// The discriminant is the face's storage index inside a
/// [`CubeState`](crate::cube::CubeState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up = 0,
    Right = 1,
    Front = 2,
    Down = 3,
    Left = 4,
    Back = 5,
}

impl Face {
    /// All faces in storage order.
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Right,
        Face::Front,
        Face::Down,
        Face::Left,
        Face::Back,
    ];

    /// Storage index of this face.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The face on the other side of the cube.
    pub const fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    /// Single-letter notation.
    pub const fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    fn name(self) -> &'static str {
        match self {
            Face::Up => "top",
            Face::Right => "right",
            Face::Front => "front",
            Face::Down => "bottom",
            Face::Left => "left",
            Face::Back => "back",
        }
    }
}

/// How far a face is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    /// Number of clockwise quarter turns this turn amounts to.
    #[inline(always)]
    pub const fn quarter_turns(self) -> usize {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    /// The turn that undoes this one.
    pub const fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }
}

/// A single face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// All 18 moves in the order the search engines expand them.
    pub const ALL: [Move; 18] = [
        Move::new(Face::Right, Turn::Clockwise),
        Move::new(Face::Right, Turn::CounterClockwise),
        Move::new(Face::Right, Turn::Half),
        Move::new(Face::Left, Turn::Clockwise),
        Move::new(Face::Left, Turn::CounterClockwise),
        Move::new(Face::Left, Turn::Half),
        Move::new(Face::Up, Turn::Clockwise),
        Move::new(Face::Up, Turn::CounterClockwise),
        Move::new(Face::Up, Turn::Half),
        Move::new(Face::Down, Turn::Clockwise),
        Move::new(Face::Down, Turn::CounterClockwise),
        Move::new(Face::Down, Turn::Half),
        Move::new(Face::Front, Turn::Clockwise),
        Move::new(Face::Front, Turn::CounterClockwise),
        Move::new(Face::Front, Turn::Half),
        Move::new(Face::Back, Turn::Clockwise),
        Move::new(Face::Back, Turn::CounterClockwise),
        Move::new(Face::Back, Turn::Half),
    ];

    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Move {
        Move::new(self.face, self.turn.inverse())
    }

    /// True for clockwise and counter-clockwise turns.
    pub const fn is_quarter(self) -> bool {
        !matches!(self.turn, Turn::Half)
    }

    /// Human-readable instruction for this move.
    ///
    /// Used when presenting a solution step by step.
    pub fn describe(self) -> String {
        let amount = match self.turn {
            Turn::Clockwise => "clockwise",
            Turn::CounterClockwise => "counter-clockwise",
            Turn::Half => "180 degrees",
        };
        format!("Turn the {} face {}", self.face.name(), amount)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

/// Error returned when a move token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("unknown face `{0}`")]
    UnknownFace(char),
    #[error("unknown turn suffix `{suffix}` in move `{token}`")]
    UnknownSuffix { token: String, suffix: String },
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let letter = chars.next().ok_or(ParseMoveError::Empty)?;
        let face = Face::from_letter(letter).ok_or(ParseMoveError::UnknownFace(letter))?;

        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" | "2'" => Turn::Half,
            suffix => {
                return Err(ParseMoveError::UnknownSuffix {
                    token: token.to_string(),
                    suffix: suffix.to_string(),
                })
            }
        };

        Ok(Move::new(face, turn))
    }
}

/// Parses a whitespace-separated move sequence such as `"R U R' U'"`.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, ParseMoveError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Formats a move sequence in standard notation, separated by spaces.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reverses and inverts a sequence, producing the sequence that undoes it.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_roundtrip_for_all_moves() {
        for mv in Move::ALL {
            let text = mv.to_string();
            assert_eq!(text.parse::<Move>(), Ok(mv), "failed to reparse {text}");
        }
    }

    #[test]
    fn test_parse_sequence() {
        let moves = parse_sequence("R U  R' U2\tF").unwrap();
        assert_eq!(format_sequence(&moves), "R U R' U2 F");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Move>(), Err(ParseMoveError::Empty));
        assert_eq!("X".parse::<Move>(), Err(ParseMoveError::UnknownFace('X')));
        assert!(matches!(
            "R3".parse::<Move>(),
            Err(ParseMoveError::UnknownSuffix { .. })
        ));
    }

    #[test]
    fn test_invert_sequence() {
        let moves = parse_sequence("R U2 F'").unwrap();
        assert_eq!(format_sequence(&invert_sequence(&moves)), "F U2 R'");
    }

    #[test]
    fn test_all_moves_are_distinct() {
        for (i, a) in Move::ALL.iter().enumerate() {
            for b in &Move::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_descriptions() {
        let text: Vec<String> = parse_sequence("R U' F2")
            .unwrap()
            .into_iter()
            .map(Move::describe)
            .collect();
        insta::assert_snapshot!(text.join("\n"), @r"
        Turn the right face clockwise
        Turn the top face counter-clockwise
        Turn the front face 180 degrees
        ");
    }
}
