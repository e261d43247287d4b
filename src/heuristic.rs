//! Distance-to-solved estimates used to prune and order search.
//!
//! These are cheap approximations, not proven lower bounds. A turn can put 12
//! side stickers off color, so the sticker count can overestimate once a
//! scramble is two or more moves deep. Every estimate is zero on a solved
//! state. Target colors are read from the face centers, which never move
//! under face turns.

use clap::ValueEnum;

use crate::cube::{Color, CubeState};
use crate::geometry::{face_of, CENTER, CORNER_SLOTS, EDGE_SLOTS, FACELETS};

/// Selectable distance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Heuristic {
    /// Stickers off their face color, divided by 8.
    Misplaced,
    /// Corners outside their home slot, divided by 4 (rounded up).
    Corners,
    /// Edges outside their home slot, divided by 4 (rounded up).
    Edges,
    /// Maximum of the sticker, corner and edge estimates.
    #[default]
    Combined,
    /// Corner estimate plus edge estimate.
    CornersPlusEdges,
}

impl Heuristic {
    /// Estimated number of moves left to reach the solved state.
    pub fn estimate(self, cube: &CubeState) -> u32 {
        match self {
            Heuristic::Misplaced => misplaced_stickers(cube),
            Heuristic::Corners => misplaced_corners(cube),
            Heuristic::Edges => misplaced_edges(cube),
            Heuristic::Combined => misplaced_stickers(cube)
                .max(misplaced_corners(cube))
                .max(misplaced_edges(cube)),
            Heuristic::CornersPlusEdges => misplaced_corners(cube) + misplaced_edges(cube),
        }
    }
}

#[inline(always)]
fn target(cube: &CubeState, facelet: usize) -> Color {
    cube.facelet(face_of(facelet) * 9 + CENTER)
}

/// Stickers that differ from their face center, floor-divided by 8.
pub fn misplaced_stickers(cube: &CubeState) -> u32 {
    let misplaced = (0..FACELETS)
        .filter(|&i| cube.facelet(i) != target(cube, i))
        .count() as u32;
    misplaced / 8
}

/// Corner slots whose colors are not the slot's home colors, ceil-divided by 4.
pub fn misplaced_corners(cube: &CubeState) -> u32 {
    let misplaced = CORNER_SLOTS
        .iter()
        .filter(|slot| !holds_home_piece(cube, &slot[..]))
        .count() as u32;
    misplaced.div_ceil(4)
}

/// Edge slots whose colors are not the slot's home colors, ceil-divided by 4.
pub fn misplaced_edges(cube: &CubeState) -> u32 {
    let misplaced = EDGE_SLOTS
        .iter()
        .filter(|slot| !holds_home_piece(cube, &slot[..]))
        .count() as u32;
    misplaced.div_ceil(4)
}

/// True if the stickers in `slot` carry exactly the centers of their faces,
/// in any orientation.
fn holds_home_piece(cube: &CubeState, slot: &[usize]) -> bool {
    let mut actual = [Color::White; 3];
    let mut home = [Color::White; 3];
    for (k, &facelet) in slot.iter().enumerate() {
        actual[k] = cube.facelet(facelet);
        home[k] = target(cube, facelet);
    }

    let actual = &mut actual[..slot.len()];
    let home = &mut home[..slot.len()];
    actual.sort_unstable();
    home.sort_unstable();
    actual == home
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{parse_sequence, Move};

    const ALL: [Heuristic; 5] = [
        Heuristic::Misplaced,
        Heuristic::Corners,
        Heuristic::Edges,
        Heuristic::Combined,
        Heuristic::CornersPlusEdges,
    ];

    #[test]
    fn test_zero_at_solved() {
        for heuristic in ALL {
            assert_eq!(heuristic.estimate(&CubeState::solved()), 0, "{heuristic:?}");
        }
    }

    #[test]
    fn test_single_quarter_turn_estimates() {
        let turned = CubeState::solved().apply("R".parse::<Move>().unwrap());
        assert_eq!(misplaced_stickers(&turned), 12 / 8);
        assert_eq!(misplaced_corners(&turned), 1);
        assert_eq!(misplaced_edges(&turned), 1);
        assert_eq!(Heuristic::Combined.estimate(&turned), 1);
        assert_eq!(Heuristic::CornersPlusEdges.estimate(&turned), 2);
    }

    #[test]
    fn test_half_turn_estimates() {
        // R2 swaps corners diagonally, so every R-layer corner is out of its slot
        let turned = CubeState::solved().apply("R2".parse::<Move>().unwrap());
        assert_eq!(misplaced_corners(&turned), 1);
        assert_eq!(misplaced_stickers(&turned), 12 / 8);
    }

    #[test]
    fn test_combined_is_max_of_parts() {
        let state = CubeState::solved()
            .apply_moves(&parse_sequence("R U F' D2 L B' U R2 F").unwrap());
        let expected = misplaced_stickers(&state)
            .max(misplaced_corners(&state))
            .max(misplaced_edges(&state));
        assert_eq!(Heuristic::Combined.estimate(&state), expected);
        assert!(expected > 0);
    }

    #[test]
    fn test_corners_plus_edges_is_sum_of_parts() {
        let state = CubeState::solved()
            .apply_moves(&parse_sequence("R U F' D2 L B' U R2 F").unwrap());
        let sum = misplaced_corners(&state) + misplaced_edges(&state);
        assert_eq!(Heuristic::CornersPlusEdges.estimate(&state), sum);
        assert!(sum >= Heuristic::Corners.estimate(&state).max(Heuristic::Edges.estimate(&state)));
    }

    #[test]
    fn test_heuristic_names() {
        let names: Vec<String> = ALL
            .iter()
            .filter_map(|h| h.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect();
        assert_eq!(
            names,
            ["misplaced", "corners", "edges", "combined", "corners-plus-edges"]
        );
    }

    #[test]
    fn test_uniform_cube_in_other_scheme_is_zero() {
        let uniform = CubeState::from_faces([[[Color::Green; 3]; 3]; 6]);
        for heuristic in ALL {
            assert_eq!(heuristic.estimate(&uniform), 0, "{heuristic:?}");
        }
    }
}
