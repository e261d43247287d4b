//! Two-phase search.
//!
//! Phase 1 searches all 18 moves for any state in the subgroup H where every
//! edge is oriented, every corner is oriented and the four middle-layer
//! edges sit in the middle layer. Phase 2 finishes from there with a move
//! set that has no quarter turns of F or B, so it can never flip an edge.
//! Both phases are iterative deepening with their own path sets, and the
//! answer is phase 1 followed by phase 2. The result is usually longer than
//! optimal.

use log::{debug, info};

use super::iddfs::deepen;
use super::{SearchResult, SearchStatus};
use crate::cube::{Color, CubeState};
use crate::geometry::{CORNER_SLOTS, EDGE_SLOTS, SLICE_EDGE_SLOTS};
use crate::moves::{Face, Move, Turn};
use crate::progress::{Limits, Progress, Session};
use crate::Solver;

/// Moves allowed in phase 2.
pub const PHASE_TWO_MOVES: [Move; 14] = [
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
    Move::new(Face::Front, Turn::Half),
    Move::new(Face::Back, Turn::Half),
];

/// Default depth cap for phase 1.
pub const DEFAULT_PHASE1_DEPTH: u32 = 12;
/// Default depth cap for phase 2.
pub const DEFAULT_PHASE2_DEPTH: u32 = 18;

#[derive(Debug, Clone)]
pub struct TwoPhase {
    pub limits: Limits,
    pub phase1_depth: u32,
    pub phase2_depth: u32,
}

impl Default for TwoPhase {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            phase1_depth: DEFAULT_PHASE1_DEPTH,
            phase2_depth: DEFAULT_PHASE2_DEPTH,
        }
    }
}

impl Solver for TwoPhase {
    fn name(&self) -> &'static str {
        "two-phase"
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

        session.enter_phase(1);
        let phase1_limit = bound.min(self.phase1_depth);
        let prefix = match deepen(&mut session, cube, &Move::ALL, in_phase_one_goal, 0..=phase1_limit) {
            Ok(Some(prefix)) => prefix,
            outcome => {
                info!("{}: phase 1 ended without reaching H", self.name());
                return session.conclude(outcome);
            }
        };
        debug!("phase 1 done in {} moves", prefix.len());

        session.enter_phase(2);
        let midway = cube.apply_moves(&prefix);
        let remaining = bound.saturating_sub(prefix.len() as u32);
        let phase2 = deepen(
            &mut session,
            &midway,
            &PHASE_TWO_MOVES,
            CubeState::is_solved,
            0..=self.phase2_depth.min(remaining),
        );

        let result = match phase2 {
            Ok(Some(rest)) => {
                let mut solution = prefix;
                solution.extend(rest);
                session.finish(SearchStatus::Found, solution)
            }
            Ok(None) => session.finish(SearchStatus::Exhausted, prefix),
            Err(halt) => session.finish(halt.into(), prefix),
        };
        info!(
            "{}: {:?} with {} moves after {} nodes in {} ms",
            self.name(),
            result.status,
            result.solution.len(),
            result.nodes_explored,
            result.time_elapsed_ms()
        );
        result
    }
}

/// True if `cube` is in H: edges and corners oriented, middle-layer edges home.
pub fn in_phase_one_goal(cube: &CubeState) -> bool {
    let axes = Axes::of(cube);
    edges_oriented(cube, &axes) && corners_oriented(cube, &axes) && slice_edges_in_slice(cube, &axes)
}

/// Center colors of the U/D and F/B axes.
struct Axes {
    up_down: [Color; 2],
    front_back: [Color; 2],
}

impl Axes {
    fn of(cube: &CubeState) -> Self {
        Self {
            up_down: [cube.center(Face::Up), cube.center(Face::Down)],
            front_back: [cube.center(Face::Front), cube.center(Face::Back)],
        }
    }
}

/// Every edge shows its reference color on its slot's reference facelet.
///
/// The reference color is the U/D color when the edge has one, otherwise
/// its F/B color.
fn edges_oriented(cube: &CubeState, axes: &Axes) -> bool {
    EDGE_SLOTS.iter().all(|&[reference, other]| {
        let (a, b) = (cube.facelet(reference), cube.facelet(other));
        axes.up_down.contains(&a) || (!axes.up_down.contains(&b) && axes.front_back.contains(&a))
    })
}

fn corners_oriented(cube: &CubeState, axes: &Axes) -> bool {
    CORNER_SLOTS
        .iter()
        .all(|slot| axes.up_down.contains(&cube.facelet(slot[0])))
}

fn slice_edges_in_slice(cube: &CubeState, axes: &Axes) -> bool {
    SLICE_EDGE_SLOTS
        .iter()
        .flatten()
        .all(|&facelet| !axes.up_down.contains(&cube.facelet(facelet)))
}
