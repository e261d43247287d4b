//! Iterative-deepening A*.
//!
//! Each pass is a depth-first search that cuts off any node whose
//! `f = g + h` exceeds the current threshold. The next threshold is the
//! smallest `f` that was cut off, so thresholds strictly increase and the
//! search stops once one passes the bound. With an inadmissible estimate the
//! result is not guaranteed shortest.
//!
//! The estimate is capped at the moves left before the bound, so `f` never
//! exceeds the bound and the last pass covers every path that fits in it.

use log::{debug, info};

use super::path::PathSet;
use super::{SearchResult, SearchStatus};
use crate::cube::CubeState;
use crate::filter::successors;
use crate::heuristic::Heuristic;
use crate::moves::Move;
use crate::progress::{Halt, Limits, Progress, Session};
use crate::Solver;

#[derive(Debug, Clone, Default)]
pub struct IdaStar {
    pub limits: Limits,
    pub heuristic: Heuristic,
}

impl IdaStar {
    pub fn new(limits: Limits, heuristic: Heuristic) -> Self {
        Self { limits, heuristic }
    }
}

impl Solver for IdaStar {
    fn name(&self) -> &'static str {
        "ida-star"
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
            "{}: {:?} after {} nodes in {} ms",
            self.name(),
            result.status,
            result.nodes_explored,
            result.time_elapsed_ms()
        );
        result
    }
}

impl IdaStar {
    fn search(
        &self,
        session: &mut Session<'_, '_>,
        cube: &CubeState,
        bound: u32,
    ) -> Result<Option<Vec<Move>>, Halt> {
        let mut threshold = self.heuristic.estimate(cube).min(bound);
        while threshold <= bound {
            debug!("threshold {threshold}, {} nodes so far", session.nodes());
            let mut contour = Contour {
                session: &mut *session,
                heuristic: self.heuristic,
                threshold,
                bound,
                path: Vec::new(),
            };
            match contour.descend(&mut PathSet::default(), cube, 0, None)? {
                Descent::Found => return Ok(Some(contour.path)),
                Descent::Exceeded(next) => threshold = next,
                Descent::Exhausted => return Ok(None),
            }
        }
        Ok(None)
    }
}

enum Descent {
    Found,
    /// Smallest `f` that was cut off below this node.
    Exceeded(u32),
    Exhausted,
}

/// One threshold pass.
struct Contour<'a, 'l, 'p> {
    session: &'a mut Session<'l, 'p>,
    heuristic: Heuristic,
    threshold: u32,
    bound: u32,
    path: Vec<Move>,
}

impl Contour<'_, '_, '_> {
    fn descend(
        &mut self,
        on_path: &mut PathSet,
        cube: &CubeState,
        g: u32,
        last: Option<Move>,
    ) -> Result<Descent, Halt> {
        self.session.visit(self.threshold)?;

        let Some(mut entry) = on_path.enter(cube.encode()) else {
            return Ok(Descent::Exhausted);
        };
        let f = g + self.heuristic.estimate(cube).min(self.bound - g);
        if f > self.threshold {
            return Ok(Descent::Exceeded(f));
        }
        if cube.is_solved() {
            return Ok(Descent::Found);
        }
        if g >= self.bound {
            return Ok(Descent::Exhausted);
        }

        let mut next_threshold: Option<u32> = None;
        for mv in successors(last, &Move::ALL) {
            self.path.push(mv);
            match self.descend(&mut entry, &cube.apply(mv), g + 1, Some(mv))? {
                Descent::Found => return Ok(Descent::Found),
                Descent::Exceeded(f) => {
                    next_threshold = Some(next_threshold.map_or(f, |t| t.min(f)));
                }
                Descent::Exhausted => {}
            }
            self.path.pop();
        }
        Ok(next_threshold.map_or(Descent::Exhausted, Descent::Exceeded))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use clap::ValueEnum;

    use super::*;
    use crate::solver::test_support::{assert_solves, limits, random_scrambles, scrambled};

    #[test_log::test]
    fn test_solves_sexy_move() {
        let solver = IdaStar::new(limits(), Heuristic::Combined);
        let cube = scrambled("R U R' U'");
        let result = solver.solve(&cube, 10, None);
        assert_solves(&result, &cube);
        assert!(result.solution.len() <= 10);
    }

    #[test]
    fn test_solves_random_scrambles_with_each_heuristic() {
        for heuristic in Heuristic::value_variants().iter().copied() {
            let solver = IdaStar::new(limits(), heuristic);
            for scramble in random_scrambles(2, 4, 21) {
                let result = solver.solve(&scramble.cube, 10, None);
                assert_solves(&result, &scramble.cube);
            }
        }
    }

    #[test]
    fn test_single_move_is_solved_in_one() {
        let solver = IdaStar::default();
        for mv in Move::ALL {
            let cube = CubeState::solved().apply(mv);
            let result = solver.solve(&cube, 5, None);
            assert_solves(&result, &cube);
            assert_eq!(result.solution, vec![mv.inverse()]);
        }
    }

    #[test]
    fn test_six_move_scrambles_within_tight_bound() {
        // the sticker estimate overshoots on some of these paths
        let solver = IdaStar::new(limits(), Heuristic::Combined);
        for scramble in random_scrambles(6, 3, 2024) {
            let result = solver.solve(&scramble.cube, 6, None);
            assert_solves(&result, &scramble.cube);
            assert!(result.solution.len() <= 6);
        }
    }

    #[test]
    fn test_overestimated_path_still_found() {
        let cube = scrambled("L' R D' U2 L' R'");
        let solver = IdaStar::new(limits(), Heuristic::Combined);
        let result = solver.solve(&cube, 6, None);
        assert_solves(&result, &cube);
        assert!(result.solution.len() <= 6);
    }

    #[test]
    fn test_bound_too_small_exhausts() {
        let solver = IdaStar::new(limits(), Heuristic::Combined);
        let cube = scrambled("R U F L");
        let result = solver.solve(&cube, 0, None);
        assert_eq!(result.status, SearchStatus::Exhausted);
        assert_eq!(result.nodes_explored, 1);

        let result = solver.solve(&cube, 2, None);
        assert_eq!(result.status, SearchStatus::Exhausted);
        assert!(result.solution.is_empty());
    }

    #[test]
    fn test_progress_reports_threshold() {
        let solver = IdaStar::new(
            Limits {
                yield_interval: 25,
                ..limits()
            },
            Heuristic::Combined,
        );
        let cube = scrambled("R U R' U'");
        let mut seen: Vec<Progress> = Vec::new();
        let mut record = |p: &Progress| seen.push(*p);
        let result = solver.solve(&cube, 10, Some(&mut record));
        assert_solves(&result, &cube);

        let root = Heuristic::Combined.estimate(&cube);
        assert!(seen.iter().all(|p| p.depth() >= root && p.phase().is_none()));
        for pair in seen.windows(2) {
            assert!(pair[0].depth() <= pair[1].depth());
        }
    }

    #[test]
    fn test_cancelled_before_start() {
        let solver = IdaStar::new(
            Limits {
                yield_interval: 1,
                cancel: Some(Arc::new(AtomicBool::new(true))),
                ..limits()
            },
            Heuristic::Combined,
        );
        let result = solver.solve(&scrambled("R U F"), 10, None);
        assert_eq!(result.status, SearchStatus::Cancelled);
        assert_eq!(result.nodes_explored, 1);
        assert!(result.solution.is_empty());
    }
}
