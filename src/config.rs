//! Solver selection and per-algorithm defaults.

use clap::ValueEnum;

use crate::heuristic::Heuristic;
use crate::progress::Limits;
use crate::solver::{
    Beam, BestFirst, BreadthFirst, IdaStar, IterativeDeepening, TwoPhase, DEFAULT_BEAM_WIDTH,
    DEFAULT_PHASE1_DEPTH, DEFAULT_PHASE2_DEPTH,
};
use crate::Solver;

/// Search engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Algorithm {
    #[default]
    IdaStar,
    BreadthFirst,
    DepthFirst,
    BestFirst,
    Beam,
    TwoPhase,
}

impl Algorithm {
    /// Move bound used when none is given.
    pub const fn default_depth(self) -> u32 {
        match self {
            Algorithm::BreadthFirst => 12,
            Algorithm::DepthFirst => 15,
            Algorithm::IdaStar | Algorithm::BestFirst | Algorithm::Beam => 20,
            Algorithm::TwoPhase => 24,
        }
    }
}

/// Everything needed to build and run one solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    /// Overrides [`Algorithm::default_depth`].
    pub max_depth: Option<u32>,
    pub limits: Limits,
    pub beam_width: usize,
    pub heuristic: Heuristic,
    pub phase1_depth: u32,
    pub phase2_depth: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_depth: None,
            limits: Limits::default(),
            beam_width: DEFAULT_BEAM_WIDTH,
            heuristic: Heuristic::default(),
            phase1_depth: DEFAULT_PHASE1_DEPTH,
            phase2_depth: DEFAULT_PHASE2_DEPTH,
        }
    }
}

impl SolverConfig {
    /// The move bound a solve will use.
    pub fn depth(&self) -> u32 {
        self.max_depth
            .unwrap_or_else(|| self.algorithm.default_depth())
    }

    /// Builds the configured engine.
    pub fn solver(&self) -> Box<dyn Solver> {
        let limits = self.limits.clone();
        match self.algorithm {
            Algorithm::IdaStar => Box::new(IdaStar::new(limits, self.heuristic)),
            Algorithm::BreadthFirst => Box::new(BreadthFirst::new(limits)),
            Algorithm::DepthFirst => Box::new(IterativeDeepening::new(limits)),
            Algorithm::BestFirst => Box::new(BestFirst::new(limits, self.heuristic)),
            Algorithm::Beam => Box::new(Beam {
                limits,
                heuristic: self.heuristic,
                width: self.beam_width,
            }),
            Algorithm::TwoPhase => Box::new(TwoPhase {
                limits,
                phase1_depth: self.phase1_depth,
                phase2_depth: self.phase2_depth,
            }),
        }
    }
}
