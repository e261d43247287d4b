//! Progress reporting, budgets and cooperative suspension.
//!
//! Engines count every node expansion through a [`Session`]. Every
//! `yield_interval` expansions the session suspends: it reports a
//! [`Progress`] snapshot, hands control to the host scheduler hook, and only
//! then checks cancellation and the wall-clock ceiling. A stop is returned as
//! `Err(Halt)`, which engines propagate with `?` so every pending recursive
//! frame unwinds at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::moves::Move;
use crate::solver::{SearchResult, SearchStatus};

/// Default wall-clock ceiling for one solve.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Default number of node expansions between suspensions.
pub const DEFAULT_YIELD_INTERVAL: u64 = 1000;

/// Snapshot emitted periodically while an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Basic {
        depth: u32,
        nodes: u64,
        elapsed_ms: u64,
    },
    /// Emitted by the two-phase engine, tagged with phase 1 or 2.
    Phased {
        phase: u8,
        depth: u32,
        nodes: u64,
        elapsed_ms: u64,
    },
}

impl Progress {
    pub fn depth(&self) -> u32 {
        match *self {
            Progress::Basic { depth, .. } | Progress::Phased { depth, .. } => depth,
        }
    }

    pub fn nodes(&self) -> u64 {
        match *self {
            Progress::Basic { nodes, .. } | Progress::Phased { nodes, .. } => nodes,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        match *self {
            Progress::Basic { elapsed_ms, .. } | Progress::Phased { elapsed_ms, .. } => {
                elapsed_ms
            }
        }
    }

    pub fn phase(&self) -> Option<u8> {
        match *self {
            Progress::Basic { .. } => None,
            Progress::Phased { phase, .. } => Some(phase),
        }
    }
}

/// Time and node budget shared by every engine.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Wall-clock ceiling, checked at each suspension.
    pub time_limit: Duration,
    /// Node expansions between suspensions (treated as at least 1).
    pub yield_interval: u64,
    /// Optional cap on total node expansions, checked at every expansion.
    pub node_limit: Option<u64>,
    /// Optional cancel flag, checked at each suspension.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Host scheduler hook called at each suspension.
    pub yield_now: fn(),
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            node_limit: None,
            cancel: None,
            yield_now: std::thread::yield_now,
        }
    }
}

/// Reason a search stopped before exhausting its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    TimedOut,
    Cancelled,
    NodeLimit,
}

impl From<Halt> for SearchStatus {
    fn from(halt: Halt) -> Self {
        match halt {
            Halt::TimedOut => SearchStatus::TimedOut,
            Halt::Cancelled => SearchStatus::Cancelled,
            Halt::NodeLimit => SearchStatus::NodeLimitReached,
        }
    }
}

/// Bookkeeping for one top-level solve.
pub(crate) struct Session<'l, 'p> {
    limits: &'l Limits,
    started: Instant,
    nodes: u64,
    since_yield: u64,
    phase: Option<u8>,
    on_progress: Option<&'p mut dyn FnMut(&Progress)>,
}

impl<'l, 'p> Session<'l, 'p> {
    pub(crate) fn new(limits: &'l Limits, on_progress: Option<&'p mut dyn FnMut(&Progress)>) -> Self {
        Self {
            limits,
            started: Instant::now(),
            nodes: 0,
            since_yield: 0,
            phase: None,
            on_progress,
        }
    }

    /// Tags subsequent snapshots with `phase`.
    pub(crate) fn enter_phase(&mut self, phase: u8) {
        debug!("entering phase {phase} after {} nodes", self.nodes);
        self.phase = Some(phase);
    }

    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Counts one node expansion, suspending when the interval is reached.
    ///
    /// `depth` is what a snapshot taken here reports.
    #[inline]
    pub(crate) fn visit(&mut self, depth: u32) -> Result<(), Halt> {
        if self.limits.node_limit.is_some_and(|limit| self.nodes >= limit) {
            return Err(Halt::NodeLimit);
        }
        self.nodes += 1;

        self.since_yield += 1;
        if self.since_yield >= self.limits.yield_interval.max(1) {
            self.since_yield = 0;
            self.suspend(depth)?;
        }
        Ok(())
    }

    /// Reports progress, yields to the host, then checks for a stop.
    fn suspend(&mut self, depth: u32) -> Result<(), Halt> {
        let snapshot = self.snapshot(depth);
        if let Some(callback) = self.on_progress.as_mut() {
            callback(&snapshot);
        }

        (self.limits.yield_now)();

        if self
            .limits
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Err(Halt::Cancelled);
        }
        if self.started.elapsed() >= self.limits.time_limit {
            return Err(Halt::TimedOut);
        }
        Ok(())
    }

    fn snapshot(&self, depth: u32) -> Progress {
        let nodes = self.nodes;
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        match self.phase {
            None => Progress::Basic {
                depth,
                nodes,
                elapsed_ms,
            },
            Some(phase) => Progress::Phased {
                phase,
                depth,
                nodes,
                elapsed_ms,
            },
        }
    }

    /// Builds the final record for this solve.
    pub(crate) fn finish(self, status: SearchStatus, solution: Vec<Move>) -> SearchResult {
        SearchResult {
            found: status == SearchStatus::Found,
            solution,
            nodes_explored: self.nodes,
            elapsed: self.started.elapsed(),
            status,
        }
    }

    /// Maps an engine's raw outcome onto a result.
    pub(crate) fn conclude(self, outcome: Result<Option<Vec<Move>>, Halt>) -> SearchResult {
        match outcome {
            Ok(Some(solution)) => self.finish(SearchStatus::Found, solution),
            Ok(None) => self.finish(SearchStatus::Exhausted, Vec::new()),
            Err(halt) => self.finish(halt.into(), Vec::new()),
        }
    }
}
