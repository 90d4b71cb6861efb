//! Depth-first maze solving as an explicit tick-driven state machine
//!
//! The navigator keeps a visited set and a path stack over the step grid
//! anchored at the agent's pose when solving starts. Every tick does one
//! neighbour scan: advance to the first unvisited valid neighbour in the fixed
//! order up, right, down, left, or pop the current cell and step back to the
//! new top of the stack. There is no heuristic and no optimality guarantee.

use crate::algorithm::agent::Agent;
use crate::spatial::{Cell, Direction, Footprint, StepGrid, VisitedSet};
use log::{debug, info, warn};
use std::fmt;

/// Lifecycle of a solve run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolveState {
    /// No run active
    #[default]
    Idle,
    /// A run is active and advances on every tick
    Solving,
    /// The agent came within range of the exit
    Solved,
    /// The path stack emptied without reaching the exit
    Stuck,
}

impl SolveState {
    /// True for `Solved` and `Stuck`
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Stuck)
    }
}

impl fmt::Display for SolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Solving => "solving",
            Self::Solved => "solved",
            Self::Stuck => "stuck",
        };
        f.write_str(name)
    }
}

/// What a single tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// No run is active; nothing happened
    Inactive,
    /// Pushed a new cell and moved the agent onto it
    Advanced(Cell),
    /// Popped a dead end and moved the agent back to the new top of stack
    Backtracked(Cell),
    /// Within exit range; carries the straight-line distance to the exit point
    Solved(f64),
    /// Popped the last cell without reaching the exit
    Stuck,
}

/// Parameters the navigator steps with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigatorParams {
    /// Distance between neighbouring cells
    pub step: i32,
    /// Per-axis threshold for reaching the exit
    pub exit_range: i32,
}

/// DFS navigator owning the visited set and path stack of one run
#[derive(Debug, Clone)]
pub struct Navigator {
    params: NavigatorParams,
    state: SolveState,
    visited: Option<VisitedSet>,
    path: Vec<Cell>,
    target: Option<Cell>,
    ticks: usize,
    backtracks: usize,
    final_distance: Option<f64>,
}

impl Navigator {
    /// Create an idle navigator
    pub const fn new(params: NavigatorParams) -> Self {
        Self {
            params,
            state: SolveState::Idle,
            visited: None,
            path: Vec::new(),
            target: None,
            ticks: 0,
            backtracks: 0,
            final_distance: None,
        }
    }

    /// Begin a run from the agent's current pose towards `exit`
    ///
    /// Only an idle navigator starts; any other state leaves everything
    /// untouched and returns `false`.
    pub fn start(&mut self, agent: &Agent, footprint: &Footprint, exit: Cell) -> bool {
        if self.state != SolveState::Idle {
            debug!("solve request ignored while {}", self.state);
            return false;
        }

        let origin = agent.pose();
        let free_space = footprint.free_space();
        let grid = StepGrid::new(
            origin,
            self.params.step,
            free_space.width(),
            free_space.height(),
        );

        // Reuse the bitset when the lattice is unchanged
        match &mut self.visited {
            Some(visited) if *visited.grid() == grid => visited.clear(),
            slot => *slot = Some(VisitedSet::new(grid)),
        }
        if let Some(visited) = &mut self.visited {
            visited.insert(origin);
        }

        self.path.clear();
        self.path.push(origin);
        self.target = Some(exit);
        self.ticks = 0;
        self.backtracks = 0;
        self.final_distance = None;
        self.state = SolveState::Solving;

        info!("solving from {origin} towards exit {exit}");
        true
    }

    /// Advance the run by one tick
    pub fn tick(&mut self, agent: &mut Agent, footprint: &Footprint) -> TickOutcome {
        if self.state != SolveState::Solving {
            return TickOutcome::Inactive;
        }
        let Some(target) = self.target else {
            return TickOutcome::Inactive;
        };

        self.ticks += 1;
        let pose = agent.pose();
        if pose.within_axis_range(target, self.params.exit_range) {
            let distance = pose.distance(target);
            self.state = SolveState::Solved;
            self.final_distance = Some(distance);
            info!(
                "solved after {} ticks ({} backtracks), {distance:.2} px from exit",
                self.ticks, self.backtracks
            );
            return TickOutcome::Solved(distance);
        }

        self.step(agent, footprint)
    }

    /// One DFS step from the top of the path stack
    pub fn step(&mut self, agent: &mut Agent, footprint: &Footprint) -> TickOutcome {
        let Some(&current) = self.path.last() else {
            return self.give_up();
        };

        let step = self.params.step;
        let visited = self.visited.as_ref();
        let next = Direction::ALL
            .iter()
            .filter_map(|direction| direction.neighbour(current, step))
            .find(|candidate| {
                footprint.is_valid_cell(*candidate)
                    && !visited.is_some_and(|set| set.contains(*candidate))
            });

        if let Some(next) = next {
            self.path.push(next);
            if let Some(visited) = &mut self.visited {
                visited.insert(next);
            }
            agent.teleport_to(next);
            return TickOutcome::Advanced(next);
        }

        self.path.pop();
        self.backtracks += 1;
        debug!("dead end at {current}, backtracking");
        match self.path.last() {
            Some(&top) => {
                agent.teleport_to(top);
                TickOutcome::Backtracked(top)
            }
            None => self.give_up(),
        }
    }

    fn give_up(&mut self) -> TickOutcome {
        self.state = SolveState::Stuck;
        warn!(
            "path stack exhausted after {} ticks without reaching the exit",
            self.ticks
        );
        TickOutcome::Stuck
    }

    /// Return to `Idle`, abandoning any active run
    pub fn reset(&mut self) {
        if self.state == SolveState::Solving {
            debug!("abandoning active solve run");
        }
        self.state = SolveState::Idle;
        self.path.clear();
        if let Some(visited) = &mut self.visited {
            visited.clear();
        }
        self.target = None;
        self.ticks = 0;
        self.backtracks = 0;
        self.final_distance = None;
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolveState {
        self.state
    }

    /// Path stack from start to the agent's cell
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Cells visited during the current or last run
    pub const fn visited(&self) -> Option<&VisitedSet> {
        self.visited.as_ref()
    }

    /// Exit point of the current or last run
    pub const fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Ticks spent in the current or last run
    pub const fn ticks(&self) -> usize {
        self.ticks
    }

    /// Cells popped off the path stack so far
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Distance to the exact exit point once solved
    pub const fn final_distance(&self) -> Option<f64> {
        self.final_distance
    }

    /// Step parameters
    pub const fn params(&self) -> NavigatorParams {
        self.params
    }
}
