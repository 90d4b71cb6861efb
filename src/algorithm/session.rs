//! Engine façade tying the raster, agent, solver and playback together
//!
//! One session owns one agent. At most one activity (solving or playback)
//! drives the agent at a time, and manual moves are refused while either is
//! active so the pose never has two writers.

use crate::algorithm::agent::Agent;
use crate::algorithm::navigator::{Navigator, NavigatorParams, SolveState, TickOutcome};
use crate::algorithm::openings::{MazeEndpoints, OpeningDetector};
use crate::algorithm::playback::{Playback, PlaybackStep};
use crate::io::configuration::{
    AGENT_SIZE, CHECK_DEPTH, EXIT_RANGE, MAX_GEOMETRY_PX, MIN_OPENING_WIDTH, STEP_SIZE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::recording::RecordedPath;
use crate::spatial::{Cell, Direction, Footprint, FreeSpace, Raster};
use log::{debug, info};

/// Tunable parameters for a navigation session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Distance in pixels between step-grid cells
    pub step_size: i32,
    /// Edge length of the agent's square footprint
    pub agent_size: i32,
    /// Per-axis distance at which the exit counts as reached
    pub exit_range: i32,
    /// Minimum width of a border opening
    pub min_opening_width: usize,
    /// Inward probe depth for border openings
    pub check_depth: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            step_size: STEP_SIZE,
            agent_size: AGENT_SIZE,
            exit_range: EXIT_RANGE,
            min_opening_width: MIN_OPENING_WIDTH,
            check_depth: CHECK_DEPTH,
        }
    }
}

impl NavigatorConfig {
    /// Check every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first non-positive parameter, or
    /// the first pixel distance above [`MAX_GEOMETRY_PX`]
    pub fn validate(&self) -> Result<()> {
        let signed = [
            ("step_size", self.step_size),
            ("agent_size", self.agent_size),
            ("exit_range", self.exit_range),
        ];
        for (name, value) in signed {
            if value <= 0 {
                return Err(invalid_parameter(name, &value, &"must be positive"));
            }
            if value > MAX_GEOMETRY_PX {
                return Err(invalid_parameter(
                    name,
                    &value,
                    &format!("must be at most {MAX_GEOMETRY_PX}"),
                ));
            }
        }

        let unsigned = [
            ("min_opening_width", self.min_opening_width),
            ("check_depth", self.check_depth),
        ];
        for (name, value) in unsigned {
            if value == 0 {
                return Err(invalid_parameter(name, &value, &"must be positive"));
            }
        }

        Ok(())
    }
}

/// A maze, its resolved openings and the agent navigating it
#[derive(Debug, Clone)]
pub struct MazeSession {
    config: NavigatorConfig,
    footprint: Footprint,
    endpoints: MazeEndpoints,
    start: Cell,
    agent: Agent,
    navigator: Navigator,
    recording: Option<RecordedPath>,
    playback: Option<Playback>,
}

impl MazeSession {
    /// Prime the free-space oracle at `start`, resolve the exit and place the agent
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A configuration parameter is invalid
    /// - `start` lies outside the raster or the footprint does not fit there
    /// - Fewer than two border openings are found
    pub fn new(raster: Raster, start: Cell, config: NavigatorConfig) -> Result<Self> {
        config.validate()?;

        let free_space = FreeSpace::sampled_at(raster, start)?;
        debug!(
            "traversable color {:?} sampled at {start}",
            free_space.traversable_color()
        );

        let detector = OpeningDetector::new(config.min_opening_width, config.check_depth);
        let endpoints = detector.endpoints(&free_space, start)?;

        let footprint = Footprint::new(free_space, config.agent_size);
        let agent = Agent::placed(start, config.step_size, &footprint)?;
        let navigator = Navigator::new(NavigatorParams {
            step: config.step_size,
            exit_range: config.exit_range,
        });

        Ok(Self {
            config,
            footprint,
            endpoints,
            start,
            agent,
            navigator,
            recording: None,
            playback: None,
        })
    }

    /// Session with default parameters
    ///
    /// # Errors
    ///
    /// See [`Self::new`]
    pub fn with_defaults(raster: Raster, start: Cell) -> Result<Self> {
        Self::new(raster, start, NavigatorConfig::default())
    }

    /// Agent pose for rendering
    pub const fn pose(&self) -> Cell {
        self.agent.pose()
    }

    /// Where the agent was first placed
    pub const fn start(&self) -> Cell {
        self.start
    }

    /// Solve state
    pub const fn state(&self) -> SolveState {
        self.navigator.state()
    }

    /// Exit point targeted by the solver
    pub const fn exit(&self) -> Cell {
        self.endpoints.exit.point
    }

    /// Entrance point nearest the start
    pub const fn entrance(&self) -> Cell {
        self.endpoints.entrance.point
    }

    /// Both resolved openings
    pub const fn endpoints(&self) -> &MazeEndpoints {
        &self.endpoints
    }

    /// Collision checker for the agent footprint
    pub const fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Solver internals for diagnostics
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Parameters the session was built with
    pub const fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Distance from the exact exit point once solved
    pub const fn final_distance(&self) -> Option<f64> {
        self.navigator.final_distance()
    }

    /// True if the footprint fits at `(x, y)`
    pub fn is_valid_move(&self, x: i32, y: i32) -> bool {
        self.footprint.is_valid_move(x, y)
    }

    /// True while a solve run or playback drives the agent
    pub fn is_busy(&self) -> bool {
        self.navigator.state() == SolveState::Solving || self.playback.is_some()
    }

    /// Start solving from the current pose
    ///
    /// Returns `false` without touching any state if a run or playback is
    /// already active, or if the last run has not been reset.
    pub fn start_solve(&mut self) -> bool {
        if self.playback.is_some() {
            debug!("solve request ignored during playback");
            return false;
        }
        self.navigator
            .start(&self.agent, &self.footprint, self.endpoints.exit.point)
    }

    /// Advance the active solve run by one tick
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.navigator.tick(&mut self.agent, &self.footprint);
        if let TickOutcome::Advanced(cell) | TickOutcome::Backtracked(cell) = outcome {
            self.record(cell);
        }
        outcome
    }

    /// Tick until the run ends or `max_ticks` is spent, reporting every tick
    ///
    /// Starts a run first if the session is idle. Returns the state reached;
    /// `Solving` means the budget ran out.
    pub fn run(
        &mut self,
        max_ticks: usize,
        mut on_tick: impl FnMut(&Self, TickOutcome),
    ) -> SolveState {
        if self.state() == SolveState::Idle {
            self.start_solve();
        }
        for _ in 0..max_ticks {
            if self.state() != SolveState::Solving {
                break;
            }
            let outcome = self.tick();
            on_tick(self, outcome);
        }
        self.state()
    }

    /// Return the solver to `Idle`, abandoning an active run
    pub fn reset_solve(&mut self) {
        self.navigator.reset();
    }

    /// Move the agent by whole steps
    ///
    /// Refused while busy. Invalid destinations leave the pose unchanged and
    /// return `false`.
    pub fn move_agent(&mut self, dx_steps: i32, dy_steps: i32) -> bool {
        if self.is_busy() {
            debug!("manual move refused while busy");
            return false;
        }
        let moved = self.agent.move_steps(dx_steps, dy_steps, &self.footprint);
        if moved {
            self.record(self.agent.pose());
        }
        moved
    }

    /// Move the agent one step in `direction`
    pub fn move_in(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        self.move_agent(dx, dy)
    }

    /// Begin recording from the current pose, discarding any earlier recording
    pub fn start_recording(&mut self) {
        let mut recording = RecordedPath::new();
        recording.push(self.agent.pose());
        self.recording = Some(recording);
    }

    /// Stop recording and hand back what was recorded
    pub const fn stop_recording(&mut self) -> Option<RecordedPath> {
        self.recording.take()
    }

    /// True while poses are being recorded
    pub const fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    fn record(&mut self, cell: Cell) {
        if let Some(recording) = &mut self.recording {
            recording.push(cell);
        }
    }

    /// Current path stack as a recording; after `Solved` this is the found path
    pub fn solution(&self) -> RecordedPath {
        self.navigator.path().iter().copied().collect()
    }

    /// Replay `path` one pose per [`Self::tick_playback`]
    ///
    /// Refused while busy or when `path` is empty.
    pub fn start_playback(&mut self, path: RecordedPath) -> bool {
        if self.is_busy() || path.is_empty() {
            debug!("playback request refused");
            return false;
        }
        info!("replaying {} recorded poses", path.len());
        self.playback = Some(Playback::new(path));
        true
    }

    /// Advance playback by one pose
    ///
    /// Returns `true` if the agent moved; `false` once playback has ended.
    pub fn tick_playback(&mut self) -> bool {
        let Some(playback) = &mut self.playback else {
            return false;
        };
        match playback.tick(&mut self.agent, &self.footprint) {
            PlaybackStep::Moved(_) => true,
            PlaybackStep::Finished | PlaybackStep::Rejected(_) => {
                self.playback = None;
                false
            }
        }
    }

    /// True while a playback is active
    pub const fn is_playing_back(&self) -> bool {
        self.playback.is_some()
    }
}
