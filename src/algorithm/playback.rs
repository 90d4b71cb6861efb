//! Tick-driven replay of a recorded path

use crate::algorithm::agent::Agent;
use crate::io::recording::RecordedPath;
use crate::spatial::{Cell, Footprint};
use log::warn;

/// Result of one playback tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStep {
    /// The agent was placed on the next recorded pose
    Moved(Cell),
    /// Every pose has been replayed
    Finished,
    /// The next pose fails the footprint check; playback stops there
    Rejected(Cell),
}

/// Cursor over a recorded path, one pose per tick
#[derive(Clone, Debug)]
pub struct Playback {
    points: Vec<Cell>,
    cursor: usize,
    halted: bool,
}

impl Playback {
    /// Prepare to replay `path` from its first pose
    pub fn new(path: RecordedPath) -> Self {
        Self {
            points: path.into_points(),
            cursor: 0,
            halted: false,
        }
    }

    /// Place the agent on the next pose
    ///
    /// Recorded poses may come from disk, so each one is checked against the
    /// footprint before the agent is moved.
    pub fn tick(&mut self, agent: &mut Agent, footprint: &Footprint) -> PlaybackStep {
        if self.halted {
            return PlaybackStep::Finished;
        }
        let Some(&next) = self.points.get(self.cursor) else {
            return PlaybackStep::Finished;
        };

        if !footprint.is_valid_cell(next) {
            warn!(
                "playback halted at pose {} of {}: {next} is not a valid position",
                self.cursor + 1,
                self.points.len()
            );
            self.halted = true;
            return PlaybackStep::Rejected(next);
        }

        self.cursor += 1;
        agent.teleport_to(next);
        PlaybackStep::Moved(next)
    }

    /// Poses not yet replayed
    pub const fn remaining(&self) -> usize {
        if self.halted {
            0
        } else {
            self.points.len().saturating_sub(self.cursor)
        }
    }

    /// True once every pose was replayed or playback halted
    pub const fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}
