//! Tick capture and GIF generation for solve visualization

use crate::algorithm::navigator::TickOutcome;
use crate::algorithm::session::MazeSession;
use crate::io::configuration::{
    AGENT_COLOR, ENTRANCE_COLOR, EXIT_COLOR, MARKER_RADIUS, TRUNK_COLOR, VIEWER_MIN_FRAME_DELAY_MS,
    VISITED_COLOR,
};
use crate::io::error::{MazeError, Result};
use crate::io::image::{fill_square, footprint_centre, outline_box, raster_to_image};
use crate::spatial::Cell;
use image::{Frame, RgbaImage};
use std::path::Path;

/// Direction the solver moved in on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Pushed a new cell
    Advance,
    /// Popped back to an earlier cell
    Backtrack,
}

/// Single agent movement during a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    /// Tick the movement happened on
    pub tick: usize,
    /// Pose after the movement
    pub cell: Cell,
    /// Whether the solver advanced or backtracked
    pub kind: TraceKind,
}

/// Captures agent movements for visualization
///
/// Holds a rendering of the maze with both openings marked, then replays the
/// recorded movements on top of it when exporting.
pub struct SolveCapture {
    events: Vec<TraceEvent>,
    base: RgbaImage,
    start: Cell,
    agent_size: i32,
}

impl SolveCapture {
    /// Prepare a capture for the session's maze and current pose
    pub fn new(session: &MazeSession) -> Self {
        let mut base = raster_to_image(session.footprint().free_space().raster());
        fill_square(&mut base, session.entrance(), MARKER_RADIUS, ENTRANCE_COLOR);
        fill_square(&mut base, session.exit(), MARKER_RADIUS, EXIT_COLOR);

        Self {
            events: Vec::new(),
            base,
            start: session.pose(),
            agent_size: session.footprint().size(),
        }
    }

    /// Record a tick outcome; ticks that did not move the agent are ignored
    pub fn record(&mut self, tick: usize, outcome: TickOutcome) {
        let (cell, kind) = match outcome {
            TickOutcome::Advanced(cell) => (cell, TraceKind::Advance),
            TickOutcome::Backtracked(cell) => (cell, TraceKind::Backtrack),
            TickOutcome::Inactive | TickOutcome::Solved(_) | TickOutcome::Stuck => return,
        };
        self.events.push(TraceEvent { tick, cell, kind });
    }

    /// Returns all recorded movements
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Returns the total number of recorded movements
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured movements as a GIF with automatic frame skipping
    ///
    /// Frames faster than viewers can display are merged: with a 20 ms request
    /// and a 50 ms viewer minimum, every third movement becomes a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No movements were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(MazeError::EmptyCapture {
                what: "solver movements",
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| MazeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| MazeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut trail = self.base.clone();
        let mut frames = Vec::new();
        let mut previous = self.start;

        fill_square(
            &mut trail,
            footprint_centre(self.start, self.agent_size),
            1,
            TRUNK_COLOR,
        );
        frames.push(self.render_frame(&trail, self.start, delay_ms));

        for (count, event) in self.events.iter().enumerate() {
            match event.kind {
                TraceKind::Advance => fill_square(
                    &mut trail,
                    footprint_centre(event.cell, self.agent_size),
                    1,
                    TRUNK_COLOR,
                ),
                // The popped cell is the one the agent just left
                TraceKind::Backtrack => fill_square(
                    &mut trail,
                    footprint_centre(previous, self.agent_size),
                    1,
                    VISITED_COLOR,
                ),
            }
            previous = event.cell;

            if (count + 1) % skip_factor == 0 {
                frames.push(self.render_frame(&trail, event.cell, delay_ms));
            }
        }

        if self.events.len() % skip_factor != 0 {
            frames.push(self.render_frame(&trail, previous, delay_ms));
        }

        // Final frame displays longer for better visibility
        let final_frame_delay = delay_ms * 25;
        frames.push(self.render_frame(&trail, previous, final_frame_delay));

        frames
    }

    fn render_frame(&self, trail: &RgbaImage, pose: Cell, delay_ms: u32) -> Frame {
        let mut img = trail.clone();
        outline_box(&mut img, pose, self.agent_size, AGENT_COLOR);
        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
