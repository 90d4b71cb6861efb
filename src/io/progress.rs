//! Multi-maze progress tracking with automatic batching for large sets

use crate::algorithm::navigator::SolveState;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Display state of one maze: (`name`, `ticks`, `tick_budget`, `status`)
type MazeStatus = (String, usize, usize, String);

/// Coordinates progress display for batch solving
///
/// Shows one bar per maze for small batches and adds a batch bar when the
/// number of mazes exceeds what fits on screen. Bars track ticks spent
/// against the tick budget.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    maze_bars: Vec<ProgressBar>,
    maze_count: usize,
    maze_states: Vec<MazeStatus>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Mazes: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            maze_bars: Vec::new(),
            maze_count: 0,
            maze_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on maze count
    pub fn initialize(&mut self, maze_count: usize) {
        self.maze_count = maze_count;

        // Switch to batch mode for large sets to avoid terminal spam
        if maze_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(maze_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = maze_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.maze_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress display for a new maze
    pub fn start_maze(&mut self, index: usize, path: &Path, tick_budget: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.maze_states.len() {
            self.maze_states
                .resize(index + 1, (String::new(), 0, 0, String::new()));
        }
        if let Some(state) = self.maze_states.get_mut(index) {
            *state = (display_name, 0, tick_budget, SolveState::Solving.to_string());
        }
        self.update_bars();
    }

    /// Report ticks spent so far
    pub fn update_ticks(&mut self, index: usize, ticks: usize) {
        if let Some(state) = self.maze_states.get_mut(index) {
            state.1 = ticks;
        }
        self.update_bars();
    }

    /// Mark a maze finished with the state it ended in
    pub fn complete_maze(&mut self, index: usize, outcome: SolveState, _elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.maze_states.get_mut(index) {
            let mark = if outcome == SolveState::Solved { "✓" } else { "✗" };
            state.0 = format!("{mark} {}", state.0);
            state.2 = state.1.max(1);
            state.3 = outcome.to_string();
        }
        self.update_bars();
    }

    /// Number of mazes the display was initialized for
    pub const fn maze_count(&self) -> usize {
        self.maze_count
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All mazes processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active mazes
    fn update_bars(&self) {
        let active: Vec<&MazeStatus> = self
            .maze_states
            .iter()
            .filter(|(name, ..)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, ticks, budget, status)) in visible.iter().enumerate() {
            if let Some(bar) = self.maze_bars.get(bar_idx) {
                bar.set_length(*budget as u64);
                bar.set_position(*ticks as u64);
                bar.set_message(format!("{status:>7} {ticks:>7}"));
                bar.set_prefix(name.clone());
            }
        }

        for bar_idx in visible.len()..self.maze_bars.len() {
            if let Some(bar) = self.maze_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
