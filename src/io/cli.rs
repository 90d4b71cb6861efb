//! Command-line interface for solving maze images in batch

use crate::algorithm::navigator::SolveState;
use crate::algorithm::session::{MazeSession, NavigatorConfig};
use crate::io::configuration::{
    AGENT_SIZE, CHECK_DEPTH, DEFAULT_MAX_TICKS, DEFAULT_START, EXIT_RANGE, GIF_FRAME_DELAY_MS,
    MIN_OPENING_WIDTH, OUTPUT_SUFFIX, PROGRESS_REFRESH_TICKS, RECORDING_SUFFIX, STEP_SIZE,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_target};
use crate::io::image::{export_solution_png, load_raster};
use crate::io::progress::ProgressManager;
use crate::io::recording::RecordedPath;
use crate::io::visualization::SolveCapture;
use crate::spatial::Cell;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mazenav")]
#[command(
    author,
    version,
    about = "Find the exit of maze images with a footprint-aware depth-first solver"
)]
/// Command-line arguments for the maze solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Agent start column; its pixel color defines open space
    #[arg(short = 'x', long, default_value_t = DEFAULT_START[0], allow_negative_numbers = true)]
    pub start_x: i32,

    /// Agent start row
    #[arg(short = 'y', long, default_value_t = DEFAULT_START[1], allow_negative_numbers = true)]
    pub start_y: i32,

    /// Distance in pixels between solver steps
    #[arg(short, long, default_value_t = STEP_SIZE)]
    pub step: i32,

    /// Edge length of the agent's square footprint
    #[arg(short = 'a', long, default_value_t = AGENT_SIZE)]
    pub agent_size: i32,

    /// Per-axis distance at which the exit counts as reached
    #[arg(short, long, default_value_t = EXIT_RANGE)]
    pub exit_range: i32,

    /// Minimum width of a border opening
    #[arg(long, default_value_t = MIN_OPENING_WIDTH)]
    pub min_opening: usize,

    /// Inward probe depth for border openings
    #[arg(long, default_value_t = CHECK_DEPTH)]
    pub check_depth: usize,

    /// Tick budget per maze
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
    pub max_ticks: usize,

    /// Write an animated GIF of the solve
    #[arg(short, long)]
    pub visualize: bool,

    /// Save the solved path as JSON next to the input
    #[arg(short, long)]
    pub record: bool,

    /// Replay a recorded path instead of solving
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log solver events at info level
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Agent start position
    pub const fn start(&self) -> Cell {
        Cell::new(self.start_x, self.start_y)
    }

    /// Solver parameters from the command line
    pub const fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            step_size: self.step,
            agent_size: self.agent_size,
            exit_range: self.exit_range,
            min_opening_width: self.min_opening,
            check_depth: self.check_depth,
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }
}

/// Orchestrates batch solving of maze images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process mazes according to CLI arguments
    ///
    /// A maze that ends `Stuck` or runs out of ticks is reported and skipped
    /// over; it does not fail the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, maze setup or export fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.navigator_config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_target(target, "target file must be a PNG image"));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(target, "target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(input_path);
        if output_path.exists() {
            info!("skipping '{}' (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_maze(index, input_path, self.cli.max_ticks);
        }

        let raster = load_raster(input_path)?;
        let mut session =
            MazeSession::new(raster, self.cli.start(), self.cli.navigator_config())?;

        let outcome = if let Some(replay) = &self.cli.replay {
            Self::replay(&mut session, replay)?
        } else {
            self.solve(&mut session, input_path, index)?
        };

        match outcome {
            SolveState::Solved => info!(
                "'{}' solved in {} ticks, {:.2} px from exit",
                input_path.display(),
                session.navigator().ticks(),
                session.final_distance().unwrap_or_default()
            ),
            SolveState::Stuck => warn!(
                "'{}' has no reachable exit from {}",
                input_path.display(),
                session.start()
            ),
            SolveState::Solving => warn!(
                "'{}' not solved within {} ticks",
                input_path.display(),
                self.cli.max_ticks
            ),
            SolveState::Idle => {}
        }

        export_solution_png(&session, &Self::output_path(input_path))?;

        if self.cli.record && outcome == SolveState::Solved {
            session
                .solution()
                .save(&Self::sibling_path(input_path, RECORDING_SUFFIX, "json"))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_maze(index, outcome, start_time.elapsed());
        }

        Ok(())
    }

    fn solve(
        &mut self,
        session: &mut MazeSession,
        input_path: &Path,
        index: usize,
    ) -> Result<SolveState> {
        let mut capture = self.cli.visualize.then(|| SolveCapture::new(session));
        let progress = &mut self.progress_manager;

        let outcome = session.run(self.cli.max_ticks, |current, tick_outcome| {
            let ticks = current.navigator().ticks();
            if let Some(capture) = capture.as_mut() {
                capture.record(ticks, tick_outcome);
            }
            if ticks % PROGRESS_REFRESH_TICKS == 0 {
                if let Some(pm) = progress.as_mut() {
                    pm.update_ticks(index, ticks);
                }
            }
        });

        if let Some(capture) = capture.filter(|c| c.event_count() > 0) {
            capture.export_gif(
                &Self::sibling_path(input_path, VISUALIZATION_SUFFIX, "gif"),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        Ok(outcome)
    }

    fn replay(session: &mut MazeSession, recording: &Path) -> Result<SolveState> {
        let path = RecordedPath::load(recording)?;
        let expected = path.len();
        if session.start_playback(path) {
            let mut replayed = 0;
            while session.tick_playback() {
                replayed += 1;
            }
            info!(
                "replayed {replayed} of {expected} poses, agent at {}",
                session.pose()
            );
        }
        Ok(SolveState::Idle)
    }

    fn output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Outputs of earlier runs sit next to the inputs
fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
