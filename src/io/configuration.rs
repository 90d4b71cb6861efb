//! Navigation constants and runtime configuration defaults

// Opening detection
/// Minimum run of traversable border pixels that counts as an opening
pub const MIN_OPENING_WIDTH: usize = 5;
/// How far inward from the border a run is probed for connection to the maze body
pub const CHECK_DEPTH: usize = 5;
/// Number of openings needed to resolve an entrance and an exit
pub const REQUIRED_OPENINGS: usize = 2;

// Agent and step grid
/// Distance in pixels between neighbouring step-grid cells
pub const STEP_SIZE: i32 = 10;
/// Edge length of the agent's square collision footprint
pub const AGENT_SIZE: i32 = 10;
/// Per-axis distance below which the agent counts as having reached the exit
pub const EXIT_RANGE: i32 = 35;
/// Upper bound for step size, agent size and exit range, in pixels
pub const MAX_GEOMETRY_PX: i32 = 65_535;

// Default values for configurable parameters
/// Start pose `[x, y]` used when none is given
pub const DEFAULT_START: [i32; 2] = [10, 260];
/// Tick budget for a single solve run
pub const DEFAULT_MAX_TICKS: usize = 100_000;

// Output settings
/// Suffix added to solved maze filenames
pub const OUTPUT_SUFFIX: &str = "_solved";
/// Suffix added to solve animation filenames
pub const VISUALIZATION_SUFFIX: &str = "_solve";
/// Suffix added to recorded path filenames
pub const RECORDING_SUFFIX: &str = "_path";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

// Overlay colors
/// Cells the solver visited and later abandoned
pub const VISITED_COLOR: [u8; 4] = [255, 190, 120, 255];
/// Cells on the current trunk from start to agent
pub const TRUNK_COLOR: [u8; 4] = [40, 110, 230, 255];
/// Agent footprint outline
pub const AGENT_COLOR: [u8; 4] = [20, 20, 160, 255];
/// Entrance marker
pub const ENTRANCE_COLOR: [u8; 4] = [30, 170, 60, 255];
/// Exit marker
pub const EXIT_COLOR: [u8; 4] = [220, 40, 40, 255];
/// Half edge of the square markers drawn at openings
pub const MARKER_RADIUS: i32 = 3;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Ticks between progress display refreshes
pub const PROGRESS_REFRESH_TICKS: usize = 64;
