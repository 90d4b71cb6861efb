/// Agent pose model and validated movement
pub mod agent;
/// Depth-first solving state machine
pub mod navigator;
/// Border opening detection and entrance/exit resolution
pub mod openings;
/// Replay of recorded paths
pub mod playback;
/// Session façade enforcing one active driver per agent
pub mod session;
