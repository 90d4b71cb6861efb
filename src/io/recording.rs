//! Ordered agent poses and their JSON persistence

use crate::io::error::{MazeError, Result};
use crate::spatial::Cell;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sequence of poses in the order the agent took them
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPath {
    points: Vec<Cell>,
}

impl RecordedPath {
    /// Empty recording
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Recording seeded with existing points
    pub const fn from_points(points: Vec<Cell>) -> Self {
        Self { points }
    }

    /// Append a pose
    pub fn push(&mut self, point: Cell) {
        self.points.push(point);
    }

    /// Recorded poses in order
    pub fn points(&self) -> &[Cell] {
        &self.points
    }

    /// Number of recorded poses
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// True if nothing has been recorded
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the recording and return its poses
    pub fn into_points(self) -> Vec<Cell> {
        self.points
    }

    /// Write the recording as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The recording cannot be encoded
    /// - The parent directory cannot be created
    /// - The file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| MazeError::Serialization {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        std::fs::write(path, json).map_err(|e| MazeError::FileSystem {
            path: path.to_path_buf(),
            operation: "write recording",
            source: e,
        })?;

        log::info!("saved {} recorded poses to '{}'", self.len(), path.display());
        Ok(())
    }

    /// Read a recording written by [`Self::save`]
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The contents are not a valid recording
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| MazeError::FileSystem {
            path: path.to_path_buf(),
            operation: "read recording",
            source: e,
        })?;

        let recording: Self =
            serde_json::from_str(&json).map_err(|e| MazeError::Serialization {
                path: path.to_path_buf(),
                source: e,
            })?;

        log::info!(
            "loaded {} recorded poses from '{}'",
            recording.len(),
            path.display()
        );
        Ok(recording)
    }
}

impl FromIterator<Cell> for RecordedPath {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}
