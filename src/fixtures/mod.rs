//! Fixtures
//!
//! YAML descriptions of timers whose windows are given relative to a reference
//! instant, used for seeding demo shops and in tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use thiserror::Error;

use crate::timers::{Timer, TimerError};

pub mod timers;

pub use timers::{TimerEntry, TimersFixture};

/// Default directory holding fixture sets
pub const DEFAULT_BASE_PATH: &str = "./fixtures";

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Offset that is not a valid duration, or that leaves the supported range
    #[error("Invalid offset for timer {timer:?}: {value:?}")]
    Offset {
        /// Fixture key of the timer
        timer: String,

        /// Rejected offset
        value: String,
    },

    /// Timer failed validation
    #[error("Invalid timer {timer:?}: {source}")]
    Timer {
        /// Fixture key of the timer
        timer: String,

        /// Validation failure
        source: TimerError,
    },
}

/// Loader for timer fixture sets stored as `<base>/timers/<name>.yml`
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a loader rooted at [`DEFAULT_BASE_PATH`]
    pub fn new() -> Self {
        Self::with_base_path(DEFAULT_BASE_PATH)
    }

    /// Create a loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a named timer set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_timers(&self, name: &str) -> Result<TimersFixture, FixtureError> {
        TimersFixture::from_path(self.base_path.join("timers").join(format!("{name}.yml")))
    }

    /// Load a named timer set and build its timers relative to `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a timer
    /// is invalid.
    pub fn timers(&self, name: &str, reference: Timestamp) -> Result<Vec<Timer>, FixtureError> {
        self.load_timers(name)?.into_timers(reference)
    }
}

impl TimersFixture {
    /// Read a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Parse fixture YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe a timer set.
    pub fn parse(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }
}
