//! Runtime settings taken from the environment.
//!
//! - `CAT_SPEED`: frame clock speed (see [`crate::clock`])
//! - `CATWALK_LOG`: file to append log output to; logging is off without it

use std::env;
use std::path::PathBuf;

use crate::clock::{self, SPEED_ENV};

/// Environment variable naming the log file
pub const LOG_ENV: &str = "CATWALK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub speed: u32,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: clock::DEFAULT_SPEED,
            log_file: None,
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            speed: clock::parse_speed(lookup(SPEED_ENV).as_deref()),
            log_file: lookup(LOG_ENV)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}
