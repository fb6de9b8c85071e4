/// Runtime configuration, resolved from the environment.
///
/// `RABBIT_SHOOTER_SCORE_FILE` and `RABBIT_SHOOTER_LOG_FILE` override the
/// default locations; `RUST_LOG` is read by the logger itself.

use std::path::PathBuf;

use crate::highscore;

pub const SCORE_FILE_VAR: &str = "RABBIT_SHOOTER_SCORE_FILE";
pub const LOG_FILE_VAR: &str = "RABBIT_SHOOTER_LOG_FILE";
pub const DEFAULT_LOG_FILE_NAME: &str = ".rabbit_shooter.log";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub score_file: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary key lookup.  Unset or blank values fall
    /// back to files in the home directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        let score_file = get(SCORE_FILE_VAR).unwrap_or_else(highscore::default_path);
        let log_file = get(LOG_FILE_VAR).unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_LOG_FILE_NAME)
        });
        Config {
            score_file,
            log_file,
        }
    }
}
