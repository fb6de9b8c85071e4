/// High-score persistence.
///
/// The record is a single decimal integer in a text file.  Both directions
/// are best-effort: a missing or garbled file reads as 0 and a failed write
/// only costs the record on disk, never the running session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = ".rabbit_shooter_score";

/// Where the session reads its starting record and writes new ones.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// `$HOME/.rabbit_shooter_score`, or the working directory without a home.
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_FILE_NAME)
}

#[derive(Clone, Debug)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, score.to_string())
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no high score at {}", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("cannot read high score {}: {}", self.path.display(), e);
                return 0;
            }
        };
        match text.trim().parse() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("ignoring malformed high score {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(e) = self.write(score) {
            log::warn!("cannot save high score {}: {}", self.path.display(), e);
        }
    }
}
