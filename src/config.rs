//! Configuration and data folder resolution
//!
//! Data folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (ARVOCAB_DATA_DIR)
//! 3. OS-dependent compiled default (fallback)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "arvocab", version, about = "AR vocabulary learning experiment backend")]
pub struct Args {
    /// Data folder holding the database, voice recordings and CSV exports
    #[arg(long, env = "ARVOCAB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Socket address to listen on
    #[arg(long, env = "ARVOCAB_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,
}

/// Resolved on-disk layout of the data folder
#[derive(Debug, Clone)]
pub struct DataFolders {
    pub root: PathBuf,
}

impl DataFolders {
    /// Resolve the data folder from CLI/env (via clap) or the OS default
    pub fn resolve(cli_arg: Option<&Path>) -> Self {
        let root = cli_arg
            .map(Path::to_path_buf)
            .unwrap_or_else(default_data_dir);
        Self { root }
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join("experiment_data.db")
    }

    pub fn recordings_dir(&self) -> PathBuf {
        self.root.join("voice_recordings")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    /// Create the data folder and its subdirectories if missing
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.root, &self.recordings_dir(), &self.export_dir()] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

/// OS-dependent default data folder path
fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/arvocab (or /var/lib/arvocab for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("arvocab"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/arvocab"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("arvocab"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/arvocab"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("arvocab"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\arvocab"))
    } else {
        PathBuf::from("./arvocab_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_takes_priority() {
        let folders = DataFolders::resolve(Some(Path::new("/tmp/arvocab-test")));
        assert_eq!(folders.root, PathBuf::from("/tmp/arvocab-test"));
    }

    #[test]
    fn test_layout_under_root() {
        let folders = DataFolders::resolve(Some(Path::new("/data")));
        assert_eq!(folders.database_path(), PathBuf::from("/data/experiment_data.db"));
        assert_eq!(folders.recordings_dir(), PathBuf::from("/data/voice_recordings"));
        assert_eq!(folders.export_dir(), PathBuf::from("/data/exports"));
    }

    #[test]
    fn test_ensure_directories_creates_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let folders = DataFolders::resolve(Some(&tmp.path().join("nested")));
        folders.ensure_directories().unwrap();
        assert!(folders.recordings_dir().is_dir());
        assert!(folders.export_dir().is_dir());
    }
}
