use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file that exists for as long as the show should keep running.
///
/// Another process (or `glowgrid stop`) stops the show by removing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFlag {
    path: PathBuf,
}

impl RunFlag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raise(&self) -> io::Result<()> {
        fs::write(&self.path, "1\n")
    }

    pub fn is_raised(&self) -> bool {
        self.path.exists()
    }

    /// Remove the flag. Lowering a flag that is already down is fine.
    pub fn lower(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}
