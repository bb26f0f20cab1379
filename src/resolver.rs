use crate::error::{FuseError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads the contents of a file at the given path
///
/// # Errors
///
/// - `FuseError::FileNotFound` if the path doesn't exist or isn't a file.
/// - `FuseError::Read` if the file exists but can't be read as UTF-8 text.
pub fn read_file_contents(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(FuseError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|source| FuseError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Locates included files across an ordered search path
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    search_path: Vec<PathBuf>,
}

impl Resolver {
    #[must_use]
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    /// Resolves `reference` as written in a file living in `including_dir`.
    ///
    /// The including directory is tried first, then each search directory
    /// in order. The first candidate that exists wins.
    #[must_use]
    pub fn resolve(&self, reference: &str, including_dir: &Path) -> Option<PathBuf> {
        std::iter::once(including_dir)
            .chain(self.search_path.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(reference))
            .find(|candidate| candidate.exists())
    }
}
