//! File existence checks used while resolving rule and baseline files.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Answers whether a path can be opened for reading.
pub trait FileProbe {
    fn is_readable(&self, path: &Path) -> bool;

    /// First candidate that is readable, in list order.
    fn first_readable<'a>(&self, candidates: &'a [PathBuf]) -> Option<&'a PathBuf> {
        candidates.iter().find(|candidate| self.is_readable(candidate))
    }
}

/// Probe backed by the real filesystem. Relative paths resolve against the
/// current working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_readable(&self, path: &Path) -> bool {
        File::open(path).is_ok()
    }
}

/// Probe over a fixed set of paths, for callers that already know what exists.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    present: HashSet<PathBuf>,
}

impl StaticProbe {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            present: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileProbe for StaticProbe {
    fn is_readable(&self, path: &Path) -> bool {
        self.present.contains(path)
    }
}
