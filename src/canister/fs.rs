//! Text file access used by the canister id reader.

use std::io;
use std::path::Path;

/// Minimal "read text at path" capability.
pub trait ReadText {
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ReadText for LocalFs {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<T: ReadText + ?Sized> ReadText for &T {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        (**self).read_text(path)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory `ReadText` for tests.

    use super::ReadText;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Files held in memory; counts every read attempt.
    #[derive(Default)]
    pub struct MemoryFs {
        files: HashMap<PathBuf, String>,
        reads: Cell<usize>,
    }

    impl MemoryFs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
            self.files.insert(path.into(), content.into());
            self
        }

        pub fn reads(&self) -> usize {
            self.reads.get()
        }
    }

    impl ReadText for MemoryFs {
        fn read_text(&self, path: &Path) -> io::Result<String> {
            self.reads.set(self.reads.get() + 1);
            self.files.get(path).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
            })
        }
    }
}
