//! Source file handles shared by tokens.

use std::path::{Path, PathBuf};

/// A source file reference.
///
/// Tokens hold these behind an `Arc` so every node of the tree can name the
/// file it came from without copying the path around.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile { path: path.into() }
    }

    /// Full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as a displayable string, for diagnostics.
    pub fn path_string(&self) -> String {
        self.path.display().to_string()
    }

    /// File name without directories.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_accessors() {
        let file = SourceFile::new("src/main.qul");
        assert_eq!(file.path_string(), "src/main.qul");
        assert_eq!(file.name(), "main.qul");
    }
}
