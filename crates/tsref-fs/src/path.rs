//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Project directories and generated entries always travel in forward-slash
/// form (that is what ends up inside `tsconfig.json`); conversion to the
/// platform-native format happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortablePath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl PortablePath {
    /// Create a new PortablePath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() || self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }
}

impl AsRef<Path> for PortablePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for PortablePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for PortablePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PortablePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for PortablePath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<PathBuf> for PortablePath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

/// Resolve a forward-slash path into its meaningful components.
///
/// Empty and `.` segments are dropped; `..` pops the previous component
/// unless there is nothing left to pop.
fn normalize_components(path: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if matches!(out.last(), Some(&"..")) || out.is_empty() {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Compute the relative path from one directory to another.
///
/// Both inputs are forward-slash paths rooted at the same base (the
/// repository root). Returns the empty string when the directories are
/// identical, matching Node's `path.relative` for the inputs this tool
/// handles.
pub fn relative_between(from: &PortablePath, to: &PortablePath) -> String {
    let from = normalize_components(from.as_str());
    let to = normalize_components(to.as_str());
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(from.len() - common + to.len() - common);
    for _ in common..from.len() {
        parts.push("..");
    }
    parts.extend(to[common..].iter().copied());
    parts.join("/")
}
