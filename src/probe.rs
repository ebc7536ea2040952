//! Filesystem type probes
//!
//! The matching engine never walks or mutates the filesystem itself; the only
//! filesystem question it ever asks is "is this path a file or a directory?".
//! That question is behind the [`TypeProbe`] trait so tests (and hosts with
//! virtual file trees) can answer it without touching disk.

use std::sync::Arc;

/// Capability for classifying a path as a file or a directory.
///
/// A probe must be infallible: when the type cannot be determined (the path
/// does not exist, permission was denied, the entry was deleted between
/// discovery and the check), both methods return `false` and the engine
/// treats the path as having unknown type. Probes must never panic or block
/// indefinitely.
pub trait TypeProbe: Send + Sync {
    fn is_file(&self, path: &str) -> bool;
    fn is_dir(&self, path: &str) -> bool;
}

/// Probe backed by `std::fs::metadata`.
///
/// Symlinks are followed, so a link to a directory counts as a directory. Any
/// stat failure degrades to "neither".
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl DiskProbe {
    /// Shared handle for injecting the default probe.
    pub fn shared() -> Arc<dyn TypeProbe> {
        Arc::new(DiskProbe)
    }
}

impl TypeProbe for DiskProbe {
    fn is_file(&self, path: &str) -> bool {
        std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    fn is_dir(&self, path: &str) -> bool {
        std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}

/// In-memory probe for unit tests; answers from fixed file/dir sets.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryProbe {
    files: std::collections::HashSet<String>,
    dirs: std::collections::HashSet<String>,
}

#[cfg(test)]
impl MemoryProbe {
    pub(crate) fn new(files: &[&str], dirs: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            files: files.iter().map(|s| s.to_string()).collect(),
            dirs: dirs.iter().map(|s| s.to_string()).collect(),
        })
    }
}

#[cfg(test)]
impl TypeProbe for MemoryProbe {
    fn is_file(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_disk_probe_classifies_entries() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("note.txt");
        std::fs::write(&file, "x").unwrap();

        let probe = DiskProbe;
        assert!(probe.is_file(file.to_str().unwrap()));
        assert!(!probe.is_dir(file.to_str().unwrap()));
        assert!(probe.is_dir(temp_dir.path().to_str().unwrap()));
        assert!(!probe.is_file(temp_dir.path().to_str().unwrap()));
    }

    #[test]
    fn test_disk_probe_degrades_on_missing_path() {
        let probe = DiskProbe;
        assert!(!probe.is_file("/definitely/not/a/real/path.txt"));
        assert!(!probe.is_dir("/definitely/not/a/real/path.txt"));
    }
}
