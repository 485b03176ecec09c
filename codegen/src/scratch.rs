use crate::error::Error;
use log::debug;
use rand::Rng;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Temporary paths handed out during one run. Nothing is removed until the manager is cleaned up
/// or dropped, at which point every path still existing is deleted.
pub struct ScratchFiles {
    dir: PathBuf,
    paths: Mutex<Vec<PathBuf>>,
}

impl ScratchFiles {
    pub fn new() -> ScratchFiles {
        ScratchFiles {
            dir: std::env::temp_dir(),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// Returns a fresh path ending in `extension`. The file itself is not created.
    pub fn allocate(&self, extension: &str) -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |time| time.as_millis());
        let pid = std::process::id();
        let mut paths = self.paths.lock().unwrap();
        loop {
            let token: u64 = rand::thread_rng().gen();
            let path = self
                .dir
                .join(format!("{timestamp}-{pid}-{token:016x}{extension}"));
            if !paths.contains(&path) && !path.exists() {
                paths.push(path.clone());
                return path;
            }
        }
    }

    /// Allocates a path and creates it as a directory.
    pub fn allocate_dir(&self, suffix: &str) -> Result<PathBuf, Error> {
        let path = self.allocate(suffix);
        std::fs::create_dir(&path).map_err(Error::io(&path))?;
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.paths.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deletes everything allocated so far, ignoring failures.
    pub fn cleanup(&self) {
        let mut paths = self.paths.lock().unwrap();
        for path in paths.drain(..) {
            let removed = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            if removed.is_ok() {
                debug!("removed scratch file {}", path.display());
            }
        }
    }
}

impl Default for ScratchFiles {
    fn default() -> ScratchFiles {
        ScratchFiles::new()
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_distinct() {
        let scratch = ScratchFiles::new();
        let paths: HashSet<PathBuf> = (0..1000).map(|_| scratch.allocate(".cso")).collect();
        assert_eq!(paths.len(), 1000);
        assert_eq!(scratch.len(), 1000);
        for path in &paths {
            assert_eq!(path.parent().unwrap(), std::env::temp_dir());
            assert!(path.to_string_lossy().ends_with(".cso"));
            assert!(path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .contains(&format!("-{}-", std::process::id())));
        }
    }

    #[test]
    fn files_survive_until_cleanup() {
        let scratch = ScratchFiles::new();
        let file = scratch.allocate(".spv");
        std::fs::write(&file, [1, 2, 3]).unwrap();
        let dir = scratch.allocate_dir("-dir").unwrap();
        std::fs::write(dir.join("inner"), b"x").unwrap();
        let never_written = scratch.allocate(".json");
        assert!(file.exists());

        scratch.cleanup();
        assert!(!file.exists());
        assert!(!dir.exists());
        assert!(!never_written.exists());
        assert!(scratch.is_empty());
    }

    #[test]
    fn drop_removes_files() {
        let file = {
            let scratch = ScratchFiles::new();
            let file = scratch.allocate(".cso");
            std::fs::write(&file, b"bytes").unwrap();
            file
        };
        assert!(!file.exists());
    }
}
