//! Size-based log rotation
//!
//! The active file `dir/stem.ext` is renamed to `dir/stem.YYYYmmdd_HHMMSS.ext`
//! (with a `_N` suffix when that name is taken), optionally gzipped, and the
//! oldest rotated files beyond `max_files` are deleted.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::Zoned;

use super::compression::compress_file;
use super::config::RotationConfig;
use super::error::LoggerError;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub struct RotationManager {
    config: RotationConfig,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    pub fn should_rotate(&self, current_size: u64) -> bool {
        current_size >= self.config.max_size
    }

    /// Moves the active file aside and prunes old rotations.
    ///
    /// Returns the path the rotated content ended up at.
    pub fn rotate(&self, active: &Path) -> Result<PathBuf, LoggerError> {
        let stamp = Zoned::now().strftime(TIMESTAMP_FORMAT).to_string();
        let target = free_rotated_name(active, &stamp);
        fs::rename(active, &target)?;

        let rotated = if self.config.compress {
            compress_file(&target)
                .map_err(|e| LoggerError::rotation(format!("compressing {}: {e}", target.display())))?
        } else {
            target
        };

        self.prune(active)?;
        Ok(rotated)
    }

    /// Deletes rotated siblings of `active` beyond the newest `max_files`.
    pub fn prune(&self, active: &Path) -> Result<Vec<PathBuf>, LoggerError> {
        let mut rotated = rotated_files(active)?;
        // Timestamped names sort chronologically
        rotated.sort();
        let excess = rotated.len().saturating_sub(self.config.max_files);
        let removed: Vec<PathBuf> = rotated.drain(..excess).collect();
        for path in &removed {
            fs::remove_file(path)?;
        }
        Ok(removed)
    }
}

fn split_name(active: &Path) -> (String, Option<String>) {
    let stem = active
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = active.extension().map(|e| e.to_string_lossy().into_owned());
    (stem, ext)
}

fn rotated_name(stem: &str, stamp: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{stem}.{stamp}.{ext}"),
        None => format!("{stem}.{stamp}"),
    }
}

fn free_rotated_name(active: &Path, stamp: &str) -> PathBuf {
    let dir = active.parent().unwrap_or_else(|| Path::new(""));
    let (stem, ext) = split_name(active);
    let mut candidate = dir.join(rotated_name(&stem, stamp, ext.as_deref()));
    let mut n = 1;
    while candidate.exists() || gz_sibling(&candidate).exists() {
        candidate = dir.join(rotated_name(&stem, &format!("{stamp}_{n}"), ext.as_deref()));
        n += 1;
    }
    candidate
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn rotated_files(active: &Path) -> Result<Vec<PathBuf>, LoggerError> {
    let dir = match active.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let (stem, _) = split_name(active);
    let prefix = format!("{stem}.");
    let active_name = active.file_name().map(|n| n.to_os_string());

    let mut files = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if Some(&name) == active_name.as_ref() {
            continue;
        }
        let is_rotation = name
            .to_str()
            .and_then(|n| n.strip_prefix(&prefix))
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()));
        if is_rotation && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn manager(max_files: usize, compress: bool) -> RotationManager {
        RotationManager::new(RotationConfig {
            max_size: 16,
            max_files,
            compress,
        })
    }

    #[test]
    fn test_should_rotate_at_threshold() {
        let m = manager(3, false);
        assert!(!m.should_rotate(15));
        assert!(m.should_rotate(16));
    }

    #[test]
    fn test_rotate_renames_with_timestamp() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        fs::write(&active, "old content").unwrap();

        let rotated = manager(3, false).rotate(&active).unwrap();

        assert!(!active.exists());
        let name = rotated.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("app.2"), "{name}");
        assert!(name.ends_with(".log"), "{name}");
        assert_eq!(fs::read_to_string(&rotated).unwrap(), "old content");
    }

    #[test]
    fn test_rotate_in_same_second_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        let m = manager(10, false);

        fs::write(&active, "first").unwrap();
        let a = m.rotate(&active).unwrap();
        fs::write(&active, "second").unwrap();
        let b = m.rotate(&active).unwrap();

        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_rotate_compresses_when_enabled() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        fs::write(&active, "content").unwrap();

        let rotated = manager(3, true).rotate(&active).unwrap();

        assert_eq!(rotated.extension().unwrap(), "gz");
        assert!(rotated.exists());
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        fs::write(&active, "live").unwrap();
        for stamp in ["20250101_000000", "20250102_000000", "20250103_000000"] {
            fs::write(dir.path().join(format!("app.{stamp}.log")), stamp).unwrap();
        }
        fs::write(dir.path().join("other.20250101_000000.log"), "x").unwrap();

        let removed = manager(2, false).prune(&active).unwrap();

        assert_eq!(removed, vec![dir.path().join("app.20250101_000000.log")]);
        assert!(active.exists());
        assert!(dir.path().join("other.20250101_000000.log").exists());
    }
}
