//! # File I/O Module
//!
//! Handles draft file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Projects are saved as `.lvl` (Levelbook) files containing JSON.
//! Lock files use `.lvl.lock` extension with metadata about who holds
//! the lock. Saved drafts let a crew resume a half-entered field book in
//! a later session; the calculation core itself never touches disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use level_core::file_io::{save_draft, load_draft, FileLock};
//! use level_core::project::SurveyProject;
//! use std::path::Path;
//!
//! let project = SurveyProject::new("Canal Embankment", "Sector 7", "R. Achebe");
//! let path = Path::new("embankment.lvl");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "surveyor@site.example")?;
//!
//! // Save with atomic write
//! save_draft(&project, path)?;
//!
//! // Lock is released when dropped
//! drop(lock);
//! # Ok::<(), level_core::errors::LevelError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{LevelError, LevelResult};
use crate::project::{SurveyProject, SCHEMA_VERSION};

/// Lock file metadata stored in .lvl.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
pub struct FileLock {
    /// Path to the main draft file
    draft_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a draft file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the .lvl draft file
    /// * `user_id` - Identifier for the user acquiring the lock
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(LevelError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> LevelResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // Check if lock file exists and contains valid lock info
        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                // A live lock blocks us; a stale one can be taken over.
                if !is_lock_stale(&existing) {
                    return Err(LevelError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
            }
        }

        // Create/open the lock file
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                LevelError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        // Try to acquire exclusive OS-level lock (non-blocking)
        lock_file.try_lock_exclusive().map_err(|_| {
            LevelError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        // Write lock info to the file using the same handle
        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| LevelError::SerializationError {
                reason: e.to_string(),
            })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            LevelError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            LevelError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            draft_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the draft file
    pub fn draft_path(&self) -> &Path {
        &self.draft_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Remove the lock file; the OS lock goes with the file handle.
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Get the lock file path for a draft file
fn lock_path_for(draft_path: &Path) -> PathBuf {
    let mut lock_path = draft_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> LevelResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        LevelError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        LevelError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| LevelError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the process that created it is no longer running)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            // Same machine - check whether the owning process still exists
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    // Locks older than a day are treated as abandoned
    let age = Utc::now() - info.locked_at;
    if age.num_hours() > 24 {
        return true;
    }

    false
}

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .lvl (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
pub fn save_draft(project: &SurveyProject, path: &Path) -> LevelResult<()> {
    let json =
        serde_json::to_string_pretty(project).map_err(|e| LevelError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = path.with_extension("lvl.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        LevelError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        LevelError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        LevelError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up the orphaned temp file before reporting
        let _ = fs::remove_file(&tmp_path);
        LevelError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(SurveyProject)` - Successfully loaded project
/// * `Err(LevelError::VersionMismatch)` - File version is incompatible
/// * `Err(LevelError::SerializationError)` - Invalid JSON
/// * `Err(LevelError::FileError)` - I/O error
pub fn load_draft(path: &Path) -> LevelResult<SurveyProject> {
    let mut file = File::open(path)
        .map_err(|e| LevelError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| LevelError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: SurveyProject =
        serde_json::from_str(&contents).map_err(|e| LevelError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    Ok(project)
}

/// Load a project, returning whether it's read-only due to a lock.
///
/// # Returns
///
/// * `Ok((SurveyProject, None))` - Loaded successfully, no lock
/// * `Ok((SurveyProject, Some(LockInfo)))` - Loaded, but another user has the lock
/// * `Err(_)` - Failed to load
pub fn load_draft_with_lock_check(
    path: &Path,
) -> LevelResult<(SurveyProject, Option<LockInfo>)> {
    let project = load_draft(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> LevelResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(LevelError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(LevelError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor than ours is unreadable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 {
        if file_parts[1] > current_parts[1] {
            return Err(LevelError::VersionMismatch {
                file_version: file_version.to_string(),
                expected_version: SCHEMA_VERSION.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_draft_path(name: &str) -> PathBuf {
        temp_dir().join(format!("levelbook_test_{}.lvl", name))
    }

    #[test]
    fn test_lock_path_generation() {
        let draft_path = Path::new("/path/to/embankment.lvl");
        let lock_path = lock_path_for(draft_path);
        assert_eq!(lock_path, Path::new("/path/to/embankment.lvl.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_draft_path("roundtrip");

        let project = SurveyProject::new("Test Project", "Test Site", "Test Surveyor");
        save_draft(&project, &path).unwrap();

        let loaded = load_draft(&path).unwrap();
        assert_eq!(loaded.meta.name, "Test Project");
        assert_eq!(loaded.meta.location, "Test Site");
        assert_eq!(loaded.meta.surveyor, "Test Surveyor");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_draft_path("atomic");
        let tmp_path = path.with_extension("lvl.tmp");

        let project = SurveyProject::new("Test", "Site", "Surveyor");
        save_draft(&project, &path).unwrap();

        // Temp file should not exist after successful save
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_draft_path("lock_test");

        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.draft_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);

        // Lock file should be removed on drop
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        // Same version should pass
        assert!(validate_version(SCHEMA_VERSION).is_ok());

        // Same major.minor should pass
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());

        // Different major should fail
        assert!(validate_version("1.0.0").is_err());

        // Newer minor (in 0.x) should fail
        assert!(validate_version("0.2.0").is_err());

        // Garbage should fail
        assert!(validate_version("not-a-version").is_err());
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_draft_path("lock_check");

        let project = SurveyProject::new("Test", "Site", "Surveyor");
        save_draft(&project, &path).unwrap();

        // Load without a lock held - should report no lock
        let (loaded, lock_info) = load_draft_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.name, "Test");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
