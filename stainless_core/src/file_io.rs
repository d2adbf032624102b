//! # File I/O Module
//!
//! Handles project and profile files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//! - **Member saves**: Add checked members to a project under its lock
//! - **Profile batches**: Read the JSON batch-profile format
//!
//! ## File Format
//!
//! Projects are saved as `.sdp` files containing JSON.
//! Lock files use the `.sdp.lock` extension with metadata about who holds the lock.
//!
//! A profile batch is a JSON object of id → profile:
//!
//! ```json
//! {
//!   "1": { "name": "C 70x50x1.5", "type": "c_profile_w_lps", "H": 70, "B": 50, "D": 12, "t": 1.5, "r_out": 3.75 },
//!   "2": { "name": "C 100x40x2",  "type": "c_profile", "H": 100, "B": 40, "t": 2, "r_out": 5 }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use stainless_core::file_io::{save_project, FileLock};
//! use stainless_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("myproject.sdp");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! save_project(&project, path)?;
//! drop(lock);
//! # Ok::<(), stainless_core::errors::CalcError>(())
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{DesignMember, Project, SCHEMA_VERSION};
use crate::section::{Profile, ProfileShape};

/// Lock file metadata stored in .sdp.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
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

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Holds an OS-level lock (via fs2) on a `.lock` file that also carries
/// [`LockInfo`] for other users to read.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Another live process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(CalcError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                log::info!("Taking over stale lock on {} held by {}", path.display(), existing.user_id);
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| CalcError::serialization(e.to_string()))?;
        lock_file
            .write_all(lock_json.as_bytes())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;
        lock_file
            .sync_all()
            .map_err(|e| CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string()))?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
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

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    serde_json::from_str(&contents).map_err(|e| CalcError::serialization(e.to_string()))
}

/// A lock is stale when its process is gone or it is more than 24 hours old
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
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

    (Utc::now() - info.locked_at).num_hours() > 24
}

/// Save a project with atomic write semantics.
///
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);
    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("Saved project {} to {}", project.meta.job_id, path.display());
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = tmp
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_to_string(path, "read")?;
    let project: Project = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load a project along with the lock held on it by someone else, if any.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Add members to the project at `path` while holding its lock.
///
/// A missing file starts a new project owned by `user_id`. A member whose
/// label is already in the project replaces the stored one.
///
/// # Returns
///
/// * `Ok(Project)` - The project as saved
/// * `Err(CalcError::FileLocked)` - Someone else has the project open
pub fn save_members(path: &Path, user_id: &str, members: Vec<DesignMember>) -> CalcResult<Project> {
    let _lock = FileLock::acquire(path, user_id)?;

    let mut project = if path.exists() {
        load_project(path)?
    } else {
        let mut project = Project::new(user_id, "", "");
        if let Some(first) = members.first() {
            project.settings.units = first.member.units;
        }
        project
    };

    let (mut added, mut replaced) = (0, 0);
    for member in members {
        let existing = project.find_by_label(&member.label).map(|(id, _)| *id);
        match existing.and_then(|id| project.get_member_mut(&id)) {
            Some(slot) => {
                *slot = member;
                replaced += 1;
            }
            None => {
                project.add_member(member);
                added += 1;
            }
        }
    }
    project.touch();

    save_project(&project, path)?;
    log::info!("{}: {} members added, {} replaced", path.display(), added, replaced);
    Ok(project)
}

/// Major versions must match; in 0.x a newer minor version is rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

// ============================================================================
// Profile Batches
// ============================================================================

/// One entry of a profile batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSpec {
    pub name: String,
    #[serde(flatten)]
    pub shape: ProfileShape,
}

impl ProfileSpec {
    /// Build the profile with thin-wall section properties
    pub fn to_profile(&self) -> CalcResult<Profile> {
        Profile::new(self.name.clone(), self.shape)
    }
}

/// Parse a profile batch from JSON text.
///
/// Unknown `type` values, lipped profiles without `D` and non-physical
/// dimensions are rejected.
///
/// # Example
///
/// ```rust
/// use stainless_core::file_io::parse_profile_batch;
///
/// let batch = parse_profile_batch(
///     r#"{"7": {"name": "C 70", "type": "c_profile", "H": 70, "B": 50, "t": 1.5, "r_out": 3.75}}"#,
/// )?;
/// assert_eq!(batch["7"].name, "C 70");
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn parse_profile_batch(json: &str) -> CalcResult<BTreeMap<String, ProfileSpec>> {
    let batch: BTreeMap<String, ProfileSpec> =
        serde_json::from_str(json).map_err(|e| CalcError::serialization(format!("Invalid profile batch: {}", e)))?;
    for (id, spec) in &batch {
        spec.shape.validate().map_err(|e| match e {
            CalcError::InvalidInput { field, value, reason } => {
                CalcError::invalid_input(format!("{}.{}", id, field), value, reason)
            }
            other => other,
        })?;
    }
    Ok(batch)
}

/// Read a profile batch file, ordered by id.
pub fn load_profile_batch(path: &Path) -> CalcResult<BTreeMap<String, ProfileSpec>> {
    let contents = read_to_string(path, "read")?;
    let batch = parse_profile_batch(&contents)?;
    log::debug!("Loaded {} profiles from {}", batch.len(), path.display());
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str, ext: &str) -> PathBuf {
        temp_dir().join(format!("stainless_test_{}_{}.{}", name, std::process::id(), ext))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/project.sdp"));
        assert_eq!(lock_path, Path::new("/path/to/project.sdp.lock"));
        assert_eq!(tmp_path_for(Path::new("/p/x.sdp")), Path::new("/p/x.sdp.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip", "sdp");
        let project = Project::new("Test Engineer", "TEST-001", "Test Client");
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic", "sdp");
        save_project(&Project::default(), &path).unwrap();
        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_path("newer", "sdp");
        let mut project = Project::default();
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();
        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_path("lock", "sdp");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_members_adds_and_replaces_by_label() {
        use crate::analysis::Demands;
        use crate::member::tests::lipped_c6;
        use crate::member::DesignParameters;

        let path = temp_path("members", "sdp");
        let _ = fs::remove_file(&path);
        let member = |label: &str, length: f64| {
            DesignMember::new(label, lipped_c6(length, DesignParameters::default()), Demands::default())
        };

        let project = save_members(&path, "test@example.com", vec![member("J-1", 48.0)]).unwrap();
        assert_eq!(project.meta.engineer, "test@example.com");
        assert_eq!(project.member_count(), 1);

        save_members(&path, "test@example.com", vec![member("J-1", 96.0), member("J-2", 48.0)]).unwrap();
        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.member_count(), 2);
        assert_eq!(loaded.find_by_label("J-1").unwrap().1.member.length, 96.0);
        assert!(!lock_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_members_refuses_locked_project() {
        let path = temp_path("locked", "sdp");
        save_project(&Project::default(), &path).unwrap();

        let lock = FileLock::acquire(&path, "other@example.com").unwrap();
        let err = save_members(&path, "test@example.com", Vec::new()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert_eq!(FileLock::check(&path).unwrap().user_id, "other@example.com");

        drop(lock);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_profile_batch_file() {
        let path = temp_path("batch", "json");
        fs::write(
            &path,
            r#"{
                "2": {"name": "C 100x40x2", "type": "c_profile", "H": 100, "B": 40, "t": 2, "r_out": 5},
                "1": {"name": "C 70x50x1.5", "type": "c_profile_w_lps", "H": 70, "B": 50, "D": 12, "t": 1.5, "r_out": 3.75}
            }"#,
        )
        .unwrap();

        let batch = load_profile_batch(&path).unwrap();
        let ids: Vec<_> = batch.keys().cloned().collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(
            batch["1"].shape,
            ProfileShape::LippedChannel { h: 70.0, b: 50.0, d: 12.0, t: 1.5, r_out: 3.75 }
        );
        assert!(batch["2"].to_profile().is_ok());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_profile_batch_rejects_unknown_type() {
        let err = parse_profile_batch(r#"{"1": {"name": "Z", "type": "z_profile", "H": 70, "B": 50, "t": 1.5, "r_out": 3}}"#)
            .unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_profile_batch_rejects_missing_lip() {
        let err = parse_profile_batch(r#"{"1": {"name": "C", "type": "c_profile_w_lps", "H": 70, "B": 50, "t": 1.5, "r_out": 3}}"#)
            .unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_profile_batch_rejects_bad_dimensions() {
        let err = parse_profile_batch(r#"{"9": {"name": "C", "type": "c_profile", "H": 70, "B": 50, "t": -1.5, "r_out": 3}}"#)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("9."));
    }

    #[test]
    fn test_missing_file() {
        let err = load_profile_batch(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
