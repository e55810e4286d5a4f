//! Size-based file rotation
//!
//! Backups are numbered from newest to oldest:
//!
//! ```text
//! logs/
//!   driver_communication.log      # primary, currently written
//!   driver_communication.log.1    # previous primary
//!   driver_communication.log.2
//!   driver_communication.log.10   # oldest kept, pruned on next rotation
//! ```
//!
//! Rotation renames, it never copies: each backup is byte-for-byte the primary
//! as it stood when it was rolled.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Size policy for one rotating file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicy {
    /// Roll before a write would take the primary past this many bytes
    pub max_bytes: u64,

    /// Number of backups kept; 0 disables rotation
    pub backup_count: usize,
}

impl SizePolicy {
    /// Check whether writing `incoming` bytes onto a file of `current` bytes
    /// requires a rollover first
    ///
    /// An empty primary is never rolled, so a single oversized line is
    /// written whole instead of producing empty backups.
    #[inline]
    pub fn needs_rollover(&self, current: u64, incoming: u64) -> bool {
        self.backup_count > 0 && current > 0 && current.saturating_add(incoming) > self.max_bytes
    }
}

/// Path of backup `index` for a primary file (`name.log` → `name.log.3`)
pub fn backup_path(primary: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(primary.as_os_str());
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Shift backups up by one generation and move the primary to `.1`
///
/// The oldest backup (`.backup_count`) is deleted first. The caller must hold
/// exclusive access to the primary and reopen it afterwards.
///
/// # Errors
///
/// Returns the first rename or remove error. Generations shifted before the
/// failure stay shifted; the primary is untouched unless the last rename
/// succeeded.
pub fn shift_backups(primary: &Path, backup_count: usize) -> io::Result<()> {
    if backup_count == 0 {
        return Ok(());
    }

    let oldest = backup_path(primary, backup_count);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for index in (1..backup_count).rev() {
        let from = backup_path(primary, index);
        if from.exists() {
            fs::rename(&from, backup_path(primary, index + 1))?;
        }
    }

    if primary.exists() {
        fs::rename(primary, backup_path(primary, 1))?;
    }

    Ok(())
}
