use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Log target for `store_lock`
const LOG_TARGET: &str = "     store";

/// Guard that releases the store lock when dropped
#[derive(Debug)]
pub struct StoreLockGuard(File);

impl Drop for StoreLockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.unlock() {
            log::warn!(target: LOG_TARGET, "Could not unlock store: {e:#}");
        }
    }
}

/// Block until the exclusive writer lock of the store rooted at `root` is held.
pub fn acquire_store_lock(root: &Path) -> Result<StoreLockGuard> {
    let lock_path = root.join("store.lock");

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening store lock file at '{}'", lock_path.display()))?;

    file.lock_exclusive()
        .into_app_err_with(|| format!("acquiring exclusive lock on store at '{}'", lock_path.display()))?;
    log::trace!(target: LOG_TARGET, "Acquired store lock at '{}'", lock_path.display());

    Ok(StoreLockGuard(file))
}
