//! One rsvp-server per listen address.
//!
//! Each `host:port` gets its own lock file in the runtime directory, so a
//! second server on the same address fails at startup with the address named.

use std::fs::{self, File};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// Held for the life of the server; the lock is released on drop.
#[derive(Debug)]
pub struct LockGuard {
    _file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Lock file name for a listen address, e.g. `server-127-0-0-1-4096.lock`.
fn lock_file_name(addr: SocketAddr) -> String {
    let key: String = addr
        .ip()
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("server-{}-{}.lock", key, addr.port())
}

fn lock_dir() -> Result<PathBuf> {
    let runtime_dir = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine runtime directory"))?;
    Ok(runtime_dir.join("rsvp"))
}

/// Lock `addr` in the user's runtime directory.
pub fn acquire_lock(addr: SocketAddr) -> Result<LockGuard> {
    acquire_lock_in(&lock_dir()?, addr)
}

/// Lock `addr` with the lock file kept under `dir`.
pub fn acquire_lock_in(dir: &Path, addr: SocketAddr) -> Result<LockGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create lock directory {}", dir.display()))?;

    let path = dir.join(lock_file_name(addr));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create lock file {}", path.display()))?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another rsvp-server instance is already listening on {}.\n\
            If you believe this is an error, remove: {}",
            addr,
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file, path })
}
