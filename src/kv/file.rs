//! kv/file — directory-backed byte store.
//!
//! Layout: `<root>/<key>.json` per key, `<root>/LOCK` for the writer.
//! Writes go through `<key>.json.tmp` + fsync + rename, then the parent
//! directory is fsynced (best-effort on non-unix). A crash leaves either the old
//! value or the new one, never a torn file.

use log::{debug, warn};
use std::fs::{self, OpenOptions};
#[cfg(unix)]
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{validate_key, KvBackend};
use crate::consts::{KV_FILE_EXT, KV_TMP_EXT};
use crate::error::{Result, StoreError};
use crate::lock::{acquire_exclusive_lock, try_acquire_exclusive_lock, LockGuard};

#[cfg(unix)]
fn fsync_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Directory fsync after a rename/unlink. The value is already in place, so a
/// failure is logged rather than returned.
fn sync_parent(path: &Path) -> bool {
    match fsync_dir(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("fsync dir for {} failed: {}", path.display(), e);
            false
        }
    }
}

pub struct FileKv {
    root: PathBuf,
    fsync: bool,
    _lock: LockGuard,
}

impl FileKv {
    /// Open (creating the directory if needed) and take the writer lock without waiting.
    pub fn open(root: &Path) -> Result<Self> {
        Self::open_with(root, true, false)
    }

    /// `fsync`: sync tmp file and directory on each write.
    /// `wait_lock`: block on a held lock instead of failing with `Locked`.
    pub fn open_with(root: &Path, fsync: bool, wait_lock: bool) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| StoreError::io("create dir", root, e))?;
        let lock = if wait_lock {
            acquire_exclusive_lock(root)?
        } else {
            try_acquire_exclusive_lock(root)?
        };
        debug!("kv open: root={} fsync={}", root.display(), fsync);
        Ok(Self {
            root: root.to_path_buf(),
            fsync,
            _lock: lock,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, KV_FILE_EXT))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}.{}", key, KV_FILE_EXT, KV_TMP_EXT))
    }
}

impl KvBackend for FileKv {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        let path = self.value_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io("read", path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        let path = self.value_path(key);
        let tmp = self.tmp_path(key);
        let _ = fs::remove_file(&tmp);

        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .map_err(|e| StoreError::io("open tmp", &tmp, e))?;
        f.write_all(value)
            .map_err(|e| StoreError::io("write tmp", &tmp, e))?;
        if self.fsync {
            f.sync_all().map_err(|e| StoreError::io("fsync tmp", &tmp, e))?;
        }
        drop(f);

        fs::rename(&tmp, &path).map_err(|e| StoreError::io("rename", &path, e))?;
        if self.fsync {
            sync_parent(&path);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let path = self.value_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                if self.fsync {
                    sync_parent(&path);
                }
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io("remove", path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let rd = fs::read_dir(&self.root).map_err(|e| StoreError::io("read dir", &self.root, e))?;
        let suffix = format!(".{}", KV_FILE_EXT);
        let mut out = Vec::new();
        for ent in rd {
            let ent = ent.map_err(|e| StoreError::io("read dir entry", &self.root, e))?;
            let name = ent.file_name();
            if let Some(key) = name.to_str().and_then(|n| n.strip_suffix(&suffix)) {
                if validate_key(key).is_ok() {
                    out.push(key.to_string());
                }
            }
        }
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_root(prefix: &str) -> PathBuf {
        let t = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("{}-{}-{}", prefix, std::process::id(), t))
    }

    #[test]
    fn set_get_remove_keys() {
        let root = unique_root("rosterdb-filekv");
        let mut kv = FileKv::open_with(&root, true, false).unwrap();
        kv.set("employees", b"[]").unwrap();
        kv.set("employeeViewMode", b"card").unwrap();
        assert_eq!(kv.get("employees").unwrap().as_deref(), Some(b"[]".as_ref()));
        assert_eq!(kv.keys().unwrap(), vec!["employeeViewMode", "employees"]);
        assert!(!root.join("employees.json.tmp").exists());

        assert!(kv.remove("employees").unwrap());
        assert!(!kv.remove("employees").unwrap());
        assert_eq!(kv.get("employees").unwrap(), None);
        drop(kv);
        fs::remove_dir_all(&root).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn dir_sync_failure_is_reported() {
        let root = unique_root("rosterdb-dirsync");
        fs::create_dir_all(&root).unwrap();
        assert!(sync_parent(&root.join("employees.json")));
        assert!(!sync_parent(&root.join("missing").join("employees.json")));
        fs::remove_dir_all(&root).unwrap();
    }
}
