//! kv — durable key-value byte store underneath the roster.
//!
//! Two backends:
//! - mem.rs  — in-process map (tests, ephemeral sessions)
//! - file.rs — one file per key under a root directory, atomic tmp+rename writes,
//!   exclusive `<root>/LOCK` held for the backend lifetime (single writer).
//!
//! `WriteBatch` (batch.rs) groups several keys into one all-or-nothing write.
//!
//! Values are opaque bytes here; decoding lives in `codec`.

pub mod batch;
pub mod file;
pub mod mem;

pub use batch::WriteBatch;
pub use file::FileKv;
pub use mem::MemKv;

use crate::error::{Result, StoreError};

pub trait KvBackend {
    /// `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the whole value under `key`. Readers never observe a partial value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns true if the key existed.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// All present keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
    fn remove(&mut self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

/// Keys double as file names in `FileKv`, so keep them to a safe alphabet.
pub fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
