//! kv/batch — multi-key write that either lands whole or not at all.
//!
//! `commit` remembers the previous value of every key it touches and, if a
//! later write fails, restores them in reverse order before returning the
//! error. Each single `set` is still atomic on its own (backend contract).

use log::{debug, warn};

use super::KvBackend;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct WriteBatch {
    puts: Vec<(String, Vec<u8>)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` under `key`. A later put to the same key wins.
    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) -> &mut Self {
        let key = key.into();
        self.puts.retain(|(k, _)| *k != key);
        self.puts.push((key, value));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.puts.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puts.is_empty()
    }

    pub fn commit<B: KvBackend + ?Sized>(self, kv: &mut B) -> Result<()> {
        if self.puts.is_empty() {
            return Ok(());
        }
        let mut written: Vec<(&str, Option<Vec<u8>>)> = Vec::with_capacity(self.puts.len());
        for (key, value) in &self.puts {
            let step = kv.get(key).and_then(|prev| {
                kv.set(key, value)?;
                Ok(prev)
            });
            match step {
                Ok(prev) => written.push((key.as_str(), prev)),
                Err(e) => {
                    warn!("batch write of '{}' failed, rolling back {} key(s): {}", key, written.len(), e);
                    rollback(kv, written);
                    return Err(e);
                }
            }
        }
        debug!("batch committed: {} key(s)", written.len());
        Ok(())
    }
}

fn rollback<B: KvBackend + ?Sized>(kv: &mut B, written: Vec<(&str, Option<Vec<u8>>)>) {
    for (key, prev) in written.into_iter().rev() {
        let res = match prev {
            Some(bytes) => kv.set(key, &bytes),
            None => kv.remove(key).map(|_| ()),
        };
        if let Err(e) = res {
            warn!("rollback of '{}' failed: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::MemKv;

    /// Fails every `set` of one key.
    struct RejectKey {
        inner: MemKv,
        key: &'static str,
    }

    impl KvBackend for RejectKey {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.inner.get(key)
        }
        fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
            if key == self.key {
                return Err(StoreError::InvalidKey(key.to_string()));
            }
            self.inner.set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<bool> {
            self.inner.remove(key)
        }
        fn keys(&self) -> Result<Vec<String>> {
            self.inner.keys()
        }
    }

    #[test]
    fn commit_writes_every_key() {
        let mut kv = MemKv::new();
        let mut b = WriteBatch::new();
        b.put("a", b"1".to_vec()).put("b", b"2".to_vec()).put("a", b"3".to_vec());
        assert_eq!(b.len(), 2);
        assert!(b.contains("a") && !b.contains("c"));
        b.commit(&mut kv).unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some(b"3".as_ref()));
        assert_eq!(kv.get("b").unwrap().as_deref(), Some(b"2".as_ref()));
    }

    #[test]
    fn failed_write_restores_earlier_keys() {
        let mut inner = MemKv::new();
        inner.set("a", b"old").unwrap();
        let mut kv = RejectKey { inner, key: "c" };

        let mut b = WriteBatch::new();
        b.put("a", b"new".to_vec()).put("b", b"fresh".to_vec()).put("c", b"x".to_vec());
        assert!(b.commit(&mut kv).is_err());

        assert_eq!(kv.get("a").unwrap().as_deref(), Some(b"old".as_ref()));
        assert_eq!(kv.get("b").unwrap(), None);
        assert_eq!(kv.get("c").unwrap(), None);
    }
}
