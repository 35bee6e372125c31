//! table — the durable record table under `employees`.
//!
//! Whole-table read-modify-write: callers load the full collection, change it in
//! memory and hand it back to `save_all` (or `stage` it into a `WriteBatch` next to
//! the pagination state), which replaces the persisted value in a single
//! `KvBackend::set`.

use log::{debug, info};

use crate::codec::{decode_table, encode_table};
use crate::consts::{KEY_EMPLOYEES, TABLE_FORMAT_LEGACY};
use crate::error::{Result, StoreError};
use crate::kv::{KvBackend, WriteBatch};
use crate::metrics;
use crate::model::{Employee, EmployeeId};
use crate::seed::default_dataset;

/// Persisted table, `None` when the key was never written.
/// Present-but-invalid is `StoreError::Corrupt`.
pub fn read_all<B: KvBackend + ?Sized>(kv: &B) -> Result<Option<Vec<Employee>>> {
    let Some(bytes) = kv.get(KEY_EMPLOYEES)? else {
        return Ok(None);
    };
    let (version, records) = decode_table(KEY_EMPLOYEES, &bytes)?;
    if version == TABLE_FORMAT_LEGACY {
        debug!("table: legacy layout ({} records), upgraded on next write", records.len());
    }
    metrics::record_table_load();
    Ok(Some(records))
}

/// Load the table, seeding it first if absent (`seed` = bundled dataset, else empty).
pub fn load_all<B: KvBackend + ?Sized>(kv: &mut B, seed: bool) -> Result<Vec<Employee>> {
    if let Some(records) = read_all(kv)? {
        return Ok(records);
    }
    let records = if seed { default_dataset()? } else { Vec::new() };
    info!("table: absent, seeding {} records", records.len());
    save_all(kv, &records)?;
    metrics::record_seed();
    Ok(records)
}

/// Read the table without writing: the seed dataset (or nothing) stands in if absent.
pub fn read_or_default<B: KvBackend + ?Sized>(kv: &B, seed: bool) -> Result<Vec<Employee>> {
    match read_all(kv)? {
        Some(records) => Ok(records),
        None if seed => default_dataset(),
        None => Ok(Vec::new()),
    }
}

/// Replace the whole persisted table.
pub fn save_all<B: KvBackend + ?Sized>(kv: &mut B, records: &[Employee]) -> Result<()> {
    kv.set(KEY_EMPLOYEES, &encode_table(records)?)?;
    metrics::record_table_save();
    Ok(())
}

/// Queue the whole table for a batched write.
pub fn stage(batch: &mut WriteBatch, records: &[Employee]) -> Result<()> {
    batch.put(KEY_EMPLOYEES, encode_table(records)?);
    Ok(())
}

/// max(id) + 1, or 1 for an empty table. Identifiers are never reused while a
/// higher one exists.
pub fn next_id(records: &[Employee]) -> Result<EmployeeId> {
    match records.iter().map(|e| e.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(StoreError::IdExhausted { max }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemKv;

    #[test]
    fn absent_seeds_once() {
        let mut kv = MemKv::new();
        let recs = load_all(&mut kv, true).unwrap();
        assert_eq!(recs.len(), 250);
        assert!(kv.get(KEY_EMPLOYEES).unwrap().is_some());
        assert_eq!(read_all(&kv).unwrap().unwrap(), recs);
    }

    #[test]
    fn absent_without_seed_is_empty() {
        let mut kv = MemKv::new();
        assert!(load_all(&mut kv, false).unwrap().is_empty());
        assert_eq!(read_all(&kv).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn corrupt_is_not_seeded_over() {
        let mut kv = MemKv::new();
        kv.set(KEY_EMPLOYEES, b"{oops").unwrap();
        let err = load_all(&mut kv, true).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == KEY_EMPLOYEES));
        assert_eq!(kv.get(KEY_EMPLOYEES).unwrap().as_deref(), Some(b"{oops".as_ref()));
    }

    #[test]
    fn next_id_policy() {
        assert_eq!(next_id(&[]).unwrap(), 1);
        let recs = default_dataset().unwrap();
        assert_eq!(next_id(&recs).unwrap(), 251);
        assert_eq!(next_id(&recs[3..4]).unwrap(), 5);
    }

    #[test]
    fn next_id_at_max_is_an_error() {
        let mut recs = default_dataset().unwrap();
        recs[7].id = EmployeeId::MAX;
        let err = next_id(&recs).unwrap_err();
        assert!(matches!(err, StoreError::IdExhausted { max } if max == EmployeeId::MAX));
    }

    #[test]
    fn read_or_default_does_not_write() {
        let kv = MemKv::new();
        assert_eq!(read_or_default(&kv, true).unwrap().len(), 250);
        assert!(read_or_default(&kv, false).unwrap().is_empty());
        assert!(kv.is_empty());
    }
}
