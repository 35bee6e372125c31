//! store/mutate — record mutations.
//!
//! Each one loads the full table and changes it in memory. The new table (only
//! when something changed) and a moved current page go out as one `WriteBatch`;
//! the snapshot is refreshed only after that write succeeded, then a single
//! notification is sent. The view stays on the current page; it does not jump
//! to an added record.

use log::debug;
use std::collections::HashSet;

use crate::error::Result;
use crate::kv::{KvBackend, WriteBatch};
use crate::metrics;
use crate::model::{EmployeeId, EmployeePatch, NewEmployee};
use crate::table;

use super::core::RosterStore;

impl<B: KvBackend> RosterStore<B> {
    /// Append a record with id = max(id) + 1 (1 for an empty table). Returns the id.
    pub fn add_employee(&mut self, new: NewEmployee) -> Result<EmployeeId> {
        let mut all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let id = table::next_id(&all)?;
        all.push(new.with_id(id));

        let mut batch = WriteBatch::new();
        table::stage(&mut batch, &all)?;
        let pag = self.settle_page(&mut batch, all.len())?;
        self.commit(batch, &all, pag)?;
        metrics::record_added(1);
        debug!("add_employee: id={} total={}", id, all.len());

        self.emit();
        Ok(id)
    }

    /// Returns false (and writes no table) when `id` is unknown.
    pub fn remove_employee(&mut self, id: EmployeeId) -> Result<bool> {
        let mut all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let before = all.len();
        all.retain(|e| e.id != id);
        let removed = all.len() != before;

        let mut batch = WriteBatch::new();
        if removed {
            table::stage(&mut batch, &all)?;
        }
        let pag = self.settle_page(&mut batch, all.len())?;
        self.commit(batch, &all, pag)?;
        if removed {
            metrics::record_removed(1);
        }
        debug!("remove_employee: id={} removed={} total={}", id, removed, all.len());

        self.emit();
        Ok(removed)
    }

    /// Remove every record whose id is in `ids` in one write. Unknown ids are
    /// ignored. Returns how many records were removed.
    pub fn remove_multiple_employees(&mut self, ids: &[EmployeeId]) -> Result<usize> {
        let wanted: HashSet<EmployeeId> = ids.iter().copied().collect();
        let mut all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let before = all.len();
        all.retain(|e| !wanted.contains(&e.id));
        let removed = before - all.len();

        let mut batch = WriteBatch::new();
        if removed > 0 {
            table::stage(&mut batch, &all)?;
        }
        let pag = self.settle_page(&mut batch, all.len())?;
        self.commit(batch, &all, pag)?;
        if removed > 0 {
            metrics::record_removed(removed as u64);
        }
        debug!(
            "remove_multiple_employees: requested={} removed={} total={}",
            wanted.len(),
            removed,
            all.len()
        );

        self.emit();
        Ok(removed)
    }

    /// Shallow-merge `patch` onto record `id`. Returns false when `id` is unknown.
    pub fn update_employee(&mut self, id: EmployeeId, patch: &EmployeePatch) -> Result<bool> {
        let mut all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let found = match all.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                patch.apply_to(e);
                true
            }
            None => false,
        };

        let mut batch = WriteBatch::new();
        if found {
            table::stage(&mut batch, &all)?;
        }
        let pag = self.settle_page(&mut batch, all.len())?;
        self.commit(batch, &all, pag)?;
        if found {
            metrics::record_updated(1);
        }
        debug!("update_employee: id={} found={}", id, found);

        self.emit();
        Ok(found)
    }
}
