//! store/view — view mode and pagination operations.
//!
//! The table is read first; the new pagination (and view mode) is written as one
//! batch only after that succeeded.

use log::{debug, warn};

use crate::error::Result;
use crate::kv::{KvBackend, WriteBatch};
use crate::metrics;
use crate::pagination::{self, PaginationState};
use crate::table;
use crate::view::{stage_view_mode, ViewMode};

use super::core::RosterStore;

impl<B: KvBackend> RosterStore<B> {
    /// Persist `mode`, switch to its page size, go to page 1.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        debug!("set_view_mode: {}", mode);
        let all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let pag = PaginationState::for_mode(mode);

        let mut batch = WriteBatch::new();
        stage_view_mode(&mut batch, mode);
        pagination::stage(&mut batch, &pag)?;
        self.commit(batch, &all, pag)?;

        self.state.view_mode = mode;
        self.emit();
        Ok(())
    }

    /// Navigate to `page`. With strict pages (default) the request is clamped into
    /// [1, max(1, totalPages)]; otherwise only page 0 is raised to 1.
    pub fn set_current_page(&mut self, page: u32) -> Result<()> {
        let all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let ipp = self.state.pagination.items_per_page;
        let target = self.resolve_page(page, all.len(), ipp);
        if target != page {
            warn!("page {} out of range for {} records, using {}", page, all.len(), target);
            metrics::record_page_clamp();
        }
        debug!("set_current_page: {}", target);
        let pag = PaginationState {
            current_page: target,
            items_per_page: ipp,
        };

        let mut batch = WriteBatch::new();
        pagination::stage(&mut batch, &pag)?;
        self.commit(batch, &all, pag)?;
        self.emit();
        Ok(())
    }

    /// Override the page size (0 is raised to 1) and go to page 1. The view mode is
    /// left as is; a later open recovers the mode's own page size.
    pub fn set_items_per_page(&mut self, n: u32) -> Result<()> {
        let n = n.max(1);
        debug!("set_items_per_page: {}", n);
        let all = table::load_all(&mut self.kv, self.cfg.seed_on_first_run)?;
        let pag = PaginationState {
            current_page: 1,
            items_per_page: n,
        };

        let mut batch = WriteBatch::new();
        pagination::stage(&mut batch, &pag)?;
        self.commit(batch, &all, pag)?;
        self.emit();
        Ok(())
    }
}
