//! store/core — RosterStore, Snapshot, open() and the shared refresh path.

use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::config::RosterConfig;
use crate::consts::KEY_EMPLOYEES;
use crate::error::Result;
use crate::kv::{KvBackend, WriteBatch};
use crate::metrics;
use crate::model::Employee;
use crate::pagination::{self, clamp_page, page_slice, total_pages, PaginationState};
use crate::subs::{listener, SubRegistry, SubscriptionHandle};
use crate::table;
use crate::view::{load_view_mode, ViewMode};

/// Externally observable state of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current page only, never the full table.
    pub employees: Vec<Employee>,
    pub view_mode: ViewMode,
    pub pagination: PaginationState,
    pub total_count: usize,
    pub selected_employee: Option<Employee>,
}

/// Constructed once per session and handed to every consumer by reference.
pub struct RosterStore<B: KvBackend> {
    pub(crate) kv: B,
    pub(crate) cfg: RosterConfig,
    pub(crate) state: Snapshot,
    pub(crate) subs: Arc<SubRegistry>,
}

impl<B: KvBackend> RosterStore<B> {
    /// Open with configuration from the environment.
    pub fn open(kv: B) -> Result<Self> {
        Self::open_with_config(kv, RosterConfig::from_env())
    }

    /// Read (or seed) the table, the view mode and the pagination state.
    pub fn open_with_config(mut kv: B, cfg: RosterConfig) -> Result<Self> {
        debug!("roster open: {}", cfg);
        let view_mode = load_view_mode(&kv)?.unwrap_or(cfg.default_view_mode);
        let mut pag = pagination::initialize(&mut kv, view_mode)?;
        let all = table::load_all(&mut kv, cfg.seed_on_first_run)?;

        if cfg.strict_pages {
            let clamped = clamp_page(pag.current_page, total_pages(all.len(), pag.items_per_page));
            if clamped != pag.current_page {
                warn!(
                    "persisted page {} is out of range for {} records, using page {}",
                    pag.current_page,
                    all.len(),
                    clamped
                );
                metrics::record_page_clamp();
                pag = pagination::set_current_page(&mut kv, pag, clamped)?;
            }
        }

        let employees = page_slice(&all, &pag).to_vec();
        metrics::record_page_load();
        info!(
            "roster open: {} records, view={}, page {}/{} ({} per page)",
            all.len(),
            view_mode,
            pag.current_page,
            pag.total_pages(all.len()),
            pag.items_per_page
        );

        Ok(Self {
            kv,
            cfg,
            state: Snapshot {
                employees,
                view_mode,
                pagination: pag,
                total_count: all.len(),
                selected_employee: None,
            },
            subs: SubRegistry::new(),
        })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.cfg
    }

    /// Synchronous snapshot read.
    pub fn get_state(&self) -> &Snapshot {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }

    /// `f` is called with the full snapshot after every state change until the
    /// handle is dropped.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionHandle
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.subs.subscribe(listener(f))
    }

    pub fn subscriber_count(&self) -> usize {
        self.subs.len()
    }

    pub fn backend(&self) -> &B {
        &self.kv
    }

    pub fn into_backend(self) -> B {
        self.kv
    }

    pub(crate) fn emit(&self) {
        self.subs.publish(&self.state);
    }

    /// Page that `requested` resolves to for a table of `total` records.
    pub(crate) fn resolve_page(&self, requested: u32, total: usize, items_per_page: u32) -> u32 {
        if self.cfg.strict_pages {
            clamp_page(requested, total_pages(total, items_per_page))
        } else {
            requested.max(1)
        }
    }

    /// After a mutation leaves `len` records: the current page, pulled back inside
    /// the table if it fell off the end. A moved page is staged into `batch`.
    pub(crate) fn settle_page(&self, batch: &mut WriteBatch, len: usize) -> Result<PaginationState> {
        let pag = self.state.pagination;
        let target = self.resolve_page(pag.current_page, len, pag.items_per_page);
        if target == pag.current_page {
            return Ok(pag);
        }
        debug!(
            "current page {} past the end after mutation, moving to {}",
            pag.current_page, target
        );
        metrics::record_page_clamp();
        let moved = PaginationState {
            current_page: target,
            ..pag
        };
        pagination::stage(batch, &moved)?;
        Ok(moved)
    }

    /// Write `batch`, then make `all`/`pag` the in-memory state. On a failed write
    /// neither the persisted keys nor the snapshot change. No notification.
    pub(crate) fn commit(
        &mut self,
        batch: WriteBatch,
        all: &[Employee],
        pag: PaginationState,
    ) -> Result<()> {
        let saves_table = batch.contains(KEY_EMPLOYEES);
        batch.commit(&mut self.kv)?;
        if saves_table {
            metrics::record_table_save();
        }

        metrics::record_page_load();
        self.state.employees = page_slice(all, &pag).to_vec();
        self.state.pagination = pag;
        self.state.total_count = all.len();
        Ok(())
    }
}
