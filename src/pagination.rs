//! pagination — {currentPage, itemsPerPage}, page math, the page-number window,
//! and persistence of the pagination state under `employeePagination`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::codec::{decode_pagination, encode_pagination};
use crate::consts::{KEY_PAGINATION, MAX_VISIBLE_PAGES};
use crate::error::Result;
use crate::kv::{KvBackend, WriteBatch};
use crate::metrics;
use crate::view::{items_per_page, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u32,
    pub items_per_page: u32,
}

impl PaginationState {
    /// Page 1 with the page size of `mode`.
    pub fn for_mode(mode: ViewMode) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page(mode),
        }
    }

    /// Index range of the current page within a table of `len` records.
    /// Empty when the page lies past the end.
    pub fn slice_bounds(&self, len: usize) -> Range<usize> {
        let ipp = self.items_per_page.max(1) as usize;
        let start = (self.current_page.max(1) as usize - 1).saturating_mul(ipp);
        let start = start.min(len);
        let end = start.saturating_add(ipp).min(len);
        start..end
    }

    pub fn total_pages(&self, total_count: usize) -> u32 {
        total_pages(total_count, self.items_per_page)
    }
}

/// ceil(total / ipp); 0 for an empty table.
#[inline]
pub fn total_pages(total_count: usize, items_per_page: u32) -> u32 {
    let ipp = items_per_page.max(1) as usize;
    let pages = total_count.div_ceil(ipp);
    pages.min(u32::MAX as usize) as u32
}

/// Clamp into [1, max(1, total_pages)].
#[inline]
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Records of the current page.
pub fn page_slice<'a, T>(all: &'a [T], state: &PaginationState) -> &'a [T] {
    &all[state.slice_bounds(all.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum PageLink {
    Page(u32),
    Ellipsis,
}

/// Page-number window of the pagination control (at most 7 page links).
pub fn visible_pages(current: u32, total: u32) -> Vec<PageLink> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageLink::Page).collect();
    }

    let mut out = vec![PageLink::Page(1)];
    if current <= 4 {
        out.extend((2..=5).map(PageLink::Page));
        out.push(PageLink::Ellipsis);
        out.push(PageLink::Page(total));
    } else if current >= total - 3 {
        out.push(PageLink::Ellipsis);
        out.extend((total - 4..=total).map(PageLink::Page));
    } else {
        out.push(PageLink::Ellipsis);
        out.extend((current - 1..=current + 1).map(PageLink::Page));
        out.push(PageLink::Ellipsis);
        out.push(PageLink::Page(total));
    }
    out
}

#[inline]
pub fn has_prev(current: u32) -> bool {
    current > 1
}

#[inline]
pub fn has_next(current: u32, total: u32) -> bool {
    current < total
}

// ---------------- persistence ----------------

pub fn save<B: KvBackend + ?Sized>(kv: &mut B, state: &PaginationState) -> Result<()> {
    kv.set(KEY_PAGINATION, &encode_pagination(state)?)
}

pub fn load<B: KvBackend + ?Sized>(kv: &B) -> Result<Option<PaginationState>> {
    match kv.get(KEY_PAGINATION)? {
        Some(bytes) => Ok(Some(decode_pagination(&bytes)?)),
        None => Ok(None),
    }
}

/// Read the persisted state for `mode`.
/// - absent: page 1 with the mode's page size, persisted;
/// - itemsPerPage drifted from the mode's page size: reset to page 1, rewritten.
pub fn initialize<B: KvBackend + ?Sized>(kv: &mut B, mode: ViewMode) -> Result<PaginationState> {
    let expected = items_per_page(mode);
    match load(kv)? {
        Some(p) if p.items_per_page == expected => Ok(p),
        Some(p) => {
            warn!(
                "pagination drift: persisted itemsPerPage={} but view mode '{}' needs {}; resetting to page 1",
                p.items_per_page, mode, expected
            );
            metrics::record_pagination_recovery();
            let fixed = PaginationState::for_mode(mode);
            save(kv, &fixed)?;
            Ok(fixed)
        }
        None => {
            let fresh = PaginationState::for_mode(mode);
            debug!("pagination absent, initializing {:?}", fresh);
            save(kv, &fresh)?;
            Ok(fresh)
        }
    }
}

/// Set currentPage as given (no clamping at this layer) and persist.
pub fn set_current_page<B: KvBackend + ?Sized>(
    kv: &mut B,
    state: PaginationState,
    page: u32,
) -> Result<PaginationState> {
    let next = PaginationState {
        current_page: page,
        ..state
    };
    save(kv, &next)?;
    Ok(next)
}

/// Queue `state` for a batched write.
pub fn stage(batch: &mut WriteBatch, state: &PaginationState) -> Result<()> {
    batch.put(KEY_PAGINATION, encode_pagination(state)?);
    Ok(())
}
