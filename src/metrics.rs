//! Lightweight global metrics for the roster store.
//!
//! Atomic counters per subsystem:
//! - record table (loads, saves, seeds)
//! - mutations (added, removed, updated)
//! - pagination (page loads, drift recoveries, clamps)
//! - subscriptions (notifications)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Table -----
static TABLE_LOADS: AtomicU64 = AtomicU64::new(0);
static TABLE_SAVES: AtomicU64 = AtomicU64::new(0);
static TABLE_SEEDS: AtomicU64 = AtomicU64::new(0);

// ----- Mutations -----
static RECORDS_ADDED: AtomicU64 = AtomicU64::new(0);
static RECORDS_REMOVED: AtomicU64 = AtomicU64::new(0);
static RECORDS_UPDATED: AtomicU64 = AtomicU64::new(0);

// ----- Pagination -----
static PAGE_LOADS: AtomicU64 = AtomicU64::new(0);
static PAGINATION_RECOVERIES: AtomicU64 = AtomicU64::new(0);
static PAGE_CLAMPS: AtomicU64 = AtomicU64::new(0);

// ----- Subscriptions -----
static NOTIFICATIONS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub table_loads: u64,
    pub table_saves: u64,
    pub table_seeds: u64,

    pub records_added: u64,
    pub records_removed: u64,
    pub records_updated: u64,

    pub page_loads: u64,
    pub pagination_recoveries: u64,
    pub page_clamps: u64,

    pub notifications: u64,
}

pub fn record_table_load() {
    TABLE_LOADS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_table_save() {
    TABLE_SAVES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_seed() {
    TABLE_SEEDS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_added(n: u64) {
    RECORDS_ADDED.fetch_add(n, Ordering::Relaxed);
}
pub fn record_removed(n: u64) {
    RECORDS_REMOVED.fetch_add(n, Ordering::Relaxed);
}
pub fn record_updated(n: u64) {
    RECORDS_UPDATED.fetch_add(n, Ordering::Relaxed);
}

pub fn record_page_load() {
    PAGE_LOADS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_pagination_recovery() {
    PAGINATION_RECOVERIES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_page_clamp() {
    PAGE_CLAMPS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_notification() {
    NOTIFICATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        table_loads: TABLE_LOADS.load(Ordering::Relaxed),
        table_saves: TABLE_SAVES.load(Ordering::Relaxed),
        table_seeds: TABLE_SEEDS.load(Ordering::Relaxed),
        records_added: RECORDS_ADDED.load(Ordering::Relaxed),
        records_removed: RECORDS_REMOVED.load(Ordering::Relaxed),
        records_updated: RECORDS_UPDATED.load(Ordering::Relaxed),
        page_loads: PAGE_LOADS.load(Ordering::Relaxed),
        pagination_recoveries: PAGINATION_RECOVERIES.load(Ordering::Relaxed),
        page_clamps: PAGE_CLAMPS.load(Ordering::Relaxed),
        notifications: NOTIFICATIONS.load(Ordering::Relaxed),
    }
}

/// Reset all counters (tests, long-running CLI sessions).
pub fn reset() {
    for c in [
        &TABLE_LOADS,
        &TABLE_SAVES,
        &TABLE_SEEDS,
        &RECORDS_ADDED,
        &RECORDS_REMOVED,
        &RECORDS_UPDATED,
        &PAGE_LOADS,
        &PAGINATION_RECOVERIES,
        &PAGE_CLAMPS,
        &NOTIFICATIONS,
    ] {
        c.store(0, Ordering::Relaxed);
    }
}
