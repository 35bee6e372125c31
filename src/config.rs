//! Centralized configuration and builder for the roster store.
//!
//! - RosterConfig::from_env() reads ROSTER_* variables; defaults otherwise.
//! - Fluent `with_*` setters override single fields.
//! - StoreBuilder collects a config and opens a store over a file or memory backend.
//!
//! Variables:
//! - ROSTER_SEED          (default true)  seed the bundled dataset when the table is absent
//! - ROSTER_VIEW_MODE     (default table) view mode when none is persisted
//! - ROSTER_FSYNC         (default true)  fsync FileKv writes
//! - ROSTER_LOCK_WAIT     (default false) block on a held LOCK instead of failing
//! - ROSTER_STRICT_PAGES  (default true)  clamp page requests and the current page
//!   after deletions into [1, max(1, totalPages)]

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::kv::{FileKv, MemKv};
use crate::store::RosterStore;
use crate::view::ViewMode;

fn env_bool(name: &str) -> Option<bool> {
    let v = std::env::var(name).ok()?;
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterConfig {
    pub seed_on_first_run: bool,
    pub default_view_mode: ViewMode,
    pub fsync: bool,
    pub lock_wait: bool,
    pub strict_pages: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seed_on_first_run: true,
            default_view_mode: ViewMode::Table,
            fsync: true,
            lock_wait: false,
            strict_pages: true,
        }
    }
}

impl RosterConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(b) = env_bool("ROSTER_SEED") {
            cfg.seed_on_first_run = b;
        }
        if let Ok(v) = std::env::var("ROSTER_VIEW_MODE") {
            if let Ok(m) = v.parse::<ViewMode>() {
                cfg.default_view_mode = m;
            }
        }
        if let Some(b) = env_bool("ROSTER_FSYNC") {
            cfg.fsync = b;
        }
        if let Some(b) = env_bool("ROSTER_LOCK_WAIT") {
            cfg.lock_wait = b;
        }
        if let Some(b) = env_bool("ROSTER_STRICT_PAGES") {
            cfg.strict_pages = b;
        }

        cfg
    }

    pub fn with_seed_on_first_run(mut self, on: bool) -> Self {
        self.seed_on_first_run = on;
        self
    }

    pub fn with_default_view_mode(mut self, mode: ViewMode) -> Self {
        self.default_view_mode = mode;
        self
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    pub fn with_lock_wait(mut self, on: bool) -> Self {
        self.lock_wait = on;
        self
    }

    pub fn with_strict_pages(mut self, on: bool) -> Self {
        self.strict_pages = on;
        self
    }
}

impl fmt::Display for RosterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RosterConfig {{ seed_on_first_run: {}, default_view_mode: {}, fsync: {}, lock_wait: {}, strict_pages: {} }}",
            self.seed_on_first_run, self.default_view_mode, self.fsync, self.lock_wait, self.strict_pages,
        )
    }
}

/// Builder that starts from the environment (or clean defaults) and opens a store.
#[derive(Clone, Debug)]
pub struct StoreBuilder {
    cfg: RosterConfig,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self {
            cfg: RosterConfig::from_env(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from clean defaults without reading the environment.
    pub fn from_default() -> Self {
        Self {
            cfg: RosterConfig::default(),
        }
    }

    pub fn seed_on_first_run(mut self, on: bool) -> Self {
        self.cfg.seed_on_first_run = on;
        self
    }

    pub fn default_view_mode(mut self, mode: ViewMode) -> Self {
        self.cfg.default_view_mode = mode;
        self
    }

    pub fn fsync(mut self, on: bool) -> Self {
        self.cfg.fsync = on;
        self
    }

    pub fn lock_wait(mut self, on: bool) -> Self {
        self.cfg.lock_wait = on;
        self
    }

    pub fn strict_pages(mut self, on: bool) -> Self {
        self.cfg.strict_pages = on;
        self
    }

    pub fn build(self) -> RosterConfig {
        self.cfg
    }

    pub fn open_dir(self, root: &Path) -> Result<RosterStore<FileKv>> {
        let kv = FileKv::open_with(root, self.cfg.fsync, self.cfg.lock_wait)?;
        RosterStore::open_with_config(kv, self.cfg)
    }

    pub fn open_in_memory(self) -> Result<RosterStore<MemKv>> {
        RosterStore::open_with_config(MemKv::new(), self.cfg)
    }
}
