//! view — view mode and the items-per-page policy derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec::{decode_view_mode, encode_view_mode};
use crate::consts::{CARD_PAGE_SIZE, KEY_VIEW_MODE, TABLE_PAGE_SIZE};
use crate::error::Result;
use crate::kv::{KvBackend, WriteBatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    #[serde(alias = "cards")]
    Card,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Card => "card",
        }
    }
}

/// table -> 9, card -> 4.
#[inline]
pub fn items_per_page(mode: ViewMode) -> u32 {
    match mode {
        ViewMode::Table => TABLE_PAGE_SIZE,
        ViewMode::Card => CARD_PAGE_SIZE,
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "card" | "cards" => Ok(ViewMode::Card),
            other => Err(format!("unknown view mode '{}', expected table|card", other)),
        }
    }
}

/// Persisted view mode, `None` if never set.
pub fn load_view_mode<B: KvBackend + ?Sized>(kv: &B) -> Result<Option<ViewMode>> {
    match kv.get(KEY_VIEW_MODE)? {
        Some(bytes) => Ok(Some(decode_view_mode(&bytes)?)),
        None => Ok(None),
    }
}

/// Queue `mode` for a batched write.
pub fn stage_view_mode(batch: &mut WriteBatch, mode: ViewMode) {
    batch.put(KEY_VIEW_MODE, encode_view_mode(mode));
}
