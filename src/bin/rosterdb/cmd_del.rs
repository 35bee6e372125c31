use anyhow::Result;
use std::path::PathBuf;

use super::util::{open_store, parse_ids};

pub fn exec(path: PathBuf, id: u64) -> Result<()> {
    let mut store = open_store(&path)?;
    if store.remove_employee(id)? {
        println!("DELETED id={} (total {})", id, store.get_state().total_count);
    } else {
        println!("DELETE requested, but no record with id={}", id);
    }
    Ok(())
}

pub fn exec_many(path: PathBuf, ids: String) -> Result<()> {
    let ids = parse_ids(&ids)?;
    let mut store = open_store(&path)?;
    let removed = store.remove_multiple_employees(&ids)?;
    println!(
        "DELETED {} of {} requested (total {})",
        removed,
        ids.len(),
        store.get_state().total_count
    );
    Ok(())
}
