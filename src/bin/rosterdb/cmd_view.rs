use anyhow::Result;
use std::path::PathBuf;

use RosterDB::ViewMode;

use super::util::open_store;

pub fn exec_mode(path: PathBuf, mode: ViewMode) -> Result<()> {
    let mut store = open_store(&path)?;
    store.set_view_mode(mode)?;
    let s = store.get_state();
    println!(
        "OK view={} ({} per page, {} pages)",
        s.view_mode,
        s.pagination.items_per_page,
        store.get_total_pages()
    );
    Ok(())
}

pub fn exec_page(path: PathBuf, page: u32) -> Result<()> {
    let mut store = open_store(&path)?;
    store.set_current_page(page)?;
    let s = store.get_state();
    println!(
        "OK page {}/{} ({} records on page)",
        s.pagination.current_page,
        store.get_total_pages(),
        s.employees.len()
    );
    Ok(())
}
