use anyhow::Result;
use std::path::PathBuf;

use super::util::{open_store, page_bar, print_row};

pub fn exec(path: PathBuf, page: Option<u32>, json: bool) -> Result<()> {
    let mut store = open_store(&path)?;
    if let Some(p) = page {
        store.set_current_page(p)?;
    }
    let s = store.get_state();

    if json {
        println!("{}", serde_json::to_string(s)?);
        return Ok(());
    }

    let total_pages = store.get_total_pages();
    println!(
        "view={} page {}/{} ({} per page, {} records)",
        s.view_mode, s.pagination.current_page, total_pages, s.pagination.items_per_page, s.total_count
    );
    if s.employees.is_empty() {
        println!("(no records)");
    } else {
        for e in &s.employees {
            print_row(e);
        }
    }
    println!(
        "{}",
        page_bar(s.pagination.current_page, &store.visible_pages(), total_pages)
    );
    Ok(())
}
