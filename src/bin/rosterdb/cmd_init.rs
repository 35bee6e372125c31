use anyhow::{Context, Result};
use std::path::PathBuf;

use RosterDB::StoreBuilder;

pub fn exec(path: PathBuf, no_seed: bool) -> Result<()> {
    let store = StoreBuilder::new()
        .seed_on_first_run(!no_seed)
        .open_dir(&path)
        .with_context(|| format!("init roster at {}", path.display()))?;
    let s = store.get_state();
    println!(
        "Initialized roster at {}: {} records, view={}, {} per page, {} pages",
        path.display(),
        s.total_count,
        s.view_mode,
        s.pagination.items_per_page,
        store.get_total_pages()
    );
    Ok(())
}
