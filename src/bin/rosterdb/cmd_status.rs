use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use RosterDB::{metrics, KvBackend};

use super::util::open_store;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let store = open_store(&path)?;
    let s = store.get_state();
    let total_pages = store.get_total_pages();
    let keys = store.backend().keys()?;

    if json {
        let out = json!({
            "path": path.display().to_string(),
            "keys": keys,
            "totalCount": s.total_count,
            "viewMode": s.view_mode,
            "pagination": s.pagination,
            "totalPages": total_pages,
            "config": {
                "seedOnFirstRun": store.config().seed_on_first_run,
                "defaultViewMode": store.config().default_view_mode,
                "fsync": store.config().fsync,
                "lockWait": store.config().lock_wait,
                "strictPages": store.config().strict_pages,
            },
            "metrics": metrics::snapshot(),
        });
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    println!("Roster at {}", path.display());
    println!("  keys:         {}", keys.join(", "));
    println!("  records:      {}", s.total_count);
    println!("  view mode:    {}", s.view_mode);
    println!(
        "  page:         {}/{} ({} per page)",
        s.pagination.current_page, total_pages, s.pagination.items_per_page
    );
    println!("  config:       {}", store.config());
    let m = metrics::snapshot();
    println!(
        "  metrics:      loads={} saves={} seeds={} recoveries={} clamps={}",
        m.table_loads, m.table_saves, m.table_seeds, m.pagination_recoveries, m.page_clamps
    );
    Ok(())
}
