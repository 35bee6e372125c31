use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;

use RosterDB::pagination::{has_next, has_prev, PageLink};
use RosterDB::validate::ValidationErrors;
use RosterDB::{Employee, EmployeeId, FileKv, RosterStore, StoreBuilder};

pub fn open_store(path: &Path) -> Result<RosterStore<FileKv>> {
    StoreBuilder::new()
        .open_dir(path)
        .with_context(|| format!("open roster at {}", path.display()))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "1, 2,3" -> [1, 2, 3]
pub fn parse_ids(s: &str) -> Result<Vec<EmployeeId>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<EmployeeId>().map_err(|e| anyhow!("invalid id '{}': {}", p, e)))
        .collect()
}

pub fn ensure_valid(errs: ValidationErrors) -> Result<()> {
    if errs.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("validation failed: {}", errs))
    }
}

pub fn print_row(e: &Employee) {
    println!(
        "{:>5}  {:<12} {:<12} {}  {}  {:<18} {:<32} {:<9} {}",
        e.id,
        e.first_name,
        e.last_name,
        e.date_of_employment,
        e.date_of_birth,
        e.phone,
        e.email,
        e.department,
        e.position
    );
}

pub fn page_bar(current: u32, links: &[PageLink], total: u32) -> String {
    let mut out = String::new();
    out.push_str(if has_prev(current) { "‹ " } else { "  " });
    for l in links {
        match l {
            PageLink::Page(p) if *p == current => out.push_str(&format!("[{}] ", p)),
            PageLink::Page(p) => out.push_str(&format!("{} ", p)),
            PageLink::Ellipsis => out.push_str("... "),
        }
    }
    if has_next(current, total) {
        out.push('›');
    }
    out
}
