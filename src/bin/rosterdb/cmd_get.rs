use anyhow::Result;
use std::path::PathBuf;

use super::util::{open_store, print_row};

pub fn exec(path: PathBuf, id: String, json: bool) -> Result<()> {
    let store = open_store(&path)?;
    match store.get_employee_by_str_id(&id)? {
        Some(e) if json => println!("{}", serde_json::to_string(&e)?),
        Some(e) => print_row(&e),
        None => println!("NOT FOUND id='{}'", id),
    }
    Ok(())
}
