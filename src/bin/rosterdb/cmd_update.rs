use anyhow::{anyhow, Result};
use std::path::PathBuf;

use RosterDB::validate::{format_phone, validate_record};
use RosterDB::{EmployeePatch, NewEmployee};

use super::cli::PatchFields;
use super::util::{ensure_valid, open_store, today};

pub fn exec(path: PathBuf, id: u64, f: PatchFields) -> Result<()> {
    let patch = EmployeePatch {
        first_name: f.first_name.map(|s| s.trim().to_string()),
        last_name: f.last_name.map(|s| s.trim().to_string()),
        date_of_employment: f.date_of_employment,
        date_of_birth: f.date_of_birth,
        phone: f.phone.as_deref().map(format_phone),
        email: f.email.map(|s| s.trim().to_string()),
        department: f.department,
        position: f.position,
    };
    if patch.is_empty() {
        return Err(anyhow!("nothing to update: pass at least one field"));
    }

    let mut store = open_store(&path)?;
    let existing = store.get_all_employees()?;
    let mut merged = existing
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("employee {} not found", id))?;
    patch.apply_to(&mut merged);
    ensure_valid(validate_record(&NewEmployee::from(&merged), today(), &existing, Some(id)))?;

    store.update_employee(id, &patch)?;
    println!("OK update: id={}", id);
    Ok(())
}
