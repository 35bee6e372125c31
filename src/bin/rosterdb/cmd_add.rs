use anyhow::Result;
use std::path::PathBuf;

use RosterDB::validate::{format_phone, validate_record};
use RosterDB::NewEmployee;

use super::cli::NewFields;
use super::util::{ensure_valid, open_store, today};

pub fn exec(path: PathBuf, f: NewFields) -> Result<()> {
    let rec = NewEmployee {
        first_name: f.first_name.trim().to_string(),
        last_name: f.last_name.trim().to_string(),
        date_of_employment: f.date_of_employment,
        date_of_birth: f.date_of_birth,
        phone: format_phone(&f.phone),
        email: f.email.trim().to_string(),
        department: f.department,
        position: f.position,
    };

    let mut store = open_store(&path)?;
    let existing = store.get_all_employees()?;
    ensure_valid(validate_record(&rec, today(), &existing, None))?;

    let id = store.add_employee(rec)?;
    println!("OK add: id={} (total {})", id, store.get_state().total_count);
    Ok(())
}
