//! seed — bundled default dataset used for first-run seeding.

use crate::codec::decode_table;
use crate::error::Result;
use crate::model::Employee;

const DEFAULT_DATASET: &str = include_str!("../data/employees.json");

/// The bundled records (ids 1..=250), decoded through the same path as stored tables.
pub fn default_dataset() -> Result<Vec<Employee>> {
    let (_, records) = decode_table("<bundled dataset>", DEFAULT_DATASET.as_bytes())?;
    Ok(records)
}
