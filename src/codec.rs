//! codec — versioned decode/encode of persisted values.
//!
//! `employees`:
//!   v1     {"version":1,"records":[Employee...]}   (written)
//!   legacy [Employee...]                           (read only, reported as version 0)
//! `employeeViewMode`:   table | card, written as the bare word (a JSON string is
//!                       also accepted on read)
//! `employeePagination`: {"currentPage":n,"itemsPerPage":m}, both >= 1
//!
//! Anything else under these keys is `StoreError::Corrupt`.

use serde::Serialize;
use serde_json::Value;

use crate::consts::{
    KEY_EMPLOYEES, KEY_PAGINATION, KEY_VIEW_MODE, TABLE_FORMAT_LEGACY, TABLE_FORMAT_VERSION,
};
use crate::error::{Result, StoreError};
use crate::model::Employee;
use crate::pagination::PaginationState;
use crate::view::ViewMode;

#[derive(Serialize)]
struct TableEnvelope<'a> {
    version: u32,
    records: &'a [Employee],
}

fn encode<T: Serialize + ?Sized>(key: &str, v: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(v).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

fn parse_json(key: &str, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::corrupt(key, format!("invalid JSON: {}", e)))
}

/// Decode a record table. Returns (format version, records).
pub fn decode_table(key: &str, bytes: &[u8]) -> Result<(u32, Vec<Employee>)> {
    let v = parse_json(key, bytes)?;
    let (version, records) = match v {
        Value::Array(_) => (TABLE_FORMAT_LEGACY, v),
        Value::Object(mut obj) => {
            let version = obj
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| StoreError::corrupt(key, "envelope without numeric 'version'"))?;
            if version != TABLE_FORMAT_VERSION as u64 {
                return Err(StoreError::corrupt(
                    key,
                    format!(
                        "unsupported table version {} (expected {})",
                        version, TABLE_FORMAT_VERSION
                    ),
                ));
            }
            let records = obj
                .remove("records")
                .ok_or_else(|| StoreError::corrupt(key, "envelope without 'records'"))?;
            (TABLE_FORMAT_VERSION, records)
        }
        other => {
            return Err(StoreError::corrupt(
                key,
                format!("expected array or envelope object, got {}", json_kind(&other)),
            ))
        }
    };

    let records: Vec<Employee> = serde_json::from_value(records)
        .map_err(|e| StoreError::corrupt(key, format!("bad employee record: {}", e)))?;
    check_unique_ids(key, &records)?;
    Ok((version, records))
}

fn check_unique_ids(key: &str, records: &[Employee]) -> Result<()> {
    let mut ids: Vec<u64> = records.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
        return Err(StoreError::corrupt(key, format!("duplicate employee id {}", w[0])));
    }
    Ok(())
}

pub fn encode_table(records: &[Employee]) -> Result<Vec<u8>> {
    encode(
        KEY_EMPLOYEES,
        &TableEnvelope {
            version: TABLE_FORMAT_VERSION,
            records,
        },
    )
}

pub fn decode_view_mode(bytes: &[u8]) -> Result<ViewMode> {
    if let Ok(m) = serde_json::from_slice::<ViewMode>(bytes) {
        return Ok(m);
    }
    let s = std::str::from_utf8(bytes)
        .map_err(|_| StoreError::corrupt(KEY_VIEW_MODE, "not UTF-8"))?;
    s.parse::<ViewMode>()
        .map_err(|e| StoreError::corrupt(KEY_VIEW_MODE, e))
}

pub fn encode_view_mode(mode: ViewMode) -> Vec<u8> {
    mode.as_str().as_bytes().to_vec()
}

pub fn decode_pagination(bytes: &[u8]) -> Result<PaginationState> {
    let p: PaginationState = serde_json::from_slice(bytes)
        .map_err(|e| StoreError::corrupt(KEY_PAGINATION, e))?;
    if p.current_page == 0 || p.items_per_page == 0 {
        return Err(StoreError::corrupt(
            KEY_PAGINATION,
            format!(
                "currentPage and itemsPerPage must be >= 1 (got {} / {})",
                p.current_page, p.items_per_page
            ),
        ));
    }
    Ok(p)
}

pub fn encode_pagination(p: &PaginationState) -> Result<Vec<u8>> {
    encode(KEY_PAGINATION, p)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
