//! consts — persisted key names, page-size policy and on-disk names.

/// Key of the record table (envelope `{"version":1,"records":[...]}`).
pub const KEY_EMPLOYEES: &str = "employees";
/// Key of the persisted view mode (bare `table` | `card`).
pub const KEY_VIEW_MODE: &str = "employeeViewMode";
/// Key of the persisted pagination state (`{currentPage, itemsPerPage}`).
pub const KEY_PAGINATION: &str = "employeePagination";

/// Current version of the `employees` envelope.
pub const TABLE_FORMAT_VERSION: u32 = 1;
/// Legacy layout: a bare JSON array of records.
pub const TABLE_FORMAT_LEGACY: u32 = 0;

pub const TABLE_PAGE_SIZE: u32 = 9;
pub const CARD_PAGE_SIZE: u32 = 4;

/// Max page-number entries rendered by the pagination control.
pub const MAX_VISIBLE_PAGES: u32 = 7;

/// Country-code prefix of normalized phone numbers.
pub const PHONE_PREFIX: &str = "+90";
pub const PHONE_DIGITS: usize = 10;
pub const MIN_EMPLOYEE_AGE_YEARS: i32 = 18;

// FileKv layout
pub const LOCK_FILE: &str = "LOCK";
pub const KV_FILE_EXT: &str = "json";
pub const KV_TMP_EXT: &str = "tmp";
