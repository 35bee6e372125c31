use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::NaiveDate;

use RosterDB::{
    Department, KvBackend, MemKv, NewEmployee, PaginationState, Position, RosterConfig,
    RosterStore, Snapshot, StoreError, ViewMode,
};

/// Fault switches shared between a test and the backend owned by the store.
#[derive(Default)]
struct Faults {
    garbled_table: AtomicBool,
    reject_set: Mutex<Option<&'static str>>,
}

struct FaultyKv {
    inner: MemKv,
    faults: Arc<Faults>,
}

impl KvBackend for FaultyKv {
    fn get(&self, key: &str) -> RosterDB::Result<Option<Vec<u8>>> {
        if key == "employees" && self.faults.garbled_table.load(Ordering::SeqCst) {
            return Ok(Some(b"{oops".to_vec()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> RosterDB::Result<()> {
        if self.faults.reject_set.lock().unwrap().map_or(false, |k| k == key) {
            return Err(StoreError::Io {
                op: "write",
                path: PathBuf::from(key),
                source: io::Error::new(io::ErrorKind::Other, "injected write failure"),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> RosterDB::Result<bool> {
        self.inner.remove(key)
    }

    fn keys(&self) -> RosterDB::Result<Vec<String>> {
        self.inner.keys()
    }
}

fn person(n: u64) -> NewEmployee {
    NewEmployee {
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        date_of_employment: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1988, 2, 3).unwrap(),
        phone: format!("+90 533 000 00 {:02}", n % 100),
        email: format!("p{n}@example.com"),
        department: Department::Tech,
        position: Position::Medior,
    }
}

fn open(cfg: RosterConfig) -> Result<(RosterStore<FaultyKv>, Arc<Faults>)> {
    let faults = Arc::new(Faults::default());
    let kv = FaultyKv {
        inner: MemKv::new(),
        faults: faults.clone(),
    };
    Ok((RosterStore::open_with_config(kv, cfg)?, faults))
}

fn counter(store: &RosterStore<FaultyKv>) -> (Arc<AtomicUsize>, RosterDB::SubscriptionHandle) {
    let n = Arc::new(AtomicUsize::new(0));
    let c = n.clone();
    let h = store.subscribe(move |_: &Snapshot| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    (n, h)
}

fn persisted_pagination(store: &RosterStore<FaultyKv>) -> Result<Option<PaginationState>> {
    match store.backend().inner.get("employeePagination")? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

#[test]
fn unreadable_table_leaves_view_and_pagination_untouched() -> Result<()> {
    let (mut store, faults) = open(RosterConfig::default())?;
    store.set_current_page(3)?;
    let before = store.snapshot();
    let (notes, _h) = counter(&store);

    faults.garbled_table.store(true, Ordering::SeqCst);
    let err = store.set_view_mode(ViewMode::Card).unwrap_err();
    assert!(err.is_corrupt());
    assert!(store.set_items_per_page(5).unwrap_err().is_corrupt());

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.get_state().view_mode, ViewMode::Table);
    assert_eq!(store.backend().inner.get("employeeViewMode")?, None);
    assert_eq!(
        persisted_pagination(&store)?,
        Some(PaginationState { current_page: 3, items_per_page: 9 })
    );
    assert_eq!(notes.load(Ordering::SeqCst), 0);

    faults.garbled_table.store(false, Ordering::SeqCst);
    store.set_view_mode(ViewMode::Card)?;
    assert_eq!(store.backend().inner.get("employeeViewMode")?.as_deref(), Some(b"card".as_ref()));
    assert_eq!(
        persisted_pagination(&store)?,
        Some(PaginationState { current_page: 1, items_per_page: 4 })
    );
    assert_eq!(notes.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn rejected_page_write_rolls_back_the_table() -> Result<()> {
    let (mut store, faults) = open(RosterConfig::default().with_seed_on_first_run(false))?;
    for n in 1..=10 {
        store.add_employee(person(n))?;
    }
    store.set_current_page(2)?;
    let before = store.snapshot();
    assert_eq!(before.employees.len(), 1);
    let (notes, _h) = counter(&store);

    // removing the only record on page 2 has to move the page as well
    *faults.reject_set.lock().unwrap() = Some("employeePagination");
    let err = store.remove_employee(10).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.get_all_employees()?.len(), 10);
    assert_eq!(persisted_pagination(&store)?.map(|p| p.current_page), Some(2));
    assert_eq!(notes.load(Ordering::SeqCst), 0);

    *faults.reject_set.lock().unwrap() = None;
    assert!(store.remove_employee(10)?);
    assert_eq!(store.get_state().total_count, 9);
    assert_eq!(store.get_state().pagination.current_page, 1);
    assert_eq!(persisted_pagination(&store)?.map(|p| p.current_page), Some(1));
    assert_eq!(notes.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn rejected_table_write_keeps_snapshot() -> Result<()> {
    let (mut store, faults) = open(RosterConfig::default())?;
    let before = store.snapshot();

    *faults.reject_set.lock().unwrap() = Some("employees");
    assert!(store.add_employee(person(1)).is_err());
    assert!(store.remove_multiple_employees(&[1, 2, 3]).is_err());

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.get_all_employees()?.len(), 250);
    Ok(())
}
