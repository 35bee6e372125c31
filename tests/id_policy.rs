use anyhow::Result;
use chrono::NaiveDate;

use RosterDB::codec::encode_table;
use RosterDB::{
    Department, EmployeeId, KvBackend, MemKv, NewEmployee, Position, RosterStore, StoreBuilder,
    StoreError,
};

fn person(n: u64) -> NewEmployee {
    NewEmployee {
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        date_of_employment: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1991, 7, 9).unwrap(),
        phone: format!("+90 532 000 00 {:02}", n % 100),
        email: format!("person{n}@example.com"),
        department: Department::Analytics,
        position: Position::Junior,
    }
}

fn empty_store() -> Result<RosterStore<MemKv>> {
    Ok(StoreBuilder::from_default()
        .seed_on_first_run(false)
        .open_in_memory()?)
}

#[test]
fn empty_store_starts_ids_at_one_and_never_reuses() -> Result<()> {
    let mut store = empty_store()?;
    assert_eq!(store.get_state().total_count, 0);
    assert_eq!(store.get_total_pages(), 0);
    assert!(store.get_state().employees.is_empty());
    assert_eq!(store.get_state().pagination.current_page, 1);

    assert_eq!(store.add_employee(person(1))?, 1);
    assert_eq!(store.add_employee(person(2))?, 2);
    assert!(store.remove_employee(1)?);
    assert_eq!(store.add_employee(person(3))?, 3);

    let ids: Vec<u64> = store.get_all_employees()?.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 3]);
    Ok(())
}

#[test]
fn ten_records_span_two_table_pages() -> Result<()> {
    let mut store = empty_store()?;
    for n in 1..=10 {
        store.add_employee(person(n))?;
    }

    let page1: Vec<u64> = store.get_state().employees.iter().map(|e| e.id).collect();
    assert_eq!(page1, (1..=9).collect::<Vec<u64>>());
    assert_eq!(store.get_total_pages(), 2);

    store.set_current_page(2)?;
    let page2: Vec<u64> = store.get_state().employees.iter().map(|e| e.id).collect();
    assert_eq!(page2, vec![10]);
    Ok(())
}

#[test]
fn n_adds_grow_total_by_n() -> Result<()> {
    let mut store = StoreBuilder::from_default().open_in_memory()?;
    let initial = store.get_state().total_count;
    let mut ids = Vec::new();
    for n in 0..25 {
        ids.push(store.add_employee(person(n))?);
    }
    assert_eq!(store.get_state().total_count, initial + 25);
    for (n, id) in ids.iter().enumerate() {
        let e = store.get_employee_by_id(*id)?.expect("added");
        assert_eq!(e.email, format!("person{n}@example.com"));
    }
    Ok(())
}

#[test]
fn adding_past_the_largest_id_is_refused() -> Result<()> {
    let mut kv = MemKv::new();
    kv.set("employees", &encode_table(&[person(1).with_id(EmployeeId::MAX)])?)?;
    let cfg = StoreBuilder::from_default().build();
    let mut store = RosterStore::open_with_config(kv, cfg)?;
    let before = store.snapshot();

    let err = store.add_employee(person(2)).unwrap_err();
    assert!(matches!(err, StoreError::IdExhausted { max } if max == EmployeeId::MAX));
    assert_eq!(store.snapshot(), before);
    let ids: Vec<EmployeeId> = store.get_all_employees()?.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![EmployeeId::MAX]);
    Ok(())
}
