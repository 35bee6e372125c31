use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use oorandom::Rand32;

use RosterDB::pagination::page_slice;
use RosterDB::{
    Department, Employee, MemKv, NewEmployee, Position, RosterStore, StoreBuilder, ViewMode,
};

fn random_employee(rng: &mut Rand32, n: u32) -> NewEmployee {
    NewEmployee {
        first_name: format!("F{}", rng.rand_u32()),
        last_name: format!("L{}", rng.rand_u32()),
        date_of_employment: NaiveDate::from_ymd_opt(2000 + rng.rand_range(0..24) as i32, 1, 1).unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1960 + rng.rand_range(0..40) as i32, 6, 1).unwrap(),
        phone: format!("+90 5{:02} {:03} 00 00", rng.rand_range(30..60), n % 1000),
        email: format!("churn{n}@example.com"),
        department: if rng.rand_range(0..2) == 0 { Department::Tech } else { Department::Analytics },
        position: match rng.rand_range(0..3) {
            0 => Position::Junior,
            1 => Position::Medior,
            _ => Position::Senior,
        },
    }
}

fn check_invariants(store: &RosterStore<MemKv>, model: &[Employee]) -> Result<()> {
    let all = store.get_all_employees()?;
    assert_eq!(all, model, "table diverged from model");

    let s = store.get_state();
    assert_eq!(s.total_count, model.len());

    let ids: HashSet<u64> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), all.len(), "duplicate ids");

    let total_pages = store.get_total_pages();
    assert!(s.pagination.current_page >= 1);
    assert!(s.pagination.current_page <= total_pages.max(1));
    assert!(s.employees.len() <= s.pagination.items_per_page as usize);
    assert_eq!(s.employees.as_slice(), page_slice(&all, &s.pagination));
    if !all.is_empty() {
        assert!(!s.employees.is_empty(), "strict pages never show an empty page");
    }
    Ok(())
}

#[test]
fn random_churn_keeps_invariants() -> Result<()> {
    let mut rng = Rand32::new(0x5eed_2024);
    let mut store = StoreBuilder::from_default()
        .seed_on_first_run(false)
        .open_in_memory()?;
    let mut model: Vec<Employee> = Vec::new();

    for step in 0..400u32 {
        match rng.rand_range(0..10) {
            0..=3 => {
                let rec = random_employee(&mut rng, step);
                let expected = model.iter().map(|e| e.id).max().map_or(1, |m| m + 1);
                let id = store.add_employee(rec.clone())?;
                assert_eq!(id, expected);
                model.push(rec.with_id(id));
            }
            4..=5 if !model.is_empty() => {
                let idx = rng.rand_range(0..model.len() as u32) as usize;
                let id = model[idx].id;
                assert!(store.remove_employee(id)?);
                model.remove(idx);
            }
            6 => {
                let ids: Vec<u64> = (0..3).map(|_| rng.rand_range(1..(step + 2)) as u64).collect();
                let wanted: HashSet<u64> = ids.iter().copied().collect();
                let before = model.len();
                model.retain(|e| !wanted.contains(&e.id));
                assert_eq!(store.remove_multiple_employees(&ids)?, before - model.len());
            }
            7 => {
                let mode = if rng.rand_range(0..2) == 0 { ViewMode::Table } else { ViewMode::Card };
                store.set_view_mode(mode)?;
                assert_eq!(store.get_state().pagination.current_page, 1);
            }
            _ => {
                let page = rng.rand_range(0..(store.get_total_pages() + 3));
                store.set_current_page(page)?;
            }
        }
        check_invariants(&store, &model)?;
    }
    Ok(())
}
