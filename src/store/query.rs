//! store/query — reads that bypass pagination, and the selected-employee slot.

use crate::error::Result;
use crate::kv::KvBackend;
use crate::model::{Employee, EmployeeId};
use crate::pagination::{total_pages, visible_pages, PageLink};
use crate::table;

use super::core::RosterStore;

impl<B: KvBackend> RosterStore<B> {
    /// ceil(totalCount / itemsPerPage); 0 for an empty table.
    pub fn get_total_pages(&self) -> u32 {
        total_pages(self.state.total_count, self.state.pagination.items_per_page)
    }

    /// Page-number window for the pagination control.
    pub fn visible_pages(&self) -> Vec<PageLink> {
        visible_pages(self.state.pagination.current_page, self.get_total_pages())
    }

    /// The full table. Does not write; an absent table reads as the seed dataset.
    pub fn get_all_employees(&self) -> Result<Vec<Employee>> {
        table::read_or_default(&self.kv, self.cfg.seed_on_first_run)
    }

    pub fn get_employee_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        Ok(self.get_all_employees()?.into_iter().find(|e| e.id == id))
    }

    /// Lookup by a textual id (route parameter). Non-numeric ids are a miss.
    pub fn get_employee_by_str_id(&self, id: &str) -> Result<Option<Employee>> {
        match id.trim().parse::<EmployeeId>() {
            Ok(id) => self.get_employee_by_id(id),
            Err(_) => Ok(None),
        }
    }

    /// Hand-off slot for the edit view.
    pub fn set_selected_employee(&mut self, employee: Option<Employee>) {
        self.state.selected_employee = employee;
        self.emit();
    }

    /// Consume the hand-off slot, clearing it. Notifies only if something was taken.
    pub fn take_selected_employee(&mut self) -> Option<Employee> {
        let taken = self.state.selected_employee.take();
        if taken.is_some() {
            self.emit();
        }
        taken
    }
}
