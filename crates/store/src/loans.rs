//! Loan store.

use hrpay_core::{DomainError, DomainResult, EmployeeId, LoanId, OrganizationId};
use hrpay_loans::EmployeeLoan;

use crate::table::InMemoryTable;

#[derive(Debug, Default)]
pub struct LoanStore {
    table: InMemoryTable<LoanId, EmployeeLoan>,
}

impl LoanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, loan: EmployeeLoan) {
        self.table.insert(loan.id, loan);
    }

    pub fn update(&self, loan: EmployeeLoan) -> DomainResult<()> {
        if self.table.get(&loan.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.table.insert(loan.id, loan);
        Ok(())
    }

    pub fn require(&self, id: LoanId) -> DomainResult<EmployeeLoan> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<EmployeeLoan> {
        self.table.all()
    }

    pub fn for_employee(&self, employee: EmployeeId) -> Vec<EmployeeLoan> {
        self.table.filter(|l| l.employee_id == employee)
    }

    pub fn remove(&self, id: LoanId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_organization(&self, organization: OrganizationId) {
        self.table.retain(|l| l.organization_id != organization);
    }
}
