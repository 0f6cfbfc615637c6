//! Shared application state: every store plus the role directory.

use std::sync::Arc;

use hrpay_auth::{Authorizer, InMemoryRoleDirectory, RoleDirectory};
use hrpay_store::{
    BankAccountStore, DepartmentStore, EmployeeStore, EmploymentHistoryStore, FinancialPeriodStore,
    FiscalYearStore, InsuranceCeilingStore, JobTitleStore, LoanStore, MembershipStore,
    OrganizationStore, SalaryItemStore, SalaryItemTypeStore, TaxLevelStore, WorkRecordStore,
};

/// The store bundle the services operate on.
///
/// Dev/test wiring uses the in-memory stores throughout; services only touch
/// this struct, so swapping a store implementation stays local.
pub struct AppState {
    pub directory: InMemoryRoleDirectory,
    pub organizations: OrganizationStore,
    pub memberships: MembershipStore,
    pub employees: EmployeeStore,
    pub bank_accounts: BankAccountStore,
    pub departments: DepartmentStore,
    pub job_titles: JobTitleStore,
    pub histories: EmploymentHistoryStore,
    pub work_records: WorkRecordStore,
    pub loans: LoanStore,
    pub salary_item_types: SalaryItemTypeStore,
    pub salary_items: SalaryItemStore,
    pub fiscal_years: FiscalYearStore,
    pub financial_periods: FinancialPeriodStore,
    pub insurance_ceilings: InsuranceCeilingStore,
    pub tax_levels: TaxLevelStore,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            directory: InMemoryRoleDirectory::new(),
            organizations: OrganizationStore::new(),
            memberships: MembershipStore::new(),
            employees: EmployeeStore::new(),
            bank_accounts: BankAccountStore::new(),
            departments: DepartmentStore::new(),
            job_titles: JobTitleStore::new(),
            histories: EmploymentHistoryStore::new(),
            work_records: WorkRecordStore::new(),
            loans: LoanStore::new(),
            salary_item_types: SalaryItemTypeStore::new(),
            salary_items: SalaryItemStore::new(),
            fiscal_years: FiscalYearStore::new(),
            financial_periods: FinancialPeriodStore::new(),
            insurance_ceilings: InsuranceCeilingStore::new(),
            tax_levels: TaxLevelStore::new(),
        })
    }

    pub fn directory(&self) -> &dyn RoleDirectory {
        &self.directory
    }

    /// A fresh authorizer over the current directory state. No caching: each
    /// authorization question re-reads the directory.
    pub fn authorizer(&self) -> Authorizer<'_> {
        Authorizer::new(&self.directory)
    }
}
