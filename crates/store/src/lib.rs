//! `hrpay-store` — in-memory relational stores.
//!
//! Stand-in for the relational storage collaborator: one store per entity,
//! `RwLock<HashMap>`-backed, exposing equality/foreign-key filtering and the
//! uniqueness and overlap checks the schema would otherwise enforce. The
//! role/assignment directory lives in `hrpay-auth`; everything else is here.

pub mod employees;
pub mod hr;
pub mod loans;
pub mod organizations;
pub mod salaries;
pub mod settings;
pub mod table;

pub use employees::{BankAccountStore, EmployeeStore};
pub use hr::{DepartmentStore, EmploymentHistoryStore, JobTitleStore, WorkRecordStore};
pub use loans::LoanStore;
pub use organizations::{MembershipStore, OrganizationStore};
pub use salaries::{SalaryItemStore, SalaryItemTypeStore};
pub use settings::{FinancialPeriodStore, FiscalYearStore, InsuranceCeilingStore, TaxLevelStore};
pub use table::InMemoryTable;
