//! `hrpay-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the domain error model, entity/value-object
//! traits, and the date-range value object shared by every entity that
//! carries a validity window.

pub mod daterange;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use daterange::DateRange;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    AssignmentId, BankAccountId, DepartmentId, EmployeeId, EmploymentHistoryId, FinancialPeriodId,
    FiscalYearId, InsuranceCeilingId, JobTitleId, LoanId, MembershipId, OrganizationId, RoleId,
    SalaryItemId, SalaryItemTypeId, TaxLevelId, UserId, WorkRecordId,
};
pub use value_object::ValueObject;
