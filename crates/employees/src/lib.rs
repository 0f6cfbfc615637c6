//! Employees domain module.
//!
//! Personal records and bank accounts. Employees are not directly scoped to
//! one organization; they relate to organizations through membership windows,
//! which is why employee-anchored authorization iterates memberships.

pub mod bank_account;
pub mod employee;

pub use bank_account::{BankAccount, NewBankAccount};
pub use employee::{Employee, NewEmployee};
