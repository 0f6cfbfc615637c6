//! Loans domain module.

pub mod loan;

pub use loan::{EmployeeLoan, NewEmployeeLoan};
