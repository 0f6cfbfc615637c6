//! Salaries domain module: salary item catalogs per period and the amounts
//! assigned to individual employees. No payroll arithmetic lives here; these
//! are the data entities that would feed it.

pub mod item;

pub use item::{
    CalculationKind, EmployeeSalaryItem, NewEmployeeSalaryItem, NewSalaryItemType, SalaryItemType,
};
