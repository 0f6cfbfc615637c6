//! Financial settings domain module: fiscal years and their children
//! (insurance ceilings, tax brackets, financial periods).

pub mod fiscal_year;
pub mod period;
pub mod tax;

pub use fiscal_year::{FiscalYear, InsuranceCeiling, NewFiscalYear};
pub use period::{FinancialPeriod, NewFinancialPeriod};
pub use tax::{NewTaxLevel, TaxLevel};
