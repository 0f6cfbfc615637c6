//! `hrpay-app` — application services over the domain crates.
//!
//! This is the presentation-layer contract without the presentation: each
//! service resolves ids, runs the permission guard on mutations, and applies
//! scoped query filtering to lists. An HTTP or desktop frontend would call
//! these services one-to-one.

pub mod catalog;
pub mod services;
pub mod state;

pub use services::employees::EmployeeService;
pub use services::hr::HrService;
pub use services::loans::LoanService;
pub use services::organizations::OrganizationService;
pub use services::roles::RoleService;
pub use services::salaries::SalaryService;
pub use services::settings::SettingsService;
pub use state::AppState;
