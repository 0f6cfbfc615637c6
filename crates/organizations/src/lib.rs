//! Organizations domain module.
//!
//! The organization is the tenant boundary: every other record in the system
//! is scoped to one, directly or through a foreign-key chain. This crate also
//! holds the employee-to-organization membership windows that employee-level
//! authorization iterates over.

pub mod membership;
pub mod organization;

pub use membership::EmployeeOrganization;
pub use organization::{NewOrganization, Organization};
