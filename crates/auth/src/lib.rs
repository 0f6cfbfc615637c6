//! `hrpay-auth` — organization-scoped authorization boundary.
//!
//! This crate answers one question: *can user U perform permission P inside
//! organization O?* It combines the platform-wide staff/superuser bypass with
//! role assignments scoped to a single organization, and derives the list
//! filters every "show me what I may see" query is built from.
//!
//! The crate is intentionally decoupled from HTTP and storage: the only seam
//! to persistence is the [`RoleDirectory`] trait, re-read on every check so
//! revocations take effect immediately.

pub mod authorize;
pub mod directory;
pub mod guard;
pub mod permission;
pub mod principal;
pub mod role;
pub mod scope;

pub use authorize::{Authorizer, AuthzError};
pub use directory::{InMemoryRoleDirectory, RoleDirectory};
pub use guard::PermissionGuard;
pub use permission::Permission;
pub use principal::{Principal, UserAccount};
pub use role::{OrganizationRole, UserOrganizationRole};
pub use scope::{
    ScopedList, can_access_employee, scope_across_organizations, scope_to_organization,
    visible_organizations,
};
