//! Reusable per-operation authorization guard.
//!
//! Every mutating service method states its requirement once — a permission
//! plus a way to locate the owning organization on the resource — instead of
//! re-deriving the check inline per entity.

use hrpay_core::OrganizationId;

use crate::authorize::{Authorizer, AuthzError};
use crate::permission::Permission;
use crate::principal::Principal;

/// A required permission bound to an organization extractor.
#[derive(Debug, Clone)]
pub struct PermissionGuard {
    required: Permission,
}

impl PermissionGuard {
    pub fn new(required: Permission) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &Permission {
        &self.required
    }

    /// Check against an organization already in hand.
    pub fn check_organization(
        &self,
        authorizer: &Authorizer<'_>,
        principal: &Principal,
        organization: OrganizationId,
    ) -> Result<(), AuthzError> {
        authorizer.require(principal, organization, &self.required)
    }

    /// Check against the organization located on a resource.
    pub fn check<R>(
        &self,
        authorizer: &Authorizer<'_>,
        principal: &Principal,
        resource: &R,
        organization_of: impl Fn(&R) -> OrganizationId,
    ) -> Result<(), AuthzError> {
        self.check_organization(authorizer, principal, organization_of(resource))
    }
}
