//! Role and assignment administration.
//!
//! Mirrors the platform's user-management screens: only staff/superusers may
//! shape who holds which role where. Regular organization members never
//! administer roles, no matter which permissions they hold.

use std::sync::Arc;

use tracing::info;

use hrpay_auth::{OrganizationRole, Permission, Principal, RoleDirectory, UserOrganizationRole};
use hrpay_core::{AssignmentId, DomainResult, OrganizationId, RoleId, UserId};

use crate::services::require_staff;
use crate::state::AppState;

pub struct RoleService {
    state: Arc<AppState>,
}

impl RoleService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn create_role(
        &self,
        principal: &Principal,
        organization: OrganizationId,
        name: impl Into<String>,
        description: Option<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> DomainResult<OrganizationRole> {
        require_staff(principal)?;
        self.state.organizations.require(organization)?;
        let role = OrganizationRole::new(organization, name, description, permissions)?;
        self.state.directory.insert_role(role.clone())?;
        info!(role = %role.id, %organization, name = %role.name, "role created");
        Ok(role)
    }

    pub fn update_role(&self, principal: &Principal, role: OrganizationRole) -> DomainResult<()> {
        require_staff(principal)?;
        self.state.directory.update_role(role)
    }

    /// Deleting a role also deletes every assignment referencing it.
    pub fn delete_role(&self, principal: &Principal, id: RoleId) -> DomainResult<()> {
        require_staff(principal)?;
        self.state.directory.delete_role(id)
    }

    pub fn assign(
        &self,
        principal: &Principal,
        user: UserId,
        organization: OrganizationId,
        role: RoleId,
    ) -> DomainResult<UserOrganizationRole> {
        require_staff(principal)?;
        self.state.organizations.require(organization)?;
        let assignment = UserOrganizationRole::new(user, organization, role);
        self.state.directory.assign(assignment)?;
        Ok(assignment)
    }

    pub fn revoke(&self, principal: &Principal, id: AssignmentId) -> DomainResult<()> {
        require_staff(principal)?;
        self.state.directory.revoke(id)
    }

    pub fn roles_in(
        &self,
        principal: &Principal,
        organization: OrganizationId,
    ) -> DomainResult<Vec<OrganizationRole>> {
        require_staff(principal)?;
        self.state.organizations.require(organization)?;
        Ok(self.state.directory.roles_in(organization))
    }

    pub fn assignments_in(
        &self,
        principal: &Principal,
        organization: OrganizationId,
    ) -> DomainResult<Vec<UserOrganizationRole>> {
        require_staff(principal)?;
        self.state.organizations.require(organization)?;
        Ok(self.state.directory.assignments_in(organization))
    }
}
