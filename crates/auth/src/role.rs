//! Organization-scoped roles and their assignment to users.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use hrpay_core::{AssignmentId, DomainError, DomainResult, Entity, OrganizationId, RoleId, UserId};

use crate::Permission;

/// A named, reusable bundle of permissions scoped to exactly one organization.
///
/// Role names are unique within their organization (enforced by the
/// directory). The permission set may reference any identifier in the
/// platform catalog, not just ones conceptually "belonging" to the
/// organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRole {
    pub id: RoleId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub permissions: HashSet<Permission>,
}

impl OrganizationRole {
    pub fn new(
        organization_id: OrganizationId,
        name: impl Into<String>,
        description: Option<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("role name cannot be empty"));
        }
        Ok(Self {
            id: RoleId::new(),
            organization_id,
            name,
            description,
            permissions: permissions.into_iter().collect(),
        })
    }

    /// Whether this role grants the given permission.
    pub fn grants(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    pub fn grant(&mut self, permission: Permission) {
        self.permissions.insert(permission);
    }

    pub fn revoke(&mut self, permission: &Permission) {
        self.permissions.remove(permission);
    }
}

impl Entity for OrganizationRole {
    type Id = RoleId;

    fn id(&self) -> RoleId {
        self.id
    }
}

/// Assignment of one role to one user within one organization.
///
/// The schema permits several assignments per (user, organization); effective
/// permissions are the union across them. The assignment's organization must
/// match the role's owning organization — the directory rejects mismatches at
/// write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrganizationRole {
    pub id: AssignmentId,
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub role_id: RoleId,
}

impl UserOrganizationRole {
    pub fn new(user_id: UserId, organization_id: OrganizationId, role_id: RoleId) -> Self {
        Self {
            id: AssignmentId::new(),
            user_id,
            organization_id,
            role_id,
        }
    }
}

impl Entity for UserOrganizationRole {
    type Id = AssignmentId;

    fn id(&self) -> AssignmentId {
        self.id
    }
}
