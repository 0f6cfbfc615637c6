//! Role/assignment persistence seam.
//!
//! The authorizer re-reads the directory on every check: there is no cache to
//! invalidate, so revoking a role or permission takes effect on the next call.

use std::collections::HashMap;
use std::sync::RwLock;

use hrpay_core::{AssignmentId, DomainError, DomainResult, OrganizationId, RoleId, UserId};

use crate::role::{OrganizationRole, UserOrganizationRole};

/// Storage contract for organization roles and their user assignments.
pub trait RoleDirectory: Send + Sync {
    /// All roles assigned to `user` within `organization`.
    fn roles_for(&self, user: UserId, organization: OrganizationId) -> Vec<OrganizationRole>;

    fn role(&self, id: RoleId) -> Option<OrganizationRole>;

    fn roles_in(&self, organization: OrganizationId) -> Vec<OrganizationRole>;

    /// Insert a role. Fails with `Conflict` if the name is taken within the
    /// role's organization.
    fn insert_role(&self, role: OrganizationRole) -> DomainResult<()>;

    /// Replace an existing role (same id). The organization cannot change.
    fn update_role(&self, role: OrganizationRole) -> DomainResult<()>;

    /// Delete a role, cascading to every assignment that references it.
    fn delete_role(&self, id: RoleId) -> DomainResult<()>;

    /// Record an assignment. Fails if the role does not exist or belongs to a
    /// different organization than the assignment.
    fn assign(&self, assignment: UserOrganizationRole) -> DomainResult<()>;

    fn revoke(&self, id: AssignmentId) -> DomainResult<()>;

    fn assignments_for(&self, user: UserId) -> Vec<UserOrganizationRole>;

    fn assignments_in(&self, organization: OrganizationId) -> Vec<UserOrganizationRole>;

    /// Drop every role and assignment scoped to `organization` (cascade on
    /// organization delete).
    fn purge_organization(&self, organization: OrganizationId);
}

/// In-memory directory for tests/dev, a stand-in for the relational store.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    roles: RwLock<HashMap<RoleId, OrganizationRole>>,
    assignments: RwLock<HashMap<AssignmentId, UserOrganizationRole>>,
}

impl InMemoryRoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleDirectory for InMemoryRoleDirectory {
    fn roles_for(&self, user: UserId, organization: OrganizationId) -> Vec<OrganizationRole> {
        let assignments = match self.assignments.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };
        let roles = match self.roles.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };

        assignments
            .values()
            .filter(|a| a.user_id == user && a.organization_id == organization)
            .filter_map(|a| roles.get(&a.role_id).cloned())
            .collect()
    }

    fn role(&self, id: RoleId) -> Option<OrganizationRole> {
        self.roles.read().ok()?.get(&id).cloned()
    }

    fn roles_in(&self, organization: OrganizationId) -> Vec<OrganizationRole> {
        let roles = match self.roles.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };
        roles
            .values()
            .filter(|r| r.organization_id == organization)
            .cloned()
            .collect()
    }

    fn insert_role(&self, role: OrganizationRole) -> DomainResult<()> {
        let mut roles = self.roles.write().map_err(|_| poisoned())?;
        let name_taken = roles
            .values()
            .any(|r| r.organization_id == role.organization_id && r.name == role.name);
        if name_taken {
            return Err(DomainError::conflict(format!(
                "role '{}' already exists in this organization",
                role.name
            )));
        }
        roles.insert(role.id, role);
        Ok(())
    }

    fn update_role(&self, role: OrganizationRole) -> DomainResult<()> {
        let mut roles = self.roles.write().map_err(|_| poisoned())?;
        let existing = roles.get(&role.id).ok_or(DomainError::NotFound)?;
        if existing.organization_id != role.organization_id {
            return Err(DomainError::invariant(
                "a role cannot be moved to another organization",
            ));
        }
        let name_taken = roles.values().any(|r| {
            r.id != role.id && r.organization_id == role.organization_id && r.name == role.name
        });
        if name_taken {
            return Err(DomainError::conflict(format!(
                "role '{}' already exists in this organization",
                role.name
            )));
        }
        roles.insert(role.id, role);
        Ok(())
    }

    fn delete_role(&self, id: RoleId) -> DomainResult<()> {
        let mut roles = self.roles.write().map_err(|_| poisoned())?;
        if roles.remove(&id).is_none() {
            return Err(DomainError::NotFound);
        }
        drop(roles);

        if let Ok(mut assignments) = self.assignments.write() {
            assignments.retain(|_, a| a.role_id != id);
        }
        Ok(())
    }

    fn assign(&self, assignment: UserOrganizationRole) -> DomainResult<()> {
        let roles = self.roles.read().map_err(|_| poisoned())?;
        let role = roles.get(&assignment.role_id).ok_or(DomainError::NotFound)?;
        if role.organization_id != assignment.organization_id {
            return Err(DomainError::invariant(
                "assigned role belongs to a different organization",
            ));
        }
        drop(roles);

        let mut assignments = self.assignments.write().map_err(|_| poisoned())?;
        let duplicate = assignments.values().any(|a| {
            a.user_id == assignment.user_id
                && a.organization_id == assignment.organization_id
                && a.role_id == assignment.role_id
        });
        if duplicate {
            return Err(DomainError::conflict(
                "user already holds this role in this organization",
            ));
        }
        assignments.insert(assignment.id, assignment);
        Ok(())
    }

    fn revoke(&self, id: AssignmentId) -> DomainResult<()> {
        let mut assignments = self.assignments.write().map_err(|_| poisoned())?;
        assignments.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn assignments_for(&self, user: UserId) -> Vec<UserOrganizationRole> {
        let assignments = match self.assignments.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };
        assignments.values().filter(|a| a.user_id == user).copied().collect()
    }

    fn assignments_in(&self, organization: OrganizationId) -> Vec<UserOrganizationRole> {
        let assignments = match self.assignments.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };
        assignments
            .values()
            .filter(|a| a.organization_id == organization)
            .copied()
            .collect()
    }

    fn purge_organization(&self, organization: OrganizationId) {
        if let Ok(mut roles) = self.roles.write() {
            roles.retain(|_, r| r.organization_id != organization);
        }
        if let Ok(mut assignments) = self.assignments.write() {
            assignments.retain(|_, a| a.organization_id != organization);
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::conflict("role directory lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Permission;

    fn role(org: OrganizationId, name: &str) -> OrganizationRole {
        OrganizationRole::new(org, name, None, [Permission::view("hr", "department")]).unwrap()
    }

    #[test]
    fn role_names_unique_per_organization() {
        let dir = InMemoryRoleDirectory::new();
        let org_a = OrganizationId::new();
        let org_b = OrganizationId::new();

        dir.insert_role(role(org_a, "HR-Editor")).unwrap();
        // Same name in another organization is fine.
        dir.insert_role(role(org_b, "HR-Editor")).unwrap();

        let err = dir.insert_role(role(org_a, "HR-Editor")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn assignment_requires_matching_organization() {
        let dir = InMemoryRoleDirectory::new();
        let org_a = OrganizationId::new();
        let org_b = OrganizationId::new();
        let r = role(org_a, "HR-Editor");
        let role_id = r.id;
        dir.insert_role(r).unwrap();

        let err = dir
            .assign(UserOrganizationRole::new(UserId::new(), org_b, role_id))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn duplicate_assignment_rejected() {
        let dir = InMemoryRoleDirectory::new();
        let org = OrganizationId::new();
        let user = UserId::new();
        let r = role(org, "HR-Editor");
        let role_id = r.id;
        dir.insert_role(r).unwrap();

        dir.assign(UserOrganizationRole::new(user, org, role_id)).unwrap();
        let err = dir
            .assign(UserOrganizationRole::new(user, org, role_id))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn deleting_role_cascades_assignments() {
        let dir = InMemoryRoleDirectory::new();
        let org = OrganizationId::new();
        let user = UserId::new();
        let r = role(org, "HR-Editor");
        let role_id = r.id;
        dir.insert_role(r).unwrap();
        dir.assign(UserOrganizationRole::new(user, org, role_id)).unwrap();

        dir.delete_role(role_id).unwrap();
        assert!(dir.assignments_for(user).is_empty());
        assert!(dir.roles_for(user, org).is_empty());
    }

    #[test]
    fn purge_organization_drops_roles_and_assignments() {
        let dir = InMemoryRoleDirectory::new();
        let org = OrganizationId::new();
        let other = OrganizationId::new();
        let user = UserId::new();

        let r = role(org, "HR-Editor");
        let role_id = r.id;
        dir.insert_role(r).unwrap();
        dir.assign(UserOrganizationRole::new(user, org, role_id)).unwrap();

        let keep = role(other, "Keeper");
        let keep_id = keep.id;
        dir.insert_role(keep).unwrap();

        dir.purge_organization(org);
        assert!(dir.role(role_id).is_none());
        assert!(dir.assignments_for(user).is_empty());
        assert!(dir.role(keep_id).is_some());
    }

    #[test]
    fn role_cannot_move_between_organizations() {
        let dir = InMemoryRoleDirectory::new();
        let org = OrganizationId::new();
        let r = role(org, "HR-Editor");
        dir.insert_role(r.clone()).unwrap();

        let mut moved = r;
        moved.organization_id = OrganizationId::new();
        let err = dir.update_role(moved).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
