//! Organization and membership stores.

use hrpay_core::{DomainError, DomainResult, EmployeeId, MembershipId, OrganizationId};
use hrpay_organizations::{EmployeeOrganization, Organization};

use crate::table::InMemoryTable;

/// Organization table with the platform-wide uniqueness rules.
#[derive(Debug, Default)]
pub struct OrganizationStore {
    table: InMemoryTable<OrganizationId, Organization>,
}

impl OrganizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, organization: Organization) -> DomainResult<()> {
        self.ensure_unique(&organization)?;
        self.table.insert(organization.id, organization);
        Ok(())
    }

    pub fn update(&self, organization: Organization) -> DomainResult<()> {
        if self.table.get(&organization.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.ensure_unique(&organization)?;
        self.table.insert(organization.id, organization);
        Ok(())
    }

    fn ensure_unique(&self, candidate: &Organization) -> DomainResult<()> {
        if self
            .table
            .any(|o| o.id != candidate.id && o.name == candidate.name)
        {
            return Err(DomainError::conflict(format!(
                "organization '{}' already exists",
                candidate.name
            )));
        }
        if let Some(code) = &candidate.code {
            if self
                .table
                .any(|o| o.id != candidate.id && o.code.as_deref() == Some(code))
            {
                return Err(DomainError::conflict(format!(
                    "organization code '{code}' already exists"
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: OrganizationId) -> Option<Organization> {
        self.table.get(&id)
    }

    /// Fetch-or-404: callers resolve the organization before authorizing.
    pub fn require(&self, id: OrganizationId) -> DomainResult<Organization> {
        self.get(id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<Organization> {
        let mut rows = self.table.all();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    pub fn ids(&self) -> Vec<OrganizationId> {
        self.table.all().into_iter().map(|o| o.id).collect()
    }

    pub fn remove(&self, id: OrganizationId) -> DomainResult<Organization> {
        self.table.remove(&id).ok_or(DomainError::NotFound)
    }
}

/// Employee-to-organization membership windows.
#[derive(Debug, Default)]
pub struct MembershipStore {
    table: InMemoryTable<MembershipId, EmployeeOrganization>,
}

impl MembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after checking the overlap rule against persisted siblings.
    pub fn insert(&self, membership: EmployeeOrganization) -> DomainResult<()> {
        let siblings = self.for_employee(membership.employee_id);
        membership.ensure_no_overlap(siblings.iter())?;
        self.table.insert(membership.id, membership);
        Ok(())
    }

    pub fn update(&self, membership: EmployeeOrganization) -> DomainResult<()> {
        if self.table.get(&membership.id).is_none() {
            return Err(DomainError::NotFound);
        }
        let siblings = self.for_employee(membership.employee_id);
        membership.ensure_no_overlap(siblings.iter())?;
        self.table.insert(membership.id, membership);
        Ok(())
    }

    pub fn require(&self, id: MembershipId) -> DomainResult<EmployeeOrganization> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn for_employee(&self, employee: EmployeeId) -> Vec<EmployeeOrganization> {
        self.table.filter(|m| m.employee_id == employee)
    }

    /// The organizations an employee belongs to, for employee-anchored
    /// authorization.
    pub fn organizations_of(&self, employee: EmployeeId) -> Vec<OrganizationId> {
        self.for_employee(employee)
            .into_iter()
            .map(|m| m.organization_id)
            .collect()
    }

    pub fn for_organization(&self, organization: OrganizationId) -> Vec<EmployeeOrganization> {
        self.table.filter(|m| m.organization_id == organization)
    }

    pub fn remove(&self, id: MembershipId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_organization(&self, organization: OrganizationId) {
        let before = self.table.len();
        self.table.retain(|m| m.organization_id != organization);
        tracing::debug!(%organization, removed = before - self.table.len(), "purged memberships");
    }
}
