//! Organization and membership administration.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use hrpay_auth::{
    PermissionGuard, Principal, RoleDirectory, ScopedList, can_access_employee,
    scope_across_organizations, scope_to_organization,
};
use hrpay_core::{DateRange, DomainError, DomainResult, EmployeeId, MembershipId, OrganizationId};
use hrpay_organizations::{EmployeeOrganization, NewOrganization, Organization};

use crate::catalog::{EMPLOYEE_ORGANIZATION, ORGANIZATION};
use crate::state::AppState;

pub struct OrganizationService {
    state: Arc<AppState>,
}

impl OrganizationService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Create a new tenant. This is a platform-level action: the permission
    /// is consulted globally since no organization exists to scope it to.
    pub fn create(&self, principal: &Principal, new: NewOrganization) -> DomainResult<Organization> {
        let account = principal.account().ok_or(DomainError::Unauthorized)?;
        if !account.has_global_perm(&ORGANIZATION.add()) {
            return Err(DomainError::Unauthorized);
        }
        let organization = Organization::create(new)?;
        self.state.organizations.insert(organization.clone())?;
        info!(organization = %organization.id, name = %organization.name, "organization created");
        Ok(organization)
    }

    pub fn rename(
        &self,
        principal: &Principal,
        id: OrganizationId,
        name: impl Into<String>,
    ) -> DomainResult<Organization> {
        let mut organization = self.state.organizations.require(id)?;
        PermissionGuard::new(ORGANIZATION.change()).check_organization(
            &self.state.authorizer(),
            principal,
            organization.id,
        )?;
        organization.rename(name)?;
        self.state.organizations.update(organization.clone())?;
        Ok(organization)
    }

    pub fn set_active(
        &self,
        principal: &Principal,
        id: OrganizationId,
        active: bool,
    ) -> DomainResult<Organization> {
        let mut organization = self.state.organizations.require(id)?;
        PermissionGuard::new(ORGANIZATION.change()).check_organization(
            &self.state.authorizer(),
            principal,
            organization.id,
        )?;
        if active {
            organization.activate();
        } else {
            organization.deactivate();
        }
        self.state.organizations.update(organization.clone())?;
        Ok(organization)
    }

    /// Delete the organization and every record scoped to it, across all
    /// stores and the role directory.
    pub fn delete(&self, principal: &Principal, id: OrganizationId) -> DomainResult<()> {
        let organization = self.state.organizations.require(id)?;
        PermissionGuard::new(ORGANIZATION.delete()).check_organization(
            &self.state.authorizer(),
            principal,
            organization.id,
        )?;

        self.state.directory.purge_organization(id);
        self.state.memberships.purge_organization(id);
        self.state.departments.purge_organization(id);
        self.state.job_titles.purge_organization(id);
        self.state.histories.purge_organization(id);
        self.state.work_records.purge_organization(id);
        self.state.loans.purge_organization(id);
        self.state.salary_item_types.purge_organization(id);

        // Settings cascade runs year -> period -> period-scoped rows.
        let years = self.state.fiscal_years.purge_organization(id);
        let periods = self.state.financial_periods.purge_years(&years);
        self.state.insurance_ceilings.purge_years(&years);
        self.state.tax_levels.purge_years(&years);
        self.state.salary_items.purge_periods(&periods);

        self.state.organizations.remove(id)?;
        info!(organization = %id, "organization deleted with cascade");
        Ok(())
    }

    /// Detail fetch follows queryset semantics: an organization the principal
    /// may not view is indistinguishable from a missing one.
    pub fn get(&self, principal: &Principal, id: OrganizationId) -> DomainResult<Organization> {
        let organization = self.state.organizations.require(id)?;
        let authorizer = self.state.authorizer();
        if !authorizer.has_permission(principal, id, &ORGANIZATION.view()) {
            return Err(DomainError::NotFound);
        }
        Ok(organization)
    }

    pub fn list(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<Organization>> {
        let authorizer = self.state.authorizer();
        let rows = self.state.organizations.list();
        match organization {
            Some(id) => {
                self.state.organizations.require(id)?;
                Ok(scope_to_organization(
                    &authorizer,
                    principal,
                    id,
                    &ORGANIZATION.view(),
                    rows,
                    |o| o.id,
                ))
            }
            None => {
                let ids = self.state.organizations.ids();
                Ok(scope_across_organizations(
                    &authorizer,
                    principal,
                    ids,
                    &ORGANIZATION.view(),
                    rows,
                    |o| o.id,
                ))
            }
        }
    }

    pub fn add_membership(
        &self,
        principal: &Principal,
        employee: EmployeeId,
        organization: OrganizationId,
        period: DateRange,
    ) -> DomainResult<EmployeeOrganization> {
        self.state.employees.require(employee)?;
        self.state.organizations.require(organization)?;
        PermissionGuard::new(EMPLOYEE_ORGANIZATION.add()).check_organization(
            &self.state.authorizer(),
            principal,
            organization,
        )?;
        let membership = EmployeeOrganization::new(employee, organization, period);
        self.state.memberships.insert(membership.clone())?;
        Ok(membership)
    }

    pub fn close_membership(
        &self,
        principal: &Principal,
        id: MembershipId,
        end: NaiveDate,
    ) -> DomainResult<EmployeeOrganization> {
        let mut membership = self.state.memberships.require(id)?;
        PermissionGuard::new(EMPLOYEE_ORGANIZATION.change()).check(
            &self.state.authorizer(),
            principal,
            &membership,
            |m| m.organization_id,
        )?;
        membership.close(end)?;
        self.state.memberships.update(membership.clone())?;
        Ok(membership)
    }

    pub fn remove_membership(&self, principal: &Principal, id: MembershipId) -> DomainResult<()> {
        let membership = self.state.memberships.require(id)?;
        PermissionGuard::new(EMPLOYEE_ORGANIZATION.delete()).check(
            &self.state.authorizer(),
            principal,
            &membership,
            |m| m.organization_id,
        )?;
        self.state.memberships.remove(id)
    }

    /// Membership windows of one employee, authorized through any of the
    /// employee's organizations.
    pub fn memberships_for_employee(
        &self,
        principal: &Principal,
        employee: EmployeeId,
    ) -> DomainResult<Vec<EmployeeOrganization>> {
        self.state.employees.require(employee)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(employee);
        if !can_access_employee(&authorizer, principal, organizations, &EMPLOYEE_ORGANIZATION.view()) {
            return Err(DomainError::Unauthorized);
        }
        Ok(self.state.memberships.for_employee(employee))
    }
}
