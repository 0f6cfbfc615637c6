//! Salary item definitions and per-employee amounts.

use std::sync::Arc;

use hrpay_auth::{
    PermissionGuard, Principal, ScopedList, can_access_employee, scope_across_organizations,
    scope_to_organization,
};
use hrpay_core::{DomainError, DomainResult, EmployeeId, OrganizationId, SalaryItemId, SalaryItemTypeId};
use hrpay_salaries::{EmployeeSalaryItem, NewEmployeeSalaryItem, NewSalaryItemType, SalaryItemType};

use crate::catalog::{SALARY_ITEM, SALARY_ITEM_TYPE};
use crate::state::AppState;

pub struct SalaryService {
    state: Arc<AppState>,
}

impl SalaryService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn define_item_type(
        &self,
        principal: &Principal,
        new: NewSalaryItemType,
    ) -> DomainResult<SalaryItemType> {
        self.state.organizations.require(new.organization_id)?;
        let period = self.state.financial_periods.require(new.financial_period_id)?;
        let year = self.state.fiscal_years.require(period.fiscal_year_id)?;
        if year.organization_id != new.organization_id {
            return Err(DomainError::invariant(
                "financial period belongs to a different organization",
            ));
        }
        PermissionGuard::new(SALARY_ITEM_TYPE.add()).check_organization(
            &self.state.authorizer(),
            principal,
            new.organization_id,
        )?;
        let item_type = SalaryItemType::create(new)?;
        self.state.salary_item_types.insert(item_type.clone())?;
        Ok(item_type)
    }

    /// Assigned amounts referencing the definition are deleted with it.
    pub fn delete_item_type(
        &self,
        principal: &Principal,
        id: SalaryItemTypeId,
    ) -> DomainResult<()> {
        let item_type = self.state.salary_item_types.require(id)?;
        PermissionGuard::new(SALARY_ITEM_TYPE.delete()).check(
            &self.state.authorizer(),
            principal,
            &item_type,
            |t| t.organization_id,
        )?;
        self.state.salary_items.purge_type(id);
        self.state.salary_item_types.remove(id)
    }

    pub fn item_types(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<SalaryItemType>> {
        let authorizer = self.state.authorizer();
        let rows = self.state.salary_item_types.list();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                Ok(scope_to_organization(
                    &authorizer,
                    principal,
                    org,
                    &SALARY_ITEM_TYPE.view(),
                    rows,
                    |t| t.organization_id,
                ))
            }
            None => Ok(scope_across_organizations(
                &authorizer,
                principal,
                self.state.organizations.ids(),
                &SALARY_ITEM_TYPE.view(),
                rows,
                |t| t.organization_id,
            )),
        }
    }

    pub fn assign_item(
        &self,
        principal: &Principal,
        new: NewEmployeeSalaryItem,
    ) -> DomainResult<EmployeeSalaryItem> {
        self.state.employees.require(new.employee_id)?;
        let item_type = self.state.salary_item_types.require(new.salary_item_type_id)?;
        if item_type.financial_period_id != new.financial_period_id {
            return Err(DomainError::invariant(
                "salary item type is defined for a different financial period",
            ));
        }
        PermissionGuard::new(SALARY_ITEM.add()).check_organization(
            &self.state.authorizer(),
            principal,
            item_type.organization_id,
        )?;
        let item = EmployeeSalaryItem::create(new)?;
        self.state.salary_items.insert(item.clone())?;
        Ok(item)
    }

    pub fn remove_item(&self, principal: &Principal, id: SalaryItemId) -> DomainResult<()> {
        let item = self.state.salary_items.require(id)?;
        let item_type = self.state.salary_item_types.require(item.salary_item_type_id)?;
        PermissionGuard::new(SALARY_ITEM.delete()).check_organization(
            &self.state.authorizer(),
            principal,
            item_type.organization_id,
        )?;
        self.state.salary_items.remove(id)
    }

    pub fn items_for_employee(
        &self,
        principal: &Principal,
        employee: EmployeeId,
    ) -> DomainResult<Vec<EmployeeSalaryItem>> {
        self.state.employees.require(employee)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(employee);
        if !can_access_employee(&authorizer, principal, organizations, &SALARY_ITEM.view()) {
            return Err(DomainError::Unauthorized);
        }
        Ok(self.state.salary_items.for_employee(employee))
    }
}
