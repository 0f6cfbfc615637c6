//! Employee records and bank accounts.
//!
//! Employees are platform-wide records reached through their organization
//! memberships, so access checks here are employee-anchored: any membership
//! organization where the principal holds the permission opens the record.

use std::sync::Arc;

use chrono::NaiveDate;

use hrpay_auth::{Principal, ScopedList, can_access_employee, visible_organizations};
use hrpay_core::{BankAccountId, DomainError, DomainResult, EmployeeId, OrganizationId};
use hrpay_employees::{BankAccount, Employee, NewBankAccount, NewEmployee};

use crate::catalog::{BANK_ACCOUNT, EMPLOYEE};
use crate::state::AppState;

pub struct EmployeeService {
    state: Arc<AppState>,
}

impl EmployeeService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// A new employee has no memberships yet, so creation is allowed to staff
    /// and to anyone holding the add permission in at least one organization.
    pub fn create(&self, principal: &Principal, new: NewEmployee) -> DomainResult<Employee> {
        if principal.account().is_none() {
            return Err(DomainError::Unauthorized);
        }
        let authorizer = self.state.authorizer();
        let allowed = principal.is_bypass()
            || !visible_organizations(
                &authorizer,
                principal,
                self.state.organizations.ids(),
                &EMPLOYEE.add(),
            )
            .is_empty();
        if !allowed {
            return Err(DomainError::Unauthorized);
        }
        let employee = Employee::create(new)?;
        self.state.employees.insert(employee.clone())?;
        Ok(employee)
    }

    /// Queryset semantics: an employee the principal may not view is
    /// indistinguishable from a missing one.
    pub fn get(&self, principal: &Principal, id: EmployeeId) -> DomainResult<Employee> {
        let employee = self.state.employees.require(id)?;
        if !self.can_access(principal, id, false) {
            return Err(DomainError::NotFound);
        }
        Ok(employee)
    }

    pub fn list(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<Employee>> {
        let authorizer = self.state.authorizer();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                if !authorizer.has_permission(principal, org, &EMPLOYEE.view()) {
                    return Ok(ScopedList::denied(&EMPLOYEE.view()));
                }
                let members: Vec<EmployeeId> = self
                    .state
                    .memberships
                    .for_organization(org)
                    .into_iter()
                    .map(|m| m.employee_id)
                    .collect();
                let rows = self
                    .state
                    .employees
                    .list()
                    .into_iter()
                    .filter(|e| members.contains(&e.id))
                    .collect();
                Ok(ScopedList::granted(rows))
            }
            None => {
                let rows = self
                    .state
                    .employees
                    .list()
                    .into_iter()
                    .filter(|e| self.can_access(principal, e.id, false))
                    .collect();
                Ok(ScopedList::granted(rows))
            }
        }
    }

    pub fn terminate(
        &self,
        principal: &Principal,
        id: EmployeeId,
        date: NaiveDate,
    ) -> DomainResult<Employee> {
        let mut employee = self.state.employees.require(id)?;
        if !self.can_access(principal, id, true) {
            return Err(DomainError::Unauthorized);
        }
        employee.terminate(date)?;
        self.state.employees.update(employee.clone())?;
        Ok(employee)
    }

    pub fn add_bank_account(
        &self,
        principal: &Principal,
        new: NewBankAccount,
    ) -> DomainResult<BankAccount> {
        self.state.employees.require(new.employee_id)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(new.employee_id);
        if !can_access_employee(&authorizer, principal, organizations, &BANK_ACCOUNT.add()) {
            return Err(DomainError::Unauthorized);
        }
        let account = BankAccount::create(new)?;
        self.state.bank_accounts.insert(account.clone())?;
        Ok(account)
    }

    pub fn bank_accounts(
        &self,
        principal: &Principal,
        employee: EmployeeId,
    ) -> DomainResult<Vec<BankAccount>> {
        self.state.employees.require(employee)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(employee);
        if !can_access_employee(&authorizer, principal, organizations, &BANK_ACCOUNT.view()) {
            return Err(DomainError::Unauthorized);
        }
        Ok(self.state.bank_accounts.for_employee(employee))
    }

    pub fn remove_bank_account(
        &self,
        principal: &Principal,
        id: BankAccountId,
    ) -> DomainResult<()> {
        let account = self.state.bank_accounts.require(id)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(account.employee_id);
        if !can_access_employee(&authorizer, principal, organizations, &BANK_ACCOUNT.delete()) {
            return Err(DomainError::Unauthorized);
        }
        self.state.bank_accounts.remove(id)
    }

    fn can_access(&self, principal: &Principal, employee: EmployeeId, change: bool) -> bool {
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(employee);
        let required = if change { EMPLOYEE.change() } else { EMPLOYEE.view() };
        can_access_employee(&authorizer, principal, organizations, &required)
    }
}
