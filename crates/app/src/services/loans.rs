//! Employee loans.

use std::sync::Arc;

use hrpay_auth::{
    PermissionGuard, Principal, ScopedList, can_access_employee, scope_across_organizations,
    scope_to_organization,
};
use hrpay_core::{DomainError, DomainResult, EmployeeId, LoanId, OrganizationId};
use hrpay_loans::{EmployeeLoan, NewEmployeeLoan};

use crate::catalog::LOAN;
use crate::state::AppState;

pub struct LoanService {
    state: Arc<AppState>,
}

impl LoanService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn grant(&self, principal: &Principal, new: NewEmployeeLoan) -> DomainResult<EmployeeLoan> {
        self.state.employees.require(new.employee_id)?;
        self.state.organizations.require(new.organization_id)?;
        PermissionGuard::new(LOAN.add()).check_organization(
            &self.state.authorizer(),
            principal,
            new.organization_id,
        )?;
        let loan = EmployeeLoan::create(new)?;
        self.state.loans.insert(loan.clone());
        Ok(loan)
    }

    pub fn settle(&self, principal: &Principal, id: LoanId) -> DomainResult<EmployeeLoan> {
        let mut loan = self.state.loans.require(id)?;
        PermissionGuard::new(LOAN.change()).check(
            &self.state.authorizer(),
            principal,
            &loan,
            |l| l.organization_id,
        )?;
        loan.settle()?;
        self.state.loans.update(loan.clone())?;
        Ok(loan)
    }

    pub fn delete(&self, principal: &Principal, id: LoanId) -> DomainResult<()> {
        let loan = self.state.loans.require(id)?;
        PermissionGuard::new(LOAN.delete()).check(
            &self.state.authorizer(),
            principal,
            &loan,
            |l| l.organization_id,
        )?;
        self.state.loans.remove(id)
    }

    pub fn loans(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<EmployeeLoan>> {
        let authorizer = self.state.authorizer();
        let rows = self.state.loans.list();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                Ok(scope_to_organization(
                    &authorizer,
                    principal,
                    org,
                    &LOAN.view(),
                    rows,
                    |l| l.organization_id,
                ))
            }
            None => Ok(scope_across_organizations(
                &authorizer,
                principal,
                self.state.organizations.ids(),
                &LOAN.view(),
                rows,
                |l| l.organization_id,
            )),
        }
    }

    pub fn loans_for_employee(
        &self,
        principal: &Principal,
        employee: EmployeeId,
    ) -> DomainResult<Vec<EmployeeLoan>> {
        self.state.employees.require(employee)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(employee);
        if !can_access_employee(&authorizer, principal, organizations, &LOAN.view()) {
            return Err(DomainError::Unauthorized);
        }
        Ok(self.state.loans.for_employee(employee))
    }
}
