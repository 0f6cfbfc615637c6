//! Departments, job titles, employment history and work records.

use std::sync::Arc;

use hrpay_auth::{
    PermissionGuard, Principal, ScopedList, can_access_employee, scope_across_organizations,
    scope_to_organization, visible_organizations,
};
use hrpay_core::{
    DepartmentId, DomainError, DomainResult, EmployeeId, EmploymentHistoryId, JobTitleId,
    OrganizationId, WorkRecordId,
};
use hrpay_hr::{
    Department, EmploymentHistory, JobTitle, MonthlyWorkRecord, NewDepartment,
    NewEmploymentHistory, NewJobTitle, NewMonthlyWorkRecord, WorkFigures,
};

use crate::catalog::{DEPARTMENT, EMPLOYMENT_HISTORY, JOB_TITLE, WORK_RECORD};
use crate::services::require_staff;
use crate::state::AppState;

pub struct HrService {
    state: Arc<AppState>,
}

impl HrService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    // --- departments ---

    pub fn create_department(
        &self,
        principal: &Principal,
        new: NewDepartment,
    ) -> DomainResult<Department> {
        self.state.organizations.require(new.organization_id)?;
        PermissionGuard::new(DEPARTMENT.add()).check_organization(
            &self.state.authorizer(),
            principal,
            new.organization_id,
        )?;
        let department = Department::create(new)?;
        self.state.departments.insert(department.clone())?;
        Ok(department)
    }

    pub fn rename_department(
        &self,
        principal: &Principal,
        id: DepartmentId,
        name: impl Into<String>,
    ) -> DomainResult<Department> {
        let mut department = self.state.departments.require(id)?;
        PermissionGuard::new(DEPARTMENT.change()).check(
            &self.state.authorizer(),
            principal,
            &department,
            |d| d.organization_id,
        )?;
        department.rename(name)?;
        self.state.departments.update(department.clone())?;
        Ok(department)
    }

    /// History rows keep pointing at their employee; only the department link
    /// is nulled out.
    pub fn delete_department(&self, principal: &Principal, id: DepartmentId) -> DomainResult<()> {
        let department = self.state.departments.require(id)?;
        PermissionGuard::new(DEPARTMENT.delete()).check(
            &self.state.authorizer(),
            principal,
            &department,
            |d| d.organization_id,
        )?;
        self.state.histories.detach_department(id);
        self.state.departments.remove(id)
    }

    pub fn departments(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<Department>> {
        let authorizer = self.state.authorizer();
        let rows = self.state.departments.list();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                Ok(scope_to_organization(
                    &authorizer,
                    principal,
                    org,
                    &DEPARTMENT.view(),
                    rows,
                    |d| d.organization_id,
                ))
            }
            None => Ok(scope_across_organizations(
                &authorizer,
                principal,
                self.state.organizations.ids(),
                &DEPARTMENT.view(),
                rows,
                |d| d.organization_id,
            )),
        }
    }

    // --- job titles ---

    /// Shared titles (no organization) are platform-level and staff-only.
    pub fn create_job_title(&self, principal: &Principal, new: NewJobTitle) -> DomainResult<JobTitle> {
        match new.organization_id {
            Some(org) => {
                self.state.organizations.require(org)?;
                PermissionGuard::new(JOB_TITLE.add()).check_organization(
                    &self.state.authorizer(),
                    principal,
                    org,
                )?;
            }
            None => require_staff(principal)?,
        }
        let title = JobTitle::create(new)?;
        self.state.job_titles.insert(title.clone())?;
        Ok(title)
    }

    pub fn delete_job_title(&self, principal: &Principal, id: JobTitleId) -> DomainResult<()> {
        let title = self.state.job_titles.require(id)?;
        match title.organization_id {
            Some(org) => {
                PermissionGuard::new(JOB_TITLE.delete()).check_organization(
                    &self.state.authorizer(),
                    principal,
                    org,
                )?;
            }
            None => require_staff(principal)?,
        }
        self.state.job_titles.remove(id)
    }

    /// Scoped listings include the shared titles alongside the organization's
    /// own; unscoped listings add them whenever any organization is visible.
    pub fn job_titles(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<JobTitle>> {
        let authorizer = self.state.authorizer();
        let all = self.state.job_titles.list();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                if !authorizer.has_permission(principal, org, &JOB_TITLE.view()) {
                    return Ok(ScopedList::denied(&JOB_TITLE.view()));
                }
                let rows = all
                    .into_iter()
                    .filter(|t| t.is_shared() || t.organization_id == Some(org))
                    .collect();
                Ok(ScopedList::granted(rows))
            }
            None => {
                if principal.is_bypass() {
                    return Ok(ScopedList::granted(all));
                }
                let accepted = visible_organizations(
                    &authorizer,
                    principal,
                    self.state.organizations.ids(),
                    &JOB_TITLE.view(),
                );
                let rows = all
                    .into_iter()
                    .filter(|t| match t.organization_id {
                        Some(org) => accepted.contains(&org),
                        None => !accepted.is_empty(),
                    })
                    .collect();
                Ok(ScopedList::granted(rows))
            }
        }
    }

    // --- employment history ---

    pub fn add_history(
        &self,
        principal: &Principal,
        new: NewEmploymentHistory,
    ) -> DomainResult<EmploymentHistory> {
        self.state.employees.require(new.employee_id)?;
        self.state.organizations.require(new.organization_id)?;
        if let Some(department) = new.department_id {
            let department = self.state.departments.require(department)?;
            if department.organization_id != new.organization_id {
                return Err(DomainError::invariant(
                    "department belongs to a different organization",
                ));
            }
        }
        if let Some(title) = new.job_title_id {
            self.state.job_titles.require(title)?;
        }
        PermissionGuard::new(EMPLOYMENT_HISTORY.add()).check_organization(
            &self.state.authorizer(),
            principal,
            new.organization_id,
        )?;
        let entry = EmploymentHistory::create(new);
        self.state.histories.insert(entry.clone())?;
        Ok(entry)
    }

    pub fn histories_for_employee(
        &self,
        principal: &Principal,
        employee: EmployeeId,
    ) -> DomainResult<Vec<EmploymentHistory>> {
        self.state.employees.require(employee)?;
        let authorizer = self.state.authorizer();
        let organizations = self.state.memberships.organizations_of(employee);
        if !can_access_employee(&authorizer, principal, organizations, &EMPLOYMENT_HISTORY.view()) {
            return Err(DomainError::Unauthorized);
        }
        Ok(self.state.histories.for_employee(employee))
    }

    pub fn delete_history(
        &self,
        principal: &Principal,
        id: EmploymentHistoryId,
    ) -> DomainResult<()> {
        let entry = self.state.histories.require(id)?;
        PermissionGuard::new(EMPLOYMENT_HISTORY.delete()).check(
            &self.state.authorizer(),
            principal,
            &entry,
            |e| e.organization_id,
        )?;
        self.state.histories.remove(id)
    }

    // --- work records ---

    pub fn add_work_record(
        &self,
        principal: &Principal,
        new: NewMonthlyWorkRecord,
    ) -> DomainResult<MonthlyWorkRecord> {
        self.state.employees.require(new.employee_id)?;
        self.state.organizations.require(new.organization_id)?;
        self.state.financial_periods.require(new.financial_period_id)?;
        PermissionGuard::new(WORK_RECORD.add()).check_organization(
            &self.state.authorizer(),
            principal,
            new.organization_id,
        )?;
        let record = MonthlyWorkRecord::create(new)?;
        self.state.work_records.insert(record.clone())?;
        Ok(record)
    }

    pub fn update_work_figures(
        &self,
        principal: &Principal,
        id: WorkRecordId,
        figures: WorkFigures,
    ) -> DomainResult<MonthlyWorkRecord> {
        let mut record = self.state.work_records.require(id)?;
        PermissionGuard::new(WORK_RECORD.change()).check(
            &self.state.authorizer(),
            principal,
            &record,
            |r| r.organization_id,
        )?;
        record.update_figures(figures)?;
        self.state.work_records.update(record.clone())?;
        Ok(record)
    }

    pub fn work_records(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<MonthlyWorkRecord>> {
        let authorizer = self.state.authorizer();
        let rows = self.state.work_records.list();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                Ok(scope_to_organization(
                    &authorizer,
                    principal,
                    org,
                    &WORK_RECORD.view(),
                    rows,
                    |r| r.organization_id,
                ))
            }
            None => Ok(scope_across_organizations(
                &authorizer,
                principal,
                self.state.organizations.ids(),
                &WORK_RECORD.view(),
                rows,
                |r| r.organization_id,
            )),
        }
    }
}
