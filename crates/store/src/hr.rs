//! HR stores: departments, job titles, employment history, work records.

use hrpay_core::{
    DepartmentId, DomainError, DomainResult, EmployeeId, EmploymentHistoryId, FinancialPeriodId,
    JobTitleId, OrganizationId, WorkRecordId,
};
use hrpay_hr::{Department, EmploymentHistory, JobTitle, MonthlyWorkRecord};

use crate::table::InMemoryTable;

#[derive(Debug, Default)]
pub struct DepartmentStore {
    table: InMemoryTable<DepartmentId, Department>,
}

impl DepartmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, department: Department) -> DomainResult<()> {
        self.ensure_unique(&department)?;
        self.table.insert(department.id, department);
        Ok(())
    }

    pub fn update(&self, department: Department) -> DomainResult<()> {
        if self.table.get(&department.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.ensure_unique(&department)?;
        self.table.insert(department.id, department);
        Ok(())
    }

    fn ensure_unique(&self, candidate: &Department) -> DomainResult<()> {
        let taken = self.table.any(|d| {
            d.id != candidate.id
                && d.organization_id == candidate.organization_id
                && d.name == candidate.name
        });
        if taken {
            return Err(DomainError::conflict(format!(
                "department '{}' already exists in this organization",
                candidate.name
            )));
        }
        Ok(())
    }

    pub fn require(&self, id: DepartmentId) -> DomainResult<Department> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<Department> {
        self.table.all()
    }

    pub fn for_organization(&self, organization: OrganizationId) -> Vec<Department> {
        self.table.filter(|d| d.organization_id == organization)
    }

    pub fn remove(&self, id: DepartmentId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_organization(&self, organization: OrganizationId) {
        self.table.retain(|d| d.organization_id != organization);
    }
}

#[derive(Debug, Default)]
pub struct JobTitleStore {
    table: InMemoryTable<JobTitleId, JobTitle>,
}

impl JobTitleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, title: JobTitle) -> DomainResult<()> {
        let taken = self.table.any(|t| {
            t.id != title.id
                && t.organization_id == title.organization_id
                && t.title == title.title
        });
        if taken {
            return Err(DomainError::conflict(format!(
                "job title '{}' already exists in this scope",
                title.title
            )));
        }
        self.table.insert(title.id, title);
        Ok(())
    }

    pub fn require(&self, id: JobTitleId) -> DomainResult<JobTitle> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<JobTitle> {
        self.table.all()
    }

    pub fn remove(&self, id: JobTitleId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    /// Shared titles (no organization) survive a tenant purge.
    pub fn purge_organization(&self, organization: OrganizationId) {
        self.table.retain(|t| t.organization_id != Some(organization));
    }
}

#[derive(Debug, Default)]
pub struct EmploymentHistoryStore {
    table: InMemoryTable<EmploymentHistoryId, EmploymentHistory>,
}

impl EmploymentHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with the overlap rule; a new current entry demotes the
    /// employee's previous current entries (source behavior).
    pub fn insert(&self, entry: EmploymentHistory) -> DomainResult<()> {
        let siblings = self.for_employee(entry.employee_id);
        entry.ensure_no_overlap(siblings.iter())?;
        if entry.is_current {
            for sibling in siblings {
                if sibling.is_current {
                    self.table.update_in_place(&sibling.id, |e| e.demote());
                }
            }
        }
        self.table.insert(entry.id, entry);
        Ok(())
    }

    pub fn require(&self, id: EmploymentHistoryId) -> DomainResult<EmploymentHistory> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<EmploymentHistory> {
        self.table.all()
    }

    pub fn for_employee(&self, employee: EmployeeId) -> Vec<EmploymentHistory> {
        let mut rows = self.table.filter(|e| e.employee_id == employee);
        rows.sort_by(|a, b| b.period.start().cmp(&a.period.start()));
        rows
    }

    pub fn remove(&self, id: EmploymentHistoryId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_organization(&self, organization: OrganizationId) {
        self.table.retain(|e| e.organization_id != organization);
    }

    /// Department deletion keeps history rows, nulling the link.
    pub fn detach_department(&self, department: DepartmentId) {
        let affected: Vec<_> = self
            .table
            .filter(|e| e.department_id == Some(department))
            .into_iter()
            .map(|e| e.id)
            .collect();
        for id in affected {
            self.table.update_in_place(&id, |e| e.department_id = None);
        }
    }
}

#[derive(Debug, Default)]
pub struct WorkRecordStore {
    table: InMemoryTable<WorkRecordId, MonthlyWorkRecord>,
}

impl WorkRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: MonthlyWorkRecord) -> DomainResult<()> {
        let duplicate = self.table.any(|r| {
            r.id != record.id
                && r.employee_id == record.employee_id
                && r.financial_period_id == record.financial_period_id
        });
        if duplicate {
            return Err(DomainError::conflict(
                "a work record for this employee and period already exists",
            ));
        }
        self.table.insert(record.id, record);
        Ok(())
    }

    pub fn update(&self, record: MonthlyWorkRecord) -> DomainResult<()> {
        if self.table.get(&record.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.table.insert(record.id, record);
        Ok(())
    }

    pub fn require(&self, id: WorkRecordId) -> DomainResult<MonthlyWorkRecord> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<MonthlyWorkRecord> {
        self.table.all()
    }

    pub fn for_employee(&self, employee: EmployeeId) -> Vec<MonthlyWorkRecord> {
        self.table.filter(|r| r.employee_id == employee)
    }

    pub fn for_period(&self, period: FinancialPeriodId) -> Vec<MonthlyWorkRecord> {
        self.table.filter(|r| r.financial_period_id == period)
    }

    pub fn remove(&self, id: WorkRecordId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_organization(&self, organization: OrganizationId) {
        self.table.retain(|r| r.organization_id != organization);
    }

    /// Cascade step when financial periods are deleted.
    pub fn purge_periods(&self, periods: &std::collections::HashSet<FinancialPeriodId>) {
        self.table.retain(|r| !periods.contains(&r.financial_period_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrpay_core::DateRange;
    use hrpay_hr::{NewDepartment, NewEmploymentHistory, NewMonthlyWorkRecord, WorkFigures};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn department_name_unique_per_organization() {
        let store = DepartmentStore::new();
        let org = OrganizationId::new();
        let make = |org, name: &str| {
            Department::create(NewDepartment {
                organization_id: org,
                name: name.into(),
                description: None,
            })
            .unwrap()
        };

        store.insert(make(org, "Finance")).unwrap();
        assert!(matches!(
            store.insert(make(org, "Finance")),
            Err(DomainError::Conflict(_))
        ));
        // Same name in another organization is fine.
        store.insert(make(OrganizationId::new(), "Finance")).unwrap();
    }

    #[test]
    fn new_current_history_demotes_previous() {
        let store = EmploymentHistoryStore::new();
        let employee = EmployeeId::new();
        let org = OrganizationId::new();

        let first = EmploymentHistory::create(NewEmploymentHistory {
            employee_id: employee,
            organization_id: org,
            department_id: None,
            job_title_id: None,
            period: DateRange::new(d(2020, 1, 1), Some(d(2022, 12, 31))).unwrap(),
            is_current: true,
            responsibilities: None,
            notes: None,
        });
        let first_id = first.id;
        store.insert(first).unwrap();

        let second = EmploymentHistory::create(NewEmploymentHistory {
            employee_id: employee,
            organization_id: org,
            department_id: None,
            job_title_id: None,
            period: DateRange::new(d(2023, 1, 1), None).unwrap(),
            is_current: true,
            responsibilities: None,
            notes: None,
        });
        store.insert(second).unwrap();

        let current: Vec<_> = store
            .for_employee(employee)
            .into_iter()
            .filter(|e| e.is_current)
            .collect();
        assert_eq!(current.len(), 1);
        assert_ne!(current[0].id, first_id);
    }

    #[test]
    fn detach_department_keeps_history() {
        let store = EmploymentHistoryStore::new();
        let department = DepartmentId::new();
        let entry = EmploymentHistory::create(NewEmploymentHistory {
            employee_id: EmployeeId::new(),
            organization_id: OrganizationId::new(),
            department_id: Some(department),
            job_title_id: None,
            period: DateRange::new(d(2020, 1, 1), None).unwrap(),
            is_current: true,
            responsibilities: None,
            notes: None,
        });
        let id = entry.id;
        store.insert(entry).unwrap();

        store.detach_department(department);
        assert_eq!(store.require(id).unwrap().department_id, None);
    }

    #[test]
    fn one_work_record_per_employee_and_period() {
        let store = WorkRecordStore::new();
        let employee = EmployeeId::new();
        let period = FinancialPeriodId::new();
        let make = || {
            MonthlyWorkRecord::create(NewMonthlyWorkRecord {
                employee_id: employee,
                organization_id: OrganizationId::new(),
                financial_period_id: period,
                figures: WorkFigures::default(),
            })
            .unwrap()
        };

        store.insert(make()).unwrap();
        assert!(matches!(store.insert(make()), Err(DomainError::Conflict(_))));
    }
}
