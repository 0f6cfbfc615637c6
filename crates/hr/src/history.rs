//! Employment history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{
    DateRange, DepartmentId, DomainError, DomainResult, EmployeeId, EmploymentHistoryId, Entity,
    JobTitleId, OrganizationId,
};

/// One position an employee held (or holds) within an organization.
///
/// Invariants enforced at write time against the persisted siblings:
/// - periods for the same (employee, organization) never overlap;
/// - at most one entry per employee is marked current. Saving a new current
///   entry demotes the previous one rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentHistory {
    pub id: EmploymentHistoryId,
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    /// Department link survives department deletion as `None`.
    pub department_id: Option<DepartmentId>,
    pub job_title_id: Option<JobTitleId>,
    pub period: DateRange,
    pub is_current: bool,
    pub responsibilities: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmploymentHistory {
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    pub department_id: Option<DepartmentId>,
    pub job_title_id: Option<JobTitleId>,
    pub period: DateRange,
    pub is_current: bool,
    pub responsibilities: Option<String>,
    pub notes: Option<String>,
}

impl EmploymentHistory {
    pub fn create(new: NewEmploymentHistory) -> Self {
        let now = Utc::now();
        Self {
            id: EmploymentHistoryId::new(),
            employee_id: new.employee_id,
            organization_id: new.organization_id,
            department_id: new.department_id,
            job_title_id: new.job_title_id,
            period: new.period,
            is_current: new.is_current,
            responsibilities: new.responsibilities,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reject a period overlapping an existing entry for the same employee
    /// and organization. `existing` may contain `self` (update case).
    pub fn ensure_no_overlap<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a EmploymentHistory>,
    ) -> DomainResult<()> {
        for other in existing {
            if other.id == self.id {
                continue;
            }
            if other.employee_id == self.employee_id
                && other.organization_id == self.organization_id
                && other.period.overlaps(&self.period)
            {
                return Err(DomainError::validation(
                    "employment period overlaps an existing entry for this employee in this organization",
                ));
            }
        }
        Ok(())
    }

    /// Clear the current flag (called when a newer current entry is saved).
    pub fn demote(&mut self) {
        self.is_current = false;
        self.updated_at = Utc::now();
    }
}

impl Entity for EmploymentHistory {
    type Id = EmploymentHistoryId;

    fn id(&self) -> EmploymentHistoryId {
        self.id
    }
}
