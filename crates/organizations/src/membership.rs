//! Employee membership windows within an organization.

use serde::{Deserialize, Serialize};

use hrpay_core::{DateRange, DomainError, DomainResult, EmployeeId, Entity, MembershipId, OrganizationId};

/// One employee's membership in one organization over a date range.
///
/// Ranges for the same (employee, organization) pair must not overlap; the
/// check runs against the currently persisted siblings at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeOrganization {
    pub id: MembershipId,
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    pub period: DateRange,
    pub is_active: bool,
}

impl EmployeeOrganization {
    pub fn new(
        employee_id: EmployeeId,
        organization_id: OrganizationId,
        period: DateRange,
    ) -> Self {
        Self {
            id: MembershipId::new(),
            employee_id,
            organization_id,
            period,
            is_active: true,
        }
    }

    /// Validate this membership against the already persisted memberships of
    /// the same employee.
    ///
    /// `existing` may contain the record itself (update case); it is skipped
    /// by id.
    pub fn ensure_no_overlap<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a EmployeeOrganization>,
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
                    "membership period overlaps an existing membership for this employee in this organization",
                ));
            }
        }
        Ok(())
    }

    pub fn close(&mut self, end: chrono::NaiveDate) -> DomainResult<()> {
        self.period = DateRange::new(self.period.start(), Some(end))?;
        self.is_active = false;
        Ok(())
    }
}

impl Entity for EmployeeOrganization {
    type Id = MembershipId;

    fn id(&self) -> MembershipId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn membership(
        employee: EmployeeId,
        org: OrganizationId,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> EmployeeOrganization {
        EmployeeOrganization::new(employee, org, DateRange::new(start, end).unwrap())
    }

    #[test]
    fn overlapping_window_in_same_org_is_rejected() {
        let employee = EmployeeId::new();
        let org = OrganizationId::new();
        let existing = membership(employee, org, d(2023, 1, 1), None);
        let candidate = membership(employee, org, d(2024, 6, 1), Some(d(2024, 12, 1)));

        let err = candidate.ensure_no_overlap([&existing]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn different_org_or_employee_never_conflicts() {
        let employee = EmployeeId::new();
        let org = OrganizationId::new();
        let existing = membership(employee, org, d(2023, 1, 1), None);

        let other_org = membership(employee, OrganizationId::new(), d(2023, 6, 1), None);
        other_org.ensure_no_overlap([&existing]).unwrap();

        let other_emp = membership(EmployeeId::new(), org, d(2023, 6, 1), None);
        other_emp.ensure_no_overlap([&existing]).unwrap();
    }

    #[test]
    fn update_skips_itself() {
        let employee = EmployeeId::new();
        let org = OrganizationId::new();
        let mut existing = membership(employee, org, d(2023, 1, 1), None);
        existing.ensure_no_overlap([&existing.clone()]).unwrap();
        existing.close(d(2023, 12, 31)).unwrap();
        assert!(!existing.is_active);
        assert_eq!(existing.period.end(), Some(d(2023, 12, 31)));
    }

    #[test]
    fn adjacent_non_overlapping_windows_are_fine() {
        let employee = EmployeeId::new();
        let org = OrganizationId::new();
        let first = membership(employee, org, d(2022, 1, 1), Some(d(2022, 12, 31)));
        let second = membership(employee, org, d(2023, 1, 1), None);
        second.ensure_no_overlap([&first]).unwrap();
    }
}
