//! Monthly work records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{
    DomainError, DomainResult, EmployeeId, Entity, FinancialPeriodId, OrganizationId, WorkRecordId,
};

/// The worked/leave figures of one month.
///
/// Hours are stored in minutes and days in half-day units, keeping the record
/// integral (the ledger convention: no floats in domain records).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkFigures {
    pub worked_minutes: u32,
    pub standard_minutes: u32,
    pub overtime_minutes: u32,
    pub deficit_minutes: u32,
    /// Working days in half-day units (e.g. 43 = 21.5 days).
    pub working_half_days: u32,
    /// Used leave in half-day units.
    pub used_leave_half_days: u32,
}

/// One employee's work figures for one financial period in one organization.
///
/// Unique per (employee, financial period); the store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyWorkRecord {
    pub id: WorkRecordId,
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    pub financial_period_id: FinancialPeriodId,
    pub figures: WorkFigures,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMonthlyWorkRecord {
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    pub financial_period_id: FinancialPeriodId,
    pub figures: WorkFigures,
}

impl MonthlyWorkRecord {
    pub fn create(new: NewMonthlyWorkRecord) -> DomainResult<Self> {
        new.figures.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: WorkRecordId::new(),
            employee_id: new.employee_id,
            organization_id: new.organization_id,
            financial_period_id: new.financial_period_id,
            figures: new.figures,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_figures(&mut self, figures: WorkFigures) -> DomainResult<()> {
        figures.validate()?;
        self.figures = figures;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl WorkFigures {
    /// Overtime and deficit are mutually exclusive for a given month.
    pub fn validate(&self) -> DomainResult<()> {
        if self.overtime_minutes > 0 && self.deficit_minutes > 0 {
            return Err(DomainError::validation(
                "a month cannot record both overtime and deficit hours",
            ));
        }
        Ok(())
    }
}

impl Entity for MonthlyWorkRecord {
    type Id = WorkRecordId;

    fn id(&self) -> WorkRecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overtime_and_deficit_are_exclusive() {
        let figures = WorkFigures {
            overtime_minutes: 60,
            deficit_minutes: 30,
            ..Default::default()
        };
        assert!(figures.validate().is_err());

        let record = MonthlyWorkRecord::create(NewMonthlyWorkRecord {
            employee_id: EmployeeId::new(),
            organization_id: OrganizationId::new(),
            financial_period_id: FinancialPeriodId::new(),
            figures,
        });
        assert!(record.is_err());
    }

    #[test]
    fn plain_record_is_accepted() {
        let record = MonthlyWorkRecord::create(NewMonthlyWorkRecord {
            employee_id: EmployeeId::new(),
            organization_id: OrganizationId::new(),
            financial_period_id: FinancialPeriodId::new(),
            figures: WorkFigures {
                worked_minutes: 160 * 60,
                standard_minutes: 176 * 60,
                deficit_minutes: 16 * 60,
                working_half_days: 40,
                ..Default::default()
            },
        })
        .unwrap();
        assert_eq!(record.figures.working_half_days, 40);
    }
}
