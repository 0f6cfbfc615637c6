//! Employee loans.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{DomainError, DomainResult, EmployeeId, Entity, LoanId, OrganizationId};

/// A loan granted to an employee by an organization.
///
/// Amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLoan {
    pub id: LoanId,
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    pub loan_amount: i64,
    pub first_installment_date: NaiveDate,
    pub last_installment_date: NaiveDate,
    pub monthly_installment_amount: i64,
    pub is_settled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployeeLoan {
    pub employee_id: EmployeeId,
    pub organization_id: OrganizationId,
    pub loan_amount: i64,
    pub first_installment_date: NaiveDate,
    pub last_installment_date: NaiveDate,
    pub monthly_installment_amount: i64,
}

impl EmployeeLoan {
    pub fn create(new: NewEmployeeLoan) -> DomainResult<Self> {
        if new.loan_amount <= 0 {
            return Err(DomainError::validation("loan amount must be positive"));
        }
        if new.monthly_installment_amount <= 0 {
            return Err(DomainError::validation("installment amount must be positive"));
        }
        if new.monthly_installment_amount > new.loan_amount {
            return Err(DomainError::validation(
                "monthly installment cannot exceed the loan amount",
            ));
        }
        if new.first_installment_date > new.last_installment_date {
            return Err(DomainError::validation(
                "first installment date cannot come after the last",
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: LoanId::new(),
            employee_id: new.employee_id,
            organization_id: new.organization_id,
            loan_amount: new.loan_amount,
            first_installment_date: new.first_installment_date,
            last_installment_date: new.last_installment_date,
            monthly_installment_amount: new.monthly_installment_amount,
            is_settled: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn settle(&mut self) -> DomainResult<()> {
        if self.is_settled {
            return Err(DomainError::invariant("loan is already settled"));
        }
        self.is_settled = true;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for EmployeeLoan {
    type Id = LoanId;

    fn id(&self) -> LoanId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn new_loan() -> NewEmployeeLoan {
        NewEmployeeLoan {
            employee_id: EmployeeId::new(),
            organization_id: OrganizationId::new(),
            loan_amount: 120_000_000,
            first_installment_date: d(2024, 1, 1),
            last_installment_date: d(2024, 12, 1),
            monthly_installment_amount: 10_000_000,
        }
    }

    #[test]
    fn installment_window_must_be_ordered() {
        let mut new = new_loan();
        new.first_installment_date = d(2025, 1, 1);
        assert!(EmployeeLoan::create(new).is_err());
    }

    #[test]
    fn amounts_must_be_positive_and_consistent() {
        let mut new = new_loan();
        new.loan_amount = 0;
        assert!(EmployeeLoan::create(new).is_err());

        let mut new = new_loan();
        new.monthly_installment_amount = new.loan_amount + 1;
        assert!(EmployeeLoan::create(new).is_err());
    }

    #[test]
    fn settle_only_once() {
        let mut loan = EmployeeLoan::create(new_loan()).unwrap();
        loan.settle().unwrap();
        assert!(matches!(loan.settle(), Err(DomainError::InvariantViolation(_))));
    }
}
