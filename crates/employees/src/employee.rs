//! Employee personal records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{DomainError, DomainResult, EmployeeId, Entity, UserId};

/// An employee's personal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Optional link to a platform user account (self-service access).
    pub user_account: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    /// National identity code, exactly ten digits, unique platform-wide.
    pub national_code: String,
    /// Optional personnel code, unique when present.
    pub personnel_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    /// End of cooperation; never before the hire date.
    pub termination_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub user_account: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub national_code: String,
    pub personnel_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
}

impl Employee {
    pub fn create(new: NewEmployee) -> DomainResult<Self> {
        let first_name = new.first_name.trim().to_string();
        let last_name = new.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(DomainError::validation("employee name cannot be empty"));
        }
        validate_national_code(&new.national_code)?;

        let now = Utc::now();
        Ok(Self {
            id: EmployeeId::new(),
            user_account: new.user_account,
            first_name,
            last_name,
            national_code: new.national_code,
            personnel_code: new.personnel_code,
            date_of_birth: new.date_of_birth,
            hire_date: new.hire_date,
            termination_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// End the cooperation. The date must not precede the hire date.
    pub fn terminate(&mut self, date: NaiveDate) -> DomainResult<()> {
        if date < self.hire_date {
            return Err(DomainError::validation(
                "termination date cannot precede hire date",
            ));
        }
        self.termination_date = Some(date);
        self.is_active = false;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_national_code(code: &str) -> DomainResult<()> {
    if code.len() != 10 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(
            "national code must be exactly ten digits",
        ));
    }
    Ok(())
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> EmployeeId {
        self.id
    }
}

impl core::fmt::Display for Employee {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn new_employee(code: &str) -> NewEmployee {
        NewEmployee {
            user_account: None,
            first_name: "Sara".into(),
            last_name: "Mohammadi".into(),
            national_code: code.into(),
            personnel_code: None,
            date_of_birth: None,
            hire_date: d(2020, 3, 1),
        }
    }

    #[test]
    fn national_code_must_be_ten_digits() {
        assert!(Employee::create(new_employee("0012345678")).is_ok());
        assert!(Employee::create(new_employee("12345")).is_err());
        assert!(Employee::create(new_employee("12345678ab")).is_err());
    }

    #[test]
    fn termination_cannot_precede_hire() {
        let mut employee = Employee::create(new_employee("0012345678")).unwrap();
        assert!(employee.terminate(d(2019, 1, 1)).is_err());
        employee.terminate(d(2024, 1, 1)).unwrap();
        assert!(!employee.is_active);
        assert_eq!(employee.termination_date, Some(d(2024, 1, 1)));
    }
}
