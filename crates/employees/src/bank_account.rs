//! Employee bank accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{BankAccountId, DomainError, DomainResult, EmployeeId, Entity};

/// A payout account belonging to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: BankAccountId,
    pub employee_id: EmployeeId,
    pub bank_name: String,
    pub account_number: String,
    pub card_number: Option<String>,
    /// IBAN in the national format: `IR` followed by 24 digits. Unique when
    /// present.
    pub sheba_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBankAccount {
    pub employee_id: EmployeeId,
    pub bank_name: String,
    pub account_number: String,
    pub card_number: Option<String>,
    pub sheba_number: Option<String>,
}

impl BankAccount {
    pub fn create(new: NewBankAccount) -> DomainResult<Self> {
        let bank_name = new.bank_name.trim().to_string();
        let account_number = new.account_number.trim().to_string();
        if bank_name.is_empty() {
            return Err(DomainError::validation("bank name cannot be empty"));
        }
        if account_number.is_empty() || !account_number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation("account number must be numeric"));
        }
        if let Some(sheba) = &new.sheba_number {
            validate_sheba(sheba)?;
        }

        let now = Utc::now();
        Ok(Self {
            id: BankAccountId::new(),
            employee_id: new.employee_id,
            bank_name,
            account_number,
            card_number: new.card_number,
            sheba_number: new.sheba_number,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

fn validate_sheba(sheba: &str) -> DomainResult<()> {
    let digits = sheba.strip_prefix("IR").ok_or_else(|| {
        DomainError::validation("sheba number must start with 'IR'")
    })?;
    if digits.len() != 24 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(
            "sheba number must be 'IR' followed by 24 digits",
        ));
    }
    Ok(())
}

impl Entity for BankAccount {
    type Id = BankAccountId;

    fn id(&self) -> BankAccountId {
        self.id
    }
}
