//! Salary item types and per-employee amounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{
    DomainError, DomainResult, EmployeeId, Entity, FinancialPeriodId, OrganizationId, SalaryItemId,
    SalaryItemTypeId,
};

/// How an item's amount is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    #[default]
    Monthly,
    Daily,
    Other,
}

/// A salary item definition (base pay, overtime, tax deduction, ...) scoped
/// to one organization and one financial period.
///
/// Name is unique per (organization, financial period); the store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryItemType {
    pub id: SalaryItemTypeId,
    pub organization_id: OrganizationId,
    pub financial_period_id: FinancialPeriodId,
    pub name: String,
    pub calculation: CalculationKind,
    /// Part of the base salary figure.
    pub is_base_salary: bool,
    /// Subtracts from pay (tax, insurance, loan installments).
    pub is_deduction: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSalaryItemType {
    pub organization_id: OrganizationId,
    pub financial_period_id: FinancialPeriodId,
    pub name: String,
    pub calculation: CalculationKind,
    pub is_base_salary: bool,
    pub is_deduction: bool,
}

impl SalaryItemType {
    pub fn create(new: NewSalaryItemType) -> DomainResult<Self> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("salary item name cannot be empty"));
        }
        if new.is_base_salary && new.is_deduction {
            return Err(DomainError::validation(
                "an item cannot be both base salary and a deduction",
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: SalaryItemTypeId::new(),
            organization_id: new.organization_id,
            financial_period_id: new.financial_period_id,
            name,
            calculation: new.calculation,
            is_base_salary: new.is_base_salary,
            is_deduction: new.is_deduction,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Entity for SalaryItemType {
    type Id = SalaryItemTypeId;

    fn id(&self) -> SalaryItemTypeId {
        self.id
    }
}

/// An amount of one salary item type assigned to one employee for one
/// financial period. Amounts are minor currency units.
///
/// Unique per (employee, financial period, item type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalaryItem {
    pub id: SalaryItemId,
    pub employee_id: EmployeeId,
    pub financial_period_id: FinancialPeriodId,
    pub salary_item_type_id: SalaryItemTypeId,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployeeSalaryItem {
    pub employee_id: EmployeeId,
    pub financial_period_id: FinancialPeriodId,
    pub salary_item_type_id: SalaryItemTypeId,
    pub amount: i64,
}

impl EmployeeSalaryItem {
    pub fn create(new: NewEmployeeSalaryItem) -> DomainResult<Self> {
        if new.amount <= 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        let now = Utc::now();
        Ok(Self {
            id: SalaryItemId::new(),
            employee_id: new.employee_id,
            financial_period_id: new.financial_period_id,
            salary_item_type_id: new.salary_item_type_id,
            amount: new.amount,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Entity for EmployeeSalaryItem {
    type Id = SalaryItemId;

    fn id(&self) -> SalaryItemId {
        self.id
    }
}
