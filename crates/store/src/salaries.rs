//! Salary item stores.

use std::collections::HashSet;

use hrpay_core::{
    DomainError, DomainResult, EmployeeId, FinancialPeriodId, OrganizationId, SalaryItemId,
    SalaryItemTypeId,
};
use hrpay_salaries::{EmployeeSalaryItem, SalaryItemType};

use crate::table::InMemoryTable;

#[derive(Debug, Default)]
pub struct SalaryItemTypeStore {
    table: InMemoryTable<SalaryItemTypeId, SalaryItemType>,
}

impl SalaryItemTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: SalaryItemType) -> DomainResult<()> {
        self.ensure_unique(&item)?;
        self.table.insert(item.id, item);
        Ok(())
    }

    pub fn update(&self, item: SalaryItemType) -> DomainResult<()> {
        if self.table.get(&item.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.ensure_unique(&item)?;
        self.table.insert(item.id, item);
        Ok(())
    }

    fn ensure_unique(&self, candidate: &SalaryItemType) -> DomainResult<()> {
        let taken = self.table.any(|i| {
            i.id != candidate.id
                && i.organization_id == candidate.organization_id
                && i.financial_period_id == candidate.financial_period_id
                && i.name == candidate.name
        });
        if taken {
            return Err(DomainError::conflict(format!(
                "salary item '{}' already exists in this period",
                candidate.name
            )));
        }
        Ok(())
    }

    pub fn require(&self, id: SalaryItemTypeId) -> DomainResult<SalaryItemType> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<SalaryItemType> {
        self.table.all()
    }

    pub fn for_period(&self, period: FinancialPeriodId) -> Vec<SalaryItemType> {
        self.table.filter(|i| i.financial_period_id == period)
    }

    pub fn remove(&self, id: SalaryItemTypeId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_organization(&self, organization: OrganizationId) {
        self.table.retain(|i| i.organization_id != organization);
    }
}

#[derive(Debug, Default)]
pub struct SalaryItemStore {
    table: InMemoryTable<SalaryItemId, EmployeeSalaryItem>,
}

impl SalaryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: EmployeeSalaryItem) -> DomainResult<()> {
        let duplicate = self.table.any(|i| {
            i.id != item.id
                && i.employee_id == item.employee_id
                && i.financial_period_id == item.financial_period_id
                && i.salary_item_type_id == item.salary_item_type_id
        });
        if duplicate {
            return Err(DomainError::conflict(
                "this salary item is already assigned to the employee for this period",
            ));
        }
        self.table.insert(item.id, item);
        Ok(())
    }

    pub fn update(&self, item: EmployeeSalaryItem) -> DomainResult<()> {
        if self.table.get(&item.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.table.insert(item.id, item);
        Ok(())
    }

    pub fn require(&self, id: SalaryItemId) -> DomainResult<EmployeeSalaryItem> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<EmployeeSalaryItem> {
        self.table.all()
    }

    pub fn for_employee(&self, employee: EmployeeId) -> Vec<EmployeeSalaryItem> {
        self.table.filter(|i| i.employee_id == employee)
    }

    pub fn remove(&self, id: SalaryItemId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    /// Tenant purge reaches these rows through their financial periods.
    pub fn purge_periods(&self, periods: &HashSet<FinancialPeriodId>) {
        self.table.retain(|i| !periods.contains(&i.financial_period_id));
    }

    /// Items pointing at a deleted item type go with it.
    pub fn purge_type(&self, item_type: SalaryItemTypeId) {
        self.table.retain(|i| i.salary_item_type_id != item_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrpay_salaries::{CalculationKind, NewEmployeeSalaryItem, NewSalaryItemType};

    fn item_type(org: OrganizationId, period: FinancialPeriodId, name: &str) -> SalaryItemType {
        SalaryItemType::create(NewSalaryItemType {
            organization_id: org,
            financial_period_id: period,
            name: name.into(),
            calculation: CalculationKind::Monthly,
            is_base_salary: false,
            is_deduction: false,
        })
        .unwrap()
    }

    #[test]
    fn item_type_name_unique_per_organization_and_period() {
        let store = SalaryItemTypeStore::new();
        let org = OrganizationId::new();
        let period = FinancialPeriodId::new();

        store.insert(item_type(org, period, "Overtime")).unwrap();
        assert!(matches!(
            store.insert(item_type(org, period, "Overtime")),
            Err(DomainError::Conflict(_))
        ));
        // The same name in another period is a different definition.
        store
            .insert(item_type(org, FinancialPeriodId::new(), "Overtime"))
            .unwrap();
    }

    #[test]
    fn one_assignment_per_employee_period_and_type() {
        let store = SalaryItemStore::new();
        let employee = EmployeeId::new();
        let period = FinancialPeriodId::new();
        let kind = SalaryItemTypeId::new();
        let make = |amount| {
            EmployeeSalaryItem::create(NewEmployeeSalaryItem {
                employee_id: employee,
                financial_period_id: period,
                salary_item_type_id: kind,
                amount,
            })
            .unwrap()
        };

        store.insert(make(5_000_000)).unwrap();
        assert!(matches!(
            store.insert(make(6_000_000)),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn purge_periods_drops_matching_rows() {
        let store = SalaryItemStore::new();
        let period = FinancialPeriodId::new();
        let keep_period = FinancialPeriodId::new();
        for p in [period, keep_period] {
            store
                .insert(
                    EmployeeSalaryItem::create(NewEmployeeSalaryItem {
                        employee_id: EmployeeId::new(),
                        financial_period_id: p,
                        salary_item_type_id: SalaryItemTypeId::new(),
                        amount: 1_000,
                    })
                    .unwrap(),
                )
                .unwrap();
        }

        store.purge_periods(&HashSet::from([period]));
        let left = store.list();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].financial_period_id, keep_period);
    }
}
