//! Employee and bank account stores.

use hrpay_core::{BankAccountId, DomainError, DomainResult, EmployeeId};
use hrpay_employees::{BankAccount, Employee};

use crate::table::InMemoryTable;

#[derive(Debug, Default)]
pub struct EmployeeStore {
    table: InMemoryTable<EmployeeId, Employee>,
}

impl EmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, employee: Employee) -> DomainResult<()> {
        self.ensure_unique(&employee)?;
        self.table.insert(employee.id, employee);
        Ok(())
    }

    pub fn update(&self, employee: Employee) -> DomainResult<()> {
        if self.table.get(&employee.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.ensure_unique(&employee)?;
        self.table.insert(employee.id, employee);
        Ok(())
    }

    fn ensure_unique(&self, candidate: &Employee) -> DomainResult<()> {
        if self
            .table
            .any(|e| e.id != candidate.id && e.national_code == candidate.national_code)
        {
            return Err(DomainError::conflict(
                "an employee with this national code already exists",
            ));
        }
        if let Some(code) = &candidate.personnel_code {
            if self
                .table
                .any(|e| e.id != candidate.id && e.personnel_code.as_deref() == Some(code))
            {
                return Err(DomainError::conflict(
                    "an employee with this personnel code already exists",
                ));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: EmployeeId) -> Option<Employee> {
        self.table.get(&id)
    }

    pub fn require(&self, id: EmployeeId) -> DomainResult<Employee> {
        self.get(id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<Employee> {
        let mut rows = self.table.all();
        rows.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        rows
    }

    pub fn remove(&self, id: EmployeeId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }
}

#[derive(Debug, Default)]
pub struct BankAccountStore {
    table: InMemoryTable<BankAccountId, BankAccount>,
}

impl BankAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: BankAccount) -> DomainResult<()> {
        if let Some(sheba) = &account.sheba_number {
            if self
                .table
                .any(|a| a.id != account.id && a.sheba_number.as_deref() == Some(sheba))
            {
                return Err(DomainError::conflict("this sheba number is already registered"));
            }
        }
        self.table.insert(account.id, account);
        Ok(())
    }

    pub fn require(&self, id: BankAccountId) -> DomainResult<BankAccount> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn for_employee(&self, employee: EmployeeId) -> Vec<BankAccount> {
        self.table.filter(|a| a.employee_id == employee)
    }

    pub fn remove(&self, id: BankAccountId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrpay_employees::{NewBankAccount, NewEmployee};

    fn employee(national: &str, personnel: Option<&str>) -> Employee {
        Employee::create(NewEmployee {
            user_account: None,
            first_name: "Omid".into(),
            last_name: "Karimi".into(),
            national_code: national.into(),
            personnel_code: personnel.map(String::from),
            date_of_birth: None,
            hire_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn national_and_personnel_codes_are_unique() {
        let store = EmployeeStore::new();
        store.insert(employee("0000000001", Some("P1"))).unwrap();

        assert!(matches!(
            store.insert(employee("0000000001", None)),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            store.insert(employee("0000000002", Some("P1"))),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn sheba_is_unique_when_present() {
        let store = BankAccountStore::new();
        let sheba = "IR012345678901234567890123";
        let make = |sheba: Option<&str>| {
            BankAccount::create(NewBankAccount {
                employee_id: EmployeeId::new(),
                bank_name: "Mellat".into(),
                account_number: "123".into(),
                card_number: None,
                sheba_number: sheba.map(String::from),
            })
            .unwrap()
        };

        store.insert(make(Some(sheba))).unwrap();
        assert!(matches!(
            store.insert(make(Some(sheba))),
            Err(DomainError::Conflict(_))
        ));
        store.insert(make(None)).unwrap();
        store.insert(make(None)).unwrap();
    }
}
