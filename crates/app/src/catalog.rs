//! The application permission catalog.
//!
//! One identifier per (entity, action) pair in the `<app>.<action>_<entity>`
//! format, enumerated here so services, role seeds and tests all reference the
//! same set instead of re-spelling strings.

use hrpay_auth::Permission;

/// The four standard actions for one catalogued entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityPermissions {
    app: &'static str,
    entity: &'static str,
}

impl EntityPermissions {
    pub const fn new(app: &'static str, entity: &'static str) -> Self {
        Self { app, entity }
    }

    pub fn add(&self) -> Permission {
        Permission::add(self.app, self.entity)
    }

    pub fn change(&self) -> Permission {
        Permission::change(self.app, self.entity)
    }

    pub fn delete(&self) -> Permission {
        Permission::delete(self.app, self.entity)
    }

    pub fn view(&self) -> Permission {
        Permission::view(self.app, self.entity)
    }

    pub fn all(&self) -> [Permission; 4] {
        [self.add(), self.change(), self.delete(), self.view()]
    }
}

pub const ORGANIZATION: EntityPermissions = EntityPermissions::new("organizations", "organization");
pub const EMPLOYEE_ORGANIZATION: EntityPermissions =
    EntityPermissions::new("organizations", "employeeorganization");

pub const EMPLOYEE: EntityPermissions = EntityPermissions::new("employees", "employee");
pub const BANK_ACCOUNT: EntityPermissions = EntityPermissions::new("employees", "bankaccount");

pub const DEPARTMENT: EntityPermissions = EntityPermissions::new("hr", "department");
pub const JOB_TITLE: EntityPermissions = EntityPermissions::new("hr", "jobtitle");
pub const EMPLOYMENT_HISTORY: EntityPermissions =
    EntityPermissions::new("hr", "employmenthistory");
pub const WORK_RECORD: EntityPermissions = EntityPermissions::new("hr", "monthlyworkrecord");

pub const LOAN: EntityPermissions = EntityPermissions::new("loans", "employeeloan");

pub const SALARY_ITEM_TYPE: EntityPermissions =
    EntityPermissions::new("salaries", "salaryitemtype");
pub const SALARY_ITEM: EntityPermissions =
    EntityPermissions::new("salaries", "employeesalaryitem");

pub const FISCAL_YEAR: EntityPermissions = EntityPermissions::new("settings", "fiscalyear");
pub const INSURANCE_CEILING: EntityPermissions =
    EntityPermissions::new("settings", "insuranceceiling");
pub const TAX_LEVEL: EntityPermissions = EntityPermissions::new("settings", "taxlevel");
pub const FINANCIAL_PERIOD: EntityPermissions =
    EntityPermissions::new("settings", "financialperiod");

const CATALOG: &[EntityPermissions] = &[
    ORGANIZATION,
    EMPLOYEE_ORGANIZATION,
    EMPLOYEE,
    BANK_ACCOUNT,
    DEPARTMENT,
    JOB_TITLE,
    EMPLOYMENT_HISTORY,
    WORK_RECORD,
    LOAN,
    SALARY_ITEM_TYPE,
    SALARY_ITEM,
    FISCAL_YEAR,
    INSURANCE_CEILING,
    TAX_LEVEL,
    FINANCIAL_PERIOD,
];

/// Every permission in the catalog, handy for seeding an all-powerful role.
pub fn all_permissions() -> Vec<Permission> {
    CATALOG.iter().flat_map(|e| e.all()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_follow_the_app_action_entity_format() {
        assert_eq!(DEPARTMENT.change().as_str(), "hr.change_department");
        assert_eq!(ORGANIZATION.view().as_str(), "organizations.view_organization");
        assert_eq!(SALARY_ITEM.add().as_str(), "salaries.add_employeesalaryitem");
    }

    #[test]
    fn catalog_has_four_unique_actions_per_entity() {
        let all = all_permissions();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), CATALOG.len() * 4);
        assert_eq!(unique.len(), all.len());
    }
}
