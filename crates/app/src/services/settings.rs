//! Payroll settings: fiscal years, financial periods, ceilings, tax brackets.

use std::collections::HashSet;
use std::sync::Arc;

use hrpay_auth::{
    PermissionGuard, Principal, ScopedList, scope_across_organizations, scope_to_organization,
};
use hrpay_core::{
    DomainResult, FinancialPeriodId, FiscalYearId, InsuranceCeilingId, OrganizationId, TaxLevelId,
};
use hrpay_settings::{
    FinancialPeriod, FiscalYear, InsuranceCeiling, NewFinancialPeriod, NewFiscalYear, NewTaxLevel,
    TaxLevel,
};

use crate::catalog::{FINANCIAL_PERIOD, FISCAL_YEAR, INSURANCE_CEILING, TAX_LEVEL};
use crate::state::AppState;

pub struct SettingsService {
    state: Arc<AppState>,
}

impl SettingsService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    // --- fiscal years ---

    pub fn create_fiscal_year(
        &self,
        principal: &Principal,
        new: NewFiscalYear,
    ) -> DomainResult<FiscalYear> {
        self.state.organizations.require(new.organization_id)?;
        PermissionGuard::new(FISCAL_YEAR.add()).check_organization(
            &self.state.authorizer(),
            principal,
            new.organization_id,
        )?;
        let year = FiscalYear::create(new)?;
        self.state.fiscal_years.insert(year.clone())?;
        Ok(year)
    }

    /// Deleting a year takes its periods, ceiling, tax brackets and every
    /// period-scoped record with it.
    pub fn delete_fiscal_year(&self, principal: &Principal, id: FiscalYearId) -> DomainResult<()> {
        let year = self.state.fiscal_years.require(id)?;
        PermissionGuard::new(FISCAL_YEAR.delete()).check(
            &self.state.authorizer(),
            principal,
            &year,
            |y| y.organization_id,
        )?;
        let years = HashSet::from([id]);
        let periods = self.state.financial_periods.purge_years(&years);
        self.state.insurance_ceilings.purge_years(&years);
        self.state.tax_levels.purge_years(&years);
        self.state.salary_items.purge_periods(&periods);
        self.state.work_records.purge_periods(&periods);
        self.state.fiscal_years.remove(id)
    }

    pub fn fiscal_years(
        &self,
        principal: &Principal,
        organization: Option<OrganizationId>,
    ) -> DomainResult<ScopedList<FiscalYear>> {
        let authorizer = self.state.authorizer();
        let rows = self.state.fiscal_years.list();
        match organization {
            Some(org) => {
                self.state.organizations.require(org)?;
                Ok(scope_to_organization(
                    &authorizer,
                    principal,
                    org,
                    &FISCAL_YEAR.view(),
                    rows,
                    |y| y.organization_id,
                ))
            }
            None => Ok(scope_across_organizations(
                &authorizer,
                principal,
                self.state.organizations.ids(),
                &FISCAL_YEAR.view(),
                rows,
                |y| y.organization_id,
            )),
        }
    }

    // --- financial periods ---

    pub fn add_period(
        &self,
        principal: &Principal,
        new: NewFinancialPeriod,
    ) -> DomainResult<FinancialPeriod> {
        let year = self.state.fiscal_years.require(new.fiscal_year_id)?;
        PermissionGuard::new(FINANCIAL_PERIOD.add()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        let period = FinancialPeriod::create(new)?;
        self.state.financial_periods.insert(period.clone())?;
        Ok(period)
    }

    pub fn deactivate_period(
        &self,
        principal: &Principal,
        id: FinancialPeriodId,
    ) -> DomainResult<FinancialPeriod> {
        let mut period = self.state.financial_periods.require(id)?;
        let year = self.state.fiscal_years.require(period.fiscal_year_id)?;
        PermissionGuard::new(FINANCIAL_PERIOD.change()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        period.deactivate();
        self.state.financial_periods.update(period.clone())?;
        Ok(period)
    }

    pub fn delete_period(&self, principal: &Principal, id: FinancialPeriodId) -> DomainResult<()> {
        let period = self.state.financial_periods.require(id)?;
        let year = self.state.fiscal_years.require(period.fiscal_year_id)?;
        PermissionGuard::new(FINANCIAL_PERIOD.delete()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        let periods = HashSet::from([id]);
        self.state.salary_items.purge_periods(&periods);
        self.state.work_records.purge_periods(&periods);
        self.state.financial_periods.remove(id)
    }

    /// Periods of one fiscal year; denial follows the soft explicit-scope
    /// shape since the year names the organization.
    pub fn periods_for_year(
        &self,
        principal: &Principal,
        year: FiscalYearId,
    ) -> DomainResult<ScopedList<FinancialPeriod>> {
        let year = self.state.fiscal_years.require(year)?;
        let authorizer = self.state.authorizer();
        if !authorizer.has_permission(principal, year.organization_id, &FINANCIAL_PERIOD.view()) {
            return Ok(ScopedList::denied(&FINANCIAL_PERIOD.view()));
        }
        Ok(ScopedList::granted(self.state.financial_periods.for_year(year.id)))
    }

    // --- insurance ceiling ---

    pub fn set_insurance_ceiling(
        &self,
        principal: &Principal,
        year: FiscalYearId,
        amount: i64,
    ) -> DomainResult<InsuranceCeiling> {
        let year = self.state.fiscal_years.require(year)?;
        PermissionGuard::new(INSURANCE_CEILING.add()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        let ceiling = InsuranceCeiling::new(year.id, amount)?;
        self.state.insurance_ceilings.insert(ceiling.clone())?;
        Ok(ceiling)
    }

    pub fn remove_insurance_ceiling(
        &self,
        principal: &Principal,
        id: InsuranceCeilingId,
    ) -> DomainResult<()> {
        let ceiling = self.state.insurance_ceilings.require(id)?;
        let year = self.state.fiscal_years.require(ceiling.fiscal_year_id)?;
        PermissionGuard::new(INSURANCE_CEILING.delete()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        self.state.insurance_ceilings.remove(id)
    }

    // --- tax levels ---

    pub fn add_tax_level(&self, principal: &Principal, new: NewTaxLevel) -> DomainResult<TaxLevel> {
        let year = self.state.fiscal_years.require(new.fiscal_year_id)?;
        PermissionGuard::new(TAX_LEVEL.add()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        let level = TaxLevel::create(new)?;
        self.state.tax_levels.insert(level.clone())?;
        Ok(level)
    }

    pub fn remove_tax_level(&self, principal: &Principal, id: TaxLevelId) -> DomainResult<()> {
        let level = self.state.tax_levels.require(id)?;
        let year = self.state.fiscal_years.require(level.fiscal_year_id)?;
        PermissionGuard::new(TAX_LEVEL.delete()).check_organization(
            &self.state.authorizer(),
            principal,
            year.organization_id,
        )?;
        self.state.tax_levels.remove(id)
    }

    pub fn tax_levels_for_year(
        &self,
        principal: &Principal,
        year: FiscalYearId,
    ) -> DomainResult<ScopedList<TaxLevel>> {
        let year = self.state.fiscal_years.require(year)?;
        let authorizer = self.state.authorizer();
        if !authorizer.has_permission(principal, year.organization_id, &TAX_LEVEL.view()) {
            return Ok(ScopedList::denied(&TAX_LEVEL.view()));
        }
        Ok(ScopedList::granted(self.state.tax_levels.for_year(year.id)))
    }
}
