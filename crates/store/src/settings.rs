//! Payroll settings stores: fiscal years, periods, ceilings, tax brackets.

use std::collections::HashSet;

use hrpay_core::{
    DomainError, DomainResult, FinancialPeriodId, FiscalYearId, InsuranceCeilingId, OrganizationId,
    TaxLevelId,
};
use hrpay_settings::{FinancialPeriod, FiscalYear, InsuranceCeiling, TaxLevel};

use crate::table::InMemoryTable;

#[derive(Debug, Default)]
pub struct FiscalYearStore {
    table: InMemoryTable<FiscalYearId, FiscalYear>,
}

impl FiscalYearStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, year: FiscalYear) -> DomainResult<()> {
        self.ensure_valid(&year)?;
        self.table.insert(year.id, year);
        Ok(())
    }

    pub fn update(&self, year: FiscalYear) -> DomainResult<()> {
        if self.table.get(&year.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.ensure_valid(&year)?;
        self.table.insert(year.id, year);
        Ok(())
    }

    fn ensure_valid(&self, candidate: &FiscalYear) -> DomainResult<()> {
        let title_taken = self.table.any(|y| {
            y.id != candidate.id
                && y.organization_id == candidate.organization_id
                && y.title == candidate.title
        });
        if title_taken {
            return Err(DomainError::conflict(format!(
                "fiscal year '{}' already exists in this organization",
                candidate.title
            )));
        }
        let siblings = self.for_organization(candidate.organization_id);
        candidate.ensure_no_overlap(siblings.iter())
    }

    pub fn require(&self, id: FiscalYearId) -> DomainResult<FiscalYear> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<FiscalYear> {
        self.table.all()
    }

    pub fn for_organization(&self, organization: OrganizationId) -> Vec<FiscalYear> {
        self.table.filter(|y| y.organization_id == organization)
    }

    pub fn remove(&self, id: FiscalYearId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    /// Drop the organization's years, returning their ids so callers can
    /// cascade to the year-scoped children.
    pub fn purge_organization(&self, organization: OrganizationId) -> HashSet<FiscalYearId> {
        let removed: HashSet<_> = self
            .for_organization(organization)
            .into_iter()
            .map(|y| y.id)
            .collect();
        self.table.retain(|y| y.organization_id != organization);
        removed
    }
}

#[derive(Debug, Default)]
pub struct FinancialPeriodStore {
    table: InMemoryTable<FinancialPeriodId, FinancialPeriod>,
}

impl FinancialPeriodStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, period: FinancialPeriod) -> DomainResult<()> {
        self.ensure_valid(&period)?;
        self.table.insert(period.id, period);
        Ok(())
    }

    pub fn update(&self, period: FinancialPeriod) -> DomainResult<()> {
        if self.table.get(&period.id).is_none() {
            return Err(DomainError::NotFound);
        }
        self.ensure_valid(&period)?;
        self.table.insert(period.id, period);
        Ok(())
    }

    fn ensure_valid(&self, candidate: &FinancialPeriod) -> DomainResult<()> {
        let name_taken = self.table.any(|p| {
            p.id != candidate.id
                && p.fiscal_year_id == candidate.fiscal_year_id
                && p.name == candidate.name
        });
        if name_taken {
            return Err(DomainError::conflict(format!(
                "period '{}' already exists in this fiscal year",
                candidate.name
            )));
        }
        let siblings = self.for_year(candidate.fiscal_year_id);
        candidate.ensure_no_overlap(siblings.iter())
    }

    pub fn require(&self, id: FinancialPeriodId) -> DomainResult<FinancialPeriod> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list(&self) -> Vec<FinancialPeriod> {
        self.table.all()
    }

    pub fn for_year(&self, year: FiscalYearId) -> Vec<FinancialPeriod> {
        self.table.filter(|p| p.fiscal_year_id == year)
    }

    pub fn remove(&self, id: FinancialPeriodId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    /// Cascade step after fiscal years are purged; returns the dropped period
    /// ids for the next step down (work records, salary items).
    pub fn purge_years(&self, years: &HashSet<FiscalYearId>) -> HashSet<FinancialPeriodId> {
        let removed: HashSet<_> = self
            .table
            .filter(|p| years.contains(&p.fiscal_year_id))
            .into_iter()
            .map(|p| p.id)
            .collect();
        self.table.retain(|p| !years.contains(&p.fiscal_year_id));
        removed
    }
}

#[derive(Debug, Default)]
pub struct InsuranceCeilingStore {
    table: InMemoryTable<InsuranceCeilingId, InsuranceCeiling>,
}

impl InsuranceCeilingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// At most one ceiling per fiscal year.
    pub fn insert(&self, ceiling: InsuranceCeiling) -> DomainResult<()> {
        let taken = self
            .table
            .any(|c| c.id != ceiling.id && c.fiscal_year_id == ceiling.fiscal_year_id);
        if taken {
            return Err(DomainError::conflict(
                "this fiscal year already has an insurance ceiling",
            ));
        }
        self.table.insert(ceiling.id, ceiling);
        Ok(())
    }

    pub fn require(&self, id: InsuranceCeilingId) -> DomainResult<InsuranceCeiling> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn for_year(&self, year: FiscalYearId) -> Option<InsuranceCeiling> {
        self.table.filter(|c| c.fiscal_year_id == year).pop()
    }

    pub fn remove(&self, id: InsuranceCeilingId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_years(&self, years: &HashSet<FiscalYearId>) {
        self.table.retain(|c| !years.contains(&c.fiscal_year_id));
    }
}

#[derive(Debug, Default)]
pub struct TaxLevelStore {
    table: InMemoryTable<TaxLevelId, TaxLevel>,
}

impl TaxLevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, level: TaxLevel) -> DomainResult<()> {
        let siblings = self.for_year(level.fiscal_year_id);
        level.ensure_no_overlap(siblings.iter())?;
        self.table.insert(level.id, level);
        Ok(())
    }

    pub fn update(&self, level: TaxLevel) -> DomainResult<()> {
        if self.table.get(&level.id).is_none() {
            return Err(DomainError::NotFound);
        }
        let siblings = self.for_year(level.fiscal_year_id);
        level.ensure_no_overlap(siblings.iter())?;
        self.table.insert(level.id, level);
        Ok(())
    }

    pub fn require(&self, id: TaxLevelId) -> DomainResult<TaxLevel> {
        self.table.get(&id).ok_or(DomainError::NotFound)
    }

    /// Brackets of one year, lowest bound first.
    pub fn for_year(&self, year: FiscalYearId) -> Vec<TaxLevel> {
        let mut rows = self.table.filter(|l| l.fiscal_year_id == year);
        rows.sort_by_key(|l| l.from_amount);
        rows
    }

    pub fn remove(&self, id: TaxLevelId) -> DomainResult<()> {
        self.table.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    pub fn purge_years(&self, years: &HashSet<FiscalYearId>) {
        self.table.retain(|l| !years.contains(&l.fiscal_year_id));
    }
}
