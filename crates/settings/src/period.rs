//! Financial periods within a fiscal year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hrpay_core::{DateRange, DomainError, DomainResult, Entity, FinancialPeriodId, FiscalYearId};

/// A payroll calculation window (typically one month) inside a fiscal year.
///
/// Name is unique per fiscal year and periods of the same year never overlap;
/// both are store-enforced against persisted siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    pub id: FinancialPeriodId,
    pub fiscal_year_id: FiscalYearId,
    pub name: String,
    pub period: DateRange,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFinancialPeriod {
    pub fiscal_year_id: FiscalYearId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FinancialPeriod {
    pub fn create(new: NewFinancialPeriod) -> DomainResult<Self> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("period name cannot be empty"));
        }
        Ok(Self {
            id: FinancialPeriodId::new(),
            fiscal_year_id: new.fiscal_year_id,
            name,
            period: DateRange::closed(new.start_date, new.end_date)?,
            is_active: true,
        })
    }

    pub fn ensure_no_overlap<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a FinancialPeriod>,
    ) -> DomainResult<()> {
        for other in existing {
            if other.id == self.id {
                continue;
            }
            if other.fiscal_year_id == self.fiscal_year_id && other.period.overlaps(&self.period) {
                return Err(DomainError::validation(
                    "financial period overlaps an existing period in this fiscal year",
                ));
            }
        }
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

impl Entity for FinancialPeriod {
    type Id = FinancialPeriodId;

    fn id(&self) -> FinancialPeriodId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn month(year: FiscalYearId, name: &str, from: NaiveDate, to: NaiveDate) -> FinancialPeriod {
        FinancialPeriod::create(NewFinancialPeriod {
            fiscal_year_id: year,
            name: name.into(),
            start_date: from,
            end_date: to,
        })
        .unwrap()
    }

    #[test]
    fn periods_of_one_year_must_not_overlap() {
        let year = FiscalYearId::new();
        let farvardin = month(year, "Farvardin", d(2024, 3, 20), d(2024, 4, 19));
        let ordibehesht = month(year, "Ordibehesht", d(2024, 4, 20), d(2024, 5, 20));
        ordibehesht.ensure_no_overlap([&farvardin]).unwrap();

        let clash = month(year, "Clash", d(2024, 4, 1), d(2024, 4, 30));
        assert!(clash.ensure_no_overlap([&farvardin, &ordibehesht]).is_err());
    }

    #[test]
    fn other_fiscal_years_do_not_conflict() {
        let a = month(FiscalYearId::new(), "P1", d(2024, 1, 1), d(2024, 1, 31));
        let b = month(FiscalYearId::new(), "P1", d(2024, 1, 1), d(2024, 1, 31));
        b.ensure_no_overlap([&a]).unwrap();
    }
}
