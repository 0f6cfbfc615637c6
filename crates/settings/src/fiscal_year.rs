//! Fiscal years and insurance ceilings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hrpay_core::{
    DateRange, DomainError, DomainResult, Entity, FiscalYearId, InsuranceCeilingId, OrganizationId,
};

/// A fiscal year of one organization.
///
/// Title is unique per organization and years of the same organization never
/// overlap; both are enforced by the store against persisted siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub id: FiscalYearId,
    pub organization_id: OrganizationId,
    pub title: String,
    pub period: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFiscalYear {
    pub organization_id: OrganizationId,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FiscalYear {
    pub fn create(new: NewFiscalYear) -> DomainResult<Self> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("fiscal year title cannot be empty"));
        }
        Ok(Self {
            id: FiscalYearId::new(),
            organization_id: new.organization_id,
            title,
            period: DateRange::closed(new.start_date, new.end_date)?,
        })
    }

    pub fn ensure_no_overlap<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a FiscalYear>,
    ) -> DomainResult<()> {
        for other in existing {
            if other.id == self.id {
                continue;
            }
            if other.organization_id == self.organization_id
                && other.period.overlaps(&self.period)
            {
                return Err(DomainError::validation(
                    "fiscal year overlaps an existing fiscal year of this organization",
                ));
            }
        }
        Ok(())
    }
}

impl Entity for FiscalYear {
    type Id = FiscalYearId;

    fn id(&self) -> FiscalYearId {
        self.id
    }
}

/// The insurance ceiling amount of one fiscal year (at most one per year,
/// store-enforced). Minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceCeiling {
    pub id: InsuranceCeilingId,
    pub fiscal_year_id: FiscalYearId,
    pub amount: i64,
}

impl InsuranceCeiling {
    pub fn new(fiscal_year_id: FiscalYearId, amount: i64) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::validation("insurance ceiling must be positive"));
        }
        Ok(Self {
            id: InsuranceCeilingId::new(),
            fiscal_year_id,
            amount,
        })
    }
}

impl Entity for InsuranceCeiling {
    type Id = InsuranceCeilingId;

    fn id(&self) -> InsuranceCeilingId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn year(org: OrganizationId, title: &str, from: NaiveDate, to: NaiveDate) -> FiscalYear {
        FiscalYear::create(NewFiscalYear {
            organization_id: org,
            title: title.into(),
            start_date: from,
            end_date: to,
        })
        .unwrap()
    }

    #[test]
    fn start_must_precede_end() {
        let err = FiscalYear::create(NewFiscalYear {
            organization_id: OrganizationId::new(),
            title: "1403".into(),
            start_date: d(2024, 3, 20),
            end_date: d(2024, 3, 20),
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn years_of_one_organization_must_not_overlap() {
        let org = OrganizationId::new();
        let y1403 = year(org, "1403", d(2024, 3, 20), d(2025, 3, 20));
        let clash = year(org, "1403b", d(2025, 1, 1), d(2026, 1, 1));
        assert!(clash.ensure_no_overlap([&y1403]).is_err());

        let elsewhere = year(OrganizationId::new(), "1403", d(2025, 1, 1), d(2026, 1, 1));
        elsewhere.ensure_no_overlap([&y1403]).unwrap();
    }

    #[test]
    fn ceiling_amount_must_be_positive() {
        assert!(InsuranceCeiling::new(FiscalYearId::new(), 0).is_err());
        assert!(InsuranceCeiling::new(FiscalYearId::new(), 70_000_000).is_ok());
    }
}
