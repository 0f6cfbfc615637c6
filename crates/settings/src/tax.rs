//! Tax brackets per fiscal year.

use serde::{Deserialize, Serialize};

use hrpay_core::{DomainError, DomainResult, Entity, FiscalYearId, TaxLevelId};

/// One tax bracket: amounts in `[from_amount, to_amount)` (minor units) taxed
/// at `tax_rate_bp` basis points (e.g. 1000 = 10%).
///
/// Brackets of the same fiscal year must not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevel {
    pub id: TaxLevelId,
    pub fiscal_year_id: FiscalYearId,
    pub title: String,
    pub from_amount: i64,
    pub to_amount: i64,
    pub tax_rate_bp: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaxLevel {
    pub fiscal_year_id: FiscalYearId,
    pub title: String,
    pub from_amount: i64,
    pub to_amount: i64,
    pub tax_rate_bp: u32,
}

impl TaxLevel {
    pub fn create(new: NewTaxLevel) -> DomainResult<Self> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("tax level title cannot be empty"));
        }
        if new.from_amount < 0 || new.from_amount >= new.to_amount {
            return Err(DomainError::validation(
                "tax bracket bounds must satisfy 0 <= from < to",
            ));
        }
        if new.tax_rate_bp > 10_000 {
            return Err(DomainError::validation("tax rate cannot exceed 100%"));
        }
        Ok(Self {
            id: TaxLevelId::new(),
            fiscal_year_id: new.fiscal_year_id,
            title,
            from_amount: new.from_amount,
            to_amount: new.to_amount,
            tax_rate_bp: new.tax_rate_bp,
        })
    }

    /// Half-open interval overlap within the same fiscal year.
    pub fn ensure_no_overlap<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a TaxLevel>,
    ) -> DomainResult<()> {
        for other in existing {
            if other.id == self.id || other.fiscal_year_id != self.fiscal_year_id {
                continue;
            }
            if self.from_amount < other.to_amount && other.from_amount < self.to_amount {
                return Err(DomainError::validation(
                    "tax bracket overlaps an existing bracket in this fiscal year",
                ));
            }
        }
        Ok(())
    }
}

impl Entity for TaxLevel {
    type Id = TaxLevelId;

    fn id(&self) -> TaxLevelId {
        self.id
    }
}
