//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! impl_uuid_newtype {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(
    /// Identifier of an organization (the multi-tenant boundary).
    OrganizationId,
    "OrganizationId"
);
impl_uuid_newtype!(
    /// Identifier of a user account (actor identity).
    UserId,
    "UserId"
);
impl_uuid_newtype!(
    /// Identifier of an organization-scoped role.
    RoleId,
    "RoleId"
);
impl_uuid_newtype!(
    /// Identifier of a user-to-role assignment within an organization.
    AssignmentId,
    "AssignmentId"
);
impl_uuid_newtype!(
    /// Identifier of an employee record.
    EmployeeId,
    "EmployeeId"
);
impl_uuid_newtype!(
    /// Identifier of an employee's membership window in an organization.
    MembershipId,
    "MembershipId"
);
impl_uuid_newtype!(
    /// Identifier of an employee bank account.
    BankAccountId,
    "BankAccountId"
);
impl_uuid_newtype!(
    /// Identifier of a department.
    DepartmentId,
    "DepartmentId"
);
impl_uuid_newtype!(
    /// Identifier of a job title.
    JobTitleId,
    "JobTitleId"
);
impl_uuid_newtype!(
    /// Identifier of an employment-history entry.
    EmploymentHistoryId,
    "EmploymentHistoryId"
);
impl_uuid_newtype!(
    /// Identifier of a monthly work record.
    WorkRecordId,
    "WorkRecordId"
);
impl_uuid_newtype!(
    /// Identifier of an employee loan.
    LoanId,
    "LoanId"
);
impl_uuid_newtype!(
    /// Identifier of a salary item type.
    SalaryItemTypeId,
    "SalaryItemTypeId"
);
impl_uuid_newtype!(
    /// Identifier of a per-employee salary item.
    SalaryItemId,
    "SalaryItemId"
);
impl_uuid_newtype!(
    /// Identifier of a fiscal year.
    FiscalYearId,
    "FiscalYearId"
);
impl_uuid_newtype!(
    /// Identifier of an insurance ceiling.
    InsuranceCeilingId,
    "InsuranceCeilingId"
);
impl_uuid_newtype!(
    /// Identifier of a tax level (bracket).
    TaxLevelId,
    "TaxLevelId"
);
impl_uuid_newtype!(
    /// Identifier of a financial period within a fiscal year.
    FinancialPeriodId,
    "FinancialPeriodId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        let id = OrganizationId::new();
        let parsed: OrganizationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<UserId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serde_is_transparent() {
        let id = EmployeeId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
