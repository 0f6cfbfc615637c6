//! Per-domain application services.
//!
//! Each service resolves ids first (fetch-or-not-found), then runs the
//! permission guard, then validates and writes. List queries go through the
//! scoped filtering helpers, so a denied explicit request stays a soft empty
//! result while denied mutations surface as errors.

pub mod employees;
pub mod hr;
pub mod loans;
pub mod organizations;
pub mod roles;
pub mod salaries;
pub mod settings;

use hrpay_auth::Principal;
use hrpay_core::{DomainError, DomainResult};

/// Staff/superuser gate for platform-administration operations (role and
/// assignment management).
fn require_staff(principal: &Principal) -> DomainResult<()> {
    if principal.is_bypass() {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}
