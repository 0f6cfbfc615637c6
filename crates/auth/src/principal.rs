//! Request principals.
//!
//! The principal is a tagged sum type rather than a duck-typed "maybe a real
//! user" object: authorization code pattern-matches on it instead of
//! runtime-type-checking the session object.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use hrpay_core::UserId;

use crate::Permission;

/// A fully loaded user account as supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub is_active: bool,
    /// Platform-wide administrator: bypasses every organization-scoped check.
    pub is_staff: bool,
    /// Super-administrator: same bypass as staff, kept separate because the
    /// platform distinguishes them.
    pub is_superuser: bool,
    /// Permissions granted globally, outside any organization. These are
    /// consulted by callers directly (e.g. unscoped screen access), never by
    /// the organization-scoped check.
    pub global_permissions: HashSet<Permission>,
}

impl UserAccount {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            global_permissions: HashSet::new(),
        }
    }

    /// Whether this account short-circuits all organization-scoped checks.
    pub fn is_bypass(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    /// Global (organization-independent) permission test.
    pub fn has_global_perm(&self, permission: &Permission) -> bool {
        self.is_bypass() || self.global_permissions.contains(permission)
    }
}

/// The acting principal of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    /// No authenticated session. All organization-scoped checks answer false.
    Anonymous,
    Authenticated(UserAccount),
}

impl Principal {
    pub fn authenticated(account: UserAccount) -> Self {
        Self::Authenticated(account)
    }

    /// The account behind the principal, if any.
    pub fn account(&self) -> Option<&UserAccount> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(account) => Some(account),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.account().map(|a| a.id)
    }

    /// Staff/superuser bypass, false for anonymous sessions.
    pub fn is_bypass(&self) -> bool {
        self.account().is_some_and(UserAccount::is_bypass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_account() {
        assert!(Principal::Anonymous.account().is_none());
        assert!(!Principal::Anonymous.is_bypass());
    }

    #[test]
    fn staff_flag_grants_bypass() {
        let mut account = UserAccount::new(UserId::new(), "root");
        assert!(!account.is_bypass());
        account.is_staff = true;
        assert!(Principal::authenticated(account).is_bypass());
    }

    #[test]
    fn global_permissions_are_independent_of_bypass() {
        let mut account = UserAccount::new(UserId::new(), "clerk");
        let perm = Permission::view("hr", "department");
        assert!(!account.has_global_perm(&perm));
        account.global_permissions.insert(perm.clone());
        assert!(account.has_global_perm(&perm));
    }
}
