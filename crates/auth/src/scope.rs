//! Scoped query filtering.
//!
//! Translates "show me all records of type X that I may see" into a concrete
//! filter. Two request shapes exist: an explicit organization in the request,
//! and an unscoped "everything across my organizations" list. Both are
//! re-evaluated per call; there is no cross-request state.

use std::collections::HashSet;

use serde::Serialize;

use hrpay_core::OrganizationId;

use crate::authorize::Authorizer;
use crate::permission::Permission;
use crate::principal::Principal;

/// Result of a scoped list query.
///
/// A denied explicit request is a soft failure: the page still renders, just
/// empty, with the message carried here. It is never an error/exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedList<T> {
    pub rows: Vec<T>,
    /// User-facing denial message when an explicitly requested organization
    /// was not authorized; `None` when the rows are authoritative.
    pub denial: Option<String>,
}

impl<T> ScopedList<T> {
    pub fn granted(rows: Vec<T>) -> Self {
        Self { rows, denial: None }
    }

    pub fn denied(permission: &Permission) -> Self {
        Self {
            rows: Vec::new(),
            denial: Some(format!(
                "you do not have the '{permission}' permission in this organization"
            )),
        }
    }

    pub fn is_denied(&self) -> bool {
        self.denial.is_some()
    }
}

/// The organizations in `organizations` where the principal holds `view`.
///
/// Staff/superusers pass for every organization via the bypass inside
/// `has_permission`. This is an O(organizations) scan per request — a
/// documented ceiling; it is the single place a denormalized per-user index
/// would slot in.
pub fn visible_organizations(
    authorizer: &Authorizer<'_>,
    principal: &Principal,
    organizations: impl IntoIterator<Item = OrganizationId>,
    view: &Permission,
) -> HashSet<OrganizationId> {
    organizations
        .into_iter()
        .filter(|org| authorizer.has_permission(principal, *org, view))
        .collect()
}

/// Explicit-organization list: all rows in `organization`, or a denial.
///
/// The caller must have resolved `organization` to an existing record first
/// (fetch-or-404); this function only answers the permission question.
pub fn scope_to_organization<T>(
    authorizer: &Authorizer<'_>,
    principal: &Principal,
    organization: OrganizationId,
    view: &Permission,
    rows: Vec<T>,
    organization_of: impl Fn(&T) -> OrganizationId,
) -> ScopedList<T> {
    if !authorizer.has_permission(principal, organization, view) {
        return ScopedList::denied(view);
    }
    let rows = rows
        .into_iter()
        .filter(|row| organization_of(row) == organization)
        .collect();
    ScopedList::granted(rows)
}

/// Unscoped list: staff/superusers see everything; everyone else sees rows
/// whose organization is in their accept set.
pub fn scope_across_organizations<T>(
    authorizer: &Authorizer<'_>,
    principal: &Principal,
    all_organizations: impl IntoIterator<Item = OrganizationId>,
    view: &Permission,
    rows: Vec<T>,
    organization_of: impl Fn(&T) -> OrganizationId,
) -> ScopedList<T> {
    if principal.is_bypass() {
        return ScopedList::granted(rows);
    }
    let accepted = visible_organizations(authorizer, principal, all_organizations, view);
    let rows = rows
        .into_iter()
        .filter(|row| accepted.contains(&organization_of(row)))
        .collect();
    ScopedList::granted(rows)
}

/// Employee-anchored access: is there *any* organization among the employee's
/// memberships where the principal holds `required`?
///
/// Short-circuits on the first grant; the staff bypass applies through
/// `has_permission` (and also covers an employee with zero memberships).
pub fn can_access_employee(
    authorizer: &Authorizer<'_>,
    principal: &Principal,
    membership_organizations: impl IntoIterator<Item = OrganizationId>,
    required: &Permission,
) -> bool {
    if principal.is_bypass() {
        return true;
    }
    membership_organizations
        .into_iter()
        .any(|org| authorizer.has_permission(principal, org, required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{InMemoryRoleDirectory, RoleDirectory};
    use crate::principal::UserAccount;
    use crate::role::{OrganizationRole, UserOrganizationRole};
    use hrpay_core::UserId;

    struct Row {
        organization_id: OrganizationId,
        label: &'static str,
    }

    fn grant_view(dir: &InMemoryRoleDirectory, user: UserId, org: OrganizationId) {
        let role =
            OrganizationRole::new(org, "Viewer", None, [Permission::view("hr", "department")])
                .unwrap();
        let role_id = role.id;
        dir.insert_role(role).unwrap();
        dir.assign(UserOrganizationRole::new(user, org, role_id)).unwrap();
    }

    #[test]
    fn unscoped_list_filters_to_accept_set() {
        let dir = InMemoryRoleDirectory::new();
        let (a, b, c) = (OrganizationId::new(), OrganizationId::new(), OrganizationId::new());
        let account = UserAccount::new(UserId::new(), "carol");
        grant_view(&dir, account.id, a);
        grant_view(&dir, account.id, c);

        let rows = vec![
            Row { organization_id: a, label: "a" },
            Row { organization_id: b, label: "b" },
            Row { organization_id: c, label: "c" },
        ];

        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        let view = Permission::view("hr", "department");

        let listed = scope_across_organizations(
            &authorizer,
            &principal,
            [a, b, c],
            &view,
            rows,
            |r| r.organization_id,
        );
        assert!(!listed.is_denied());
        let labels: Vec<_> = listed.rows.iter().map(|r| r.label).collect();
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&"a") && labels.contains(&"c"));
    }

    #[test]
    fn explicit_request_for_denied_organization_is_soft_empty() {
        let dir = InMemoryRoleDirectory::new();
        let (a, b) = (OrganizationId::new(), OrganizationId::new());
        let account = UserAccount::new(UserId::new(), "carol");
        grant_view(&dir, account.id, a);

        let rows = vec![Row { organization_id: b, label: "b" }];
        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        let view = Permission::view("hr", "department");

        let listed =
            scope_to_organization(&authorizer, &principal, b, &view, rows, |r| r.organization_id);
        assert!(listed.is_denied());
        assert!(listed.rows.is_empty());
        assert!(listed.denial.unwrap().contains("hr.view_department"));
    }

    #[test]
    fn explicit_request_filters_other_organizations_out() {
        let dir = InMemoryRoleDirectory::new();
        let (a, b) = (OrganizationId::new(), OrganizationId::new());
        let account = UserAccount::new(UserId::new(), "carol");
        grant_view(&dir, account.id, a);

        let rows = vec![
            Row { organization_id: a, label: "a" },
            Row { organization_id: b, label: "b" },
        ];
        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        let view = Permission::view("hr", "department");

        let listed =
            scope_to_organization(&authorizer, &principal, a, &view, rows, |r| r.organization_id);
        assert_eq!(listed.rows.len(), 1);
        assert_eq!(listed.rows[0].label, "a");
    }

    #[test]
    fn bypass_sees_everything_unscoped() {
        let dir = InMemoryRoleDirectory::new();
        let (a, b) = (OrganizationId::new(), OrganizationId::new());
        let mut account = UserAccount::new(UserId::new(), "root");
        account.is_staff = true;

        let rows = vec![
            Row { organization_id: a, label: "a" },
            Row { organization_id: b, label: "b" },
        ];
        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        let view = Permission::view("hr", "department");

        let listed = scope_across_organizations(
            &authorizer,
            &principal,
            [a, b],
            &view,
            rows,
            |r| r.organization_id,
        );
        assert_eq!(listed.rows.len(), 2);
    }

    #[test]
    fn anonymous_unscoped_list_is_empty() {
        let dir = InMemoryRoleDirectory::new();
        let a = OrganizationId::new();
        let rows = vec![Row { organization_id: a, label: "a" }];
        let authorizer = Authorizer::new(&dir);
        let view = Permission::view("hr", "department");

        let listed = scope_across_organizations(
            &authorizer,
            &Principal::Anonymous,
            [a],
            &view,
            rows,
            |r| r.organization_id,
        );
        assert!(listed.rows.is_empty());
        assert!(!listed.is_denied());
    }

    #[test]
    fn employee_access_short_circuits_on_any_membership() {
        let dir = InMemoryRoleDirectory::new();
        let (a, b) = (OrganizationId::new(), OrganizationId::new());
        let account = UserAccount::new(UserId::new(), "carol");
        grant_view(&dir, account.id, b);

        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        let view = Permission::view("hr", "department");

        assert!(can_access_employee(&authorizer, &principal, [a, b], &view));
        assert!(!can_access_employee(&authorizer, &principal, [a], &view));
        // Zero memberships: only the bypass may pass.
        assert!(!can_access_employee(&authorizer, &principal, [], &view));

        let mut staff = UserAccount::new(UserId::new(), "root");
        staff.is_staff = true;
        assert!(can_access_employee(&authorizer, &Principal::authenticated(staff), [], &view));
    }
}
