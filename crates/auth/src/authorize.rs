//! The organization-scoped authorization decision.

use thiserror::Error;
use tracing::{debug, trace};

use hrpay_core::{DomainError, OrganizationId};

use crate::directory::RoleDirectory;
use crate::permission::Permission;
use crate::principal::Principal;

/// Authorization failure at a mutation boundary.
///
/// Read paths never surface this: list filtering degrades to an empty result
/// instead. Only guarded writes convert the boolean decision into an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Anonymous,

    #[error("forbidden: missing permission '{permission}' in organization {organization}")]
    Forbidden {
        permission: String,
        organization: OrganizationId,
    },
}

impl From<AuthzError> for DomainError {
    fn from(_: AuthzError) -> Self {
        DomainError::Unauthorized
    }
}

/// Evaluates authorization decisions against the current directory state.
///
/// - No IO beyond the directory lookups
/// - No panics
/// - No caching: every call reflects the role/assignment data at call time
pub struct Authorizer<'a> {
    directory: &'a dyn RoleDirectory,
}

impl<'a> Authorizer<'a> {
    pub fn new(directory: &'a dyn RoleDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &dyn RoleDirectory {
        self.directory
    }

    /// Can this principal perform `required` inside `organization`?
    ///
    /// Decision order, first hit wins:
    /// 1. anonymous sessions are denied outright (never an error);
    /// 2. staff/superuser accounts are granted regardless of organization;
    /// 3. otherwise the union of permission sets over the principal's role
    ///    assignments in `organization` is consulted.
    pub fn has_permission(
        &self,
        principal: &Principal,
        organization: OrganizationId,
        required: &Permission,
    ) -> bool {
        let Some(account) = principal.account() else {
            return false;
        };

        if account.is_bypass() {
            trace!(user = %account.id, %organization, permission = %required, "staff bypass");
            return true;
        }

        let granted = self
            .directory
            .roles_for(account.id, organization)
            .iter()
            .any(|role| role.grants(required));

        if !granted {
            debug!(user = %account.id, %organization, permission = %required, "permission denied");
        }
        granted
    }

    /// [`Self::has_permission`] wrapped for guarded mutations.
    pub fn require(
        &self,
        principal: &Principal,
        organization: OrganizationId,
        required: &Permission,
    ) -> Result<(), AuthzError> {
        if matches!(principal, Principal::Anonymous) {
            return Err(AuthzError::Anonymous);
        }
        if self.has_permission(principal, organization, required) {
            Ok(())
        } else {
            Err(AuthzError::Forbidden {
                permission: required.as_str().to_string(),
                organization,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryRoleDirectory;
    use crate::principal::UserAccount;
    use crate::role::{OrganizationRole, UserOrganizationRole};
    use hrpay_core::UserId;

    fn setup() -> (InMemoryRoleDirectory, OrganizationId, UserAccount) {
        let dir = InMemoryRoleDirectory::new();
        let org = OrganizationId::new();
        let account = UserAccount::new(UserId::new(), "alice");
        (dir, org, account)
    }

    fn editor_role(org: OrganizationId) -> OrganizationRole {
        OrganizationRole::new(
            org,
            "HR-Editor",
            None,
            [
                Permission::add("hr", "department"),
                Permission::change("hr", "department"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn anonymous_is_denied_without_error() {
        let (dir, org, _) = setup();
        let authorizer = Authorizer::new(&dir);
        assert!(!authorizer.has_permission(
            &Principal::Anonymous,
            org,
            &Permission::view("hr", "department")
        ));
        assert_eq!(
            authorizer.require(&Principal::Anonymous, org, &Permission::view("hr", "department")),
            Err(AuthzError::Anonymous)
        );
    }

    #[test]
    fn superuser_and_staff_bypass_every_organization() {
        let (dir, org, mut account) = setup();
        account.is_superuser = true;
        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account.clone());

        // No roles exist anywhere, yet the check passes for arbitrary perms.
        assert!(authorizer.has_permission(&principal, org, &Permission::new("anything.at_all")));

        account.is_superuser = false;
        account.is_staff = true;
        let principal = Principal::authenticated(account);
        assert!(authorizer.has_permission(
            &principal,
            OrganizationId::new(),
            &Permission::delete("salaries", "salaryitemtype")
        ));
    }

    #[test]
    fn no_assignment_means_denied() {
        let (dir, org, account) = setup();
        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        assert!(!authorizer.has_permission(&principal, org, &Permission::add("hr", "department")));
    }

    #[test]
    fn assigned_role_grants_exactly_its_permission_set() {
        let (dir, org, account) = setup();
        let role = editor_role(org);
        let role_id = role.id;
        dir.insert_role(role).unwrap();
        dir.assign(UserOrganizationRole::new(account.id, org, role_id)).unwrap();

        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);

        assert!(authorizer.has_permission(&principal, org, &Permission::add("hr", "department")));
        assert!(!authorizer.has_permission(&principal, org, &Permission::delete("hr", "department")));

        // The grant does not leak into other organizations.
        let other = OrganizationId::new();
        assert!(!authorizer.has_permission(&principal, other, &Permission::add("hr", "department")));
    }

    #[test]
    fn permissions_union_across_multiple_roles() {
        let (dir, org, account) = setup();

        let viewer =
            OrganizationRole::new(org, "Viewer", None, [Permission::view("hr", "department")])
                .unwrap();
        let editor = editor_role(org);
        let (viewer_id, editor_id) = (viewer.id, editor.id);
        dir.insert_role(viewer).unwrap();
        dir.insert_role(editor).unwrap();
        dir.assign(UserOrganizationRole::new(account.id, org, viewer_id)).unwrap();
        dir.assign(UserOrganizationRole::new(account.id, org, editor_id)).unwrap();

        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);

        assert!(authorizer.has_permission(&principal, org, &Permission::view("hr", "department")));
        assert!(authorizer.has_permission(&principal, org, &Permission::change("hr", "department")));
    }

    #[test]
    fn revocation_is_visible_on_next_call() {
        let (dir, org, account) = setup();
        let role = editor_role(org);
        let role_id = role.id;
        dir.insert_role(role.clone()).unwrap();
        let assignment = UserOrganizationRole::new(account.id, org, role_id);
        dir.assign(assignment).unwrap();

        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);
        let perm = Permission::add("hr", "department");
        assert!(authorizer.has_permission(&principal, org, &perm));

        // Remove the permission from the role: flips immediately.
        let mut trimmed = role.clone();
        trimmed.revoke(&perm);
        dir.update_role(trimmed).unwrap();
        assert!(!authorizer.has_permission(&principal, org, &perm));

        // Restore, then delete the assignment: flips again.
        dir.update_role(role).unwrap();
        assert!(authorizer.has_permission(&principal, org, &perm));
        dir.revoke(assignment.id).unwrap();
        assert!(!authorizer.has_permission(&principal, org, &perm));
    }

    #[test]
    fn require_reports_the_missing_permission() {
        let (dir, org, account) = setup();
        let authorizer = Authorizer::new(&dir);
        let principal = Principal::authenticated(account);

        let err = authorizer
            .require(&principal, org, &Permission::change("hr", "department"))
            .unwrap_err();
        match err {
            AuthzError::Forbidden { permission, organization } => {
                assert_eq!(permission, "hr.change_department");
                assert_eq!(organization, org);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_permission() -> impl Strategy<Value = Permission> {
            ("[a-z]{1,12}", "[a-z]{1,16}")
                .prop_map(|(app, entity)| Permission::view(&app, &entity))
        }

        proptest! {
            // The decision order holds for arbitrary permissions and
            // organizations, not just the catalogued ones.
            #[test]
            fn anonymous_is_never_granted(perm in arb_permission()) {
                let dir = InMemoryRoleDirectory::new();
                let authorizer = Authorizer::new(&dir);
                prop_assert!(!authorizer.has_permission(
                    &Principal::Anonymous,
                    OrganizationId::new(),
                    &perm,
                ));
            }

            #[test]
            fn bypass_is_always_granted(perm in arb_permission(), staff in any::<bool>()) {
                let dir = InMemoryRoleDirectory::new();
                let authorizer = Authorizer::new(&dir);
                let mut account = UserAccount::new(UserId::new(), "root");
                if staff {
                    account.is_staff = true;
                } else {
                    account.is_superuser = true;
                }
                prop_assert!(authorizer.has_permission(
                    &Principal::authenticated(account),
                    OrganizationId::new(),
                    &perm,
                ));
            }

            #[test]
            fn without_assignments_only_bypass_passes(perm in arb_permission()) {
                let dir = InMemoryRoleDirectory::new();
                let authorizer = Authorizer::new(&dir);
                let account = UserAccount::new(UserId::new(), "plain");
                prop_assert!(!authorizer.has_permission(
                    &Principal::authenticated(account),
                    OrganizationId::new(),
                    &perm,
                ));
            }
        }
    }
}
