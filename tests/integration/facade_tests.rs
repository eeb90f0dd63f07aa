//! RBAC facade integration tests
//!
//! Drive the facade over catalog-derived identities for every role.

#[cfg(test)]
mod tests {
    use crate::common::{AuthorizationAssertions, IdentityFactory, perm};
    use merchant_rbac::auth::rbac::{all_permissions, hierarchy_level, permissions_for_role};
    use merchant_rbac::{
        Action, AuthorizeOptions, CurrentUserIdentity, LOADING_REASON, MemberStatus, RbacFacade,
        Resource, Role, TeamMember,
    };

    fn rbac_for(role: Role) -> RbacFacade {
        RbacFacade::from_identity(IdentityFactory::for_role(role))
    }

    #[test]
    fn test_grants_are_cumulative_up_the_hierarchy() {
        for permission in all_permissions() {
            let mut granted_below = false;
            for role in Role::ALL {
                let granted = rbac_for(role).has_permission(permission);
                assert!(
                    granted || !granted_below,
                    "{} lost {} held by a lower role",
                    role,
                    permission
                );
                granted_below |= granted;
            }
        }
    }

    #[test]
    fn test_owner_holds_the_full_catalog() {
        let owner = rbac_for(Role::Owner);
        assert!(owner.has_all_permissions(&all_permissions()));
        assert_eq!(permissions_for_role(Role::Owner).len(), all_permissions().len());
    }

    #[test]
    fn test_staff_tier() {
        let staff = rbac_for(Role::Staff);

        staff
            .can_perform_action(Action::UpdateStatus, Resource::Orders)
            .assert_granted();
        staff
            .can_perform_action(Action::Refund, Resource::Orders)
            .assert_denied_with("refund orders");
        assert!(!staff.can_view(Resource::Billing));
        assert!(!staff.can_view(Resource::Team));
        assert!(staff.can_edit(Resource::Profile));
    }

    #[test]
    fn test_sensitive_permissions_need_admin_or_above() {
        let manager = rbac_for(Role::Manager);
        let admin = rbac_for(Role::Admin);

        for token in ["orders:refund", "products:delete", "settings:edit", "team:change_role"] {
            assert!(!manager.has_permission(perm(token)), "{}", token);
            assert!(admin.has_permission(perm(token)), "{}", token);
        }
        for token in ["billing:manage", "team:remove", "api:manage_keys"] {
            assert!(!admin.has_permission(perm(token)), "{}", token);
            assert!(rbac_for(Role::Owner).has_permission(perm(token)), "{}", token);
        }
    }

    #[test]
    fn test_role_levels() {
        assert_eq!(hierarchy_level(Role::Owner), 4);
        assert_eq!(hierarchy_level(Role::Staff), 1);

        let admin = rbac_for(Role::Admin);
        assert!(admin.has_role_level(Role::Manager));
        assert!(admin.has_role_level(Role::Admin));
        assert!(!admin.has_role_level(Role::Owner));
    }

    #[test]
    fn test_assignable_and_editable_roles() {
        assert_eq!(
            rbac_for(Role::Owner).assignable_roles(),
            vec![Role::Staff, Role::Manager, Role::Admin]
        );
        assert_eq!(
            rbac_for(Role::Admin).assignable_roles(),
            vec![Role::Staff, Role::Manager]
        );
        assert!(rbac_for(Role::Manager).assignable_roles().is_empty());

        assert_eq!(
            rbac_for(Role::Owner).editable_roles(),
            vec![Role::Staff, Role::Manager, Role::Admin]
        );
        assert_eq!(rbac_for(Role::Manager).editable_roles(), vec![Role::Staff]);
        assert!(rbac_for(Role::Staff).editable_roles().is_empty());
    }

    #[test]
    fn test_admin_assignment_needs_change_role_permission() {
        let without = RbacFacade::from_identity(IdentityFactory::with_tokens(
            Role::Admin,
            &["team:view", "team:edit"],
        ));
        assert!(!without.can_assign_role(Role::Manager));

        let with = RbacFacade::from_identity(IdentityFactory::with_tokens(
            Role::Admin,
            &["team:change_role"],
        ));
        assert!(with.can_assign_role(Role::Manager));
        assert!(!with.can_assign_role(Role::Admin));
    }

    #[test]
    fn test_member_editing_uses_member_role() {
        let manager = rbac_for(Role::Manager);
        let staff_member = TeamMember::new("m-7", "Ari", "ari@example.com", Role::Staff)
            .with_status(MemberStatus::Active);
        let admin_member = TeamMember::new("m-8", "Kim", "kim@example.com", Role::Admin);

        assert!(manager.can_edit_member(&staff_member));
        assert!(!manager.can_edit_member(&admin_member));
    }

    #[test]
    fn test_loading_identity_denies_with_loading_reason() {
        let rbac = RbacFacade::from_identity(CurrentUserIdentity::loading());

        rbac.can_perform_action(Action::View, Resource::Products)
            .assert_denied_with(LOADING_REASON);
        assert!(!rbac.has_role_level(Role::Staff));
        assert!(!rbac.can_access_feature(&[perm("orders:view")], false));
        assert_eq!(rbac.ui_visibility().count_enabled(), 0);

        let mut called = false;
        assert!(!rbac.authorize(
            &[perm("orders:view")],
            AuthorizeOptions::new().on_unauthorized(|| called = true),
        ));
        assert!(!called);
    }

    #[test]
    fn test_visibility_tracks_role() {
        let staff = rbac_for(Role::Staff).ui_visibility();
        assert!(staff.show_orders);
        assert!(staff.can_update_order_status);
        assert!(!staff.show_billing);
        assert!(!staff.can_refund_orders);

        let owner = rbac_for(Role::Owner).ui_visibility();
        assert_eq!(owner.count_enabled(), owner.to_map().len());
    }
}
