//! Named UI visibility flags derived from the current identity

use super::catalog::{Action, Permission, Resource};
use super::facade::permits;
use super::types::CurrentUserIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat set of booleans screens branch on instead of permission strings.
///
/// Every flag is a single membership check; all flags are `false` while the
/// identity is loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiVisibility {
    pub show_products: bool,
    pub show_orders: bool,
    pub show_customers: bool,
    pub show_inventory: bool,
    pub show_categories: bool,
    pub show_promotions: bool,
    pub show_reviews: bool,
    pub show_analytics: bool,
    pub show_reports: bool,
    pub show_team: bool,
    pub show_settings: bool,
    pub show_billing: bool,
    pub show_notifications: bool,
    pub show_logs: bool,
    pub show_api: bool,
    pub can_bulk_import: bool,
    pub can_refund_orders: bool,
    pub can_update_order_status: bool,
    pub can_export_reports: bool,
    pub can_invite_members: bool,
    pub can_manage_api_keys: bool,
    pub can_manage_billing: bool,
}

impl UiVisibility {
    pub fn compute(identity: &CurrentUserIdentity) -> Self {
        let can = |resource: Resource, action: Action| {
            permits(identity, Permission::new(resource, action))
        };
        let view = |resource: Resource| can(resource, Action::View);

        Self {
            show_products: view(Resource::Products),
            show_orders: view(Resource::Orders),
            show_customers: view(Resource::Customers),
            show_inventory: view(Resource::Inventory),
            show_categories: view(Resource::Categories),
            show_promotions: view(Resource::Promotions),
            show_reviews: view(Resource::Reviews),
            show_analytics: view(Resource::Analytics),
            show_reports: view(Resource::Reports),
            show_team: view(Resource::Team),
            show_settings: view(Resource::Settings),
            show_billing: view(Resource::Billing),
            show_notifications: view(Resource::Notifications),
            show_logs: view(Resource::Logs),
            show_api: can(Resource::Api, Action::Access),
            can_bulk_import: can(Resource::Products, Action::BulkImport),
            can_refund_orders: can(Resource::Orders, Action::Refund),
            can_update_order_status: can(Resource::Orders, Action::UpdateStatus),
            can_export_reports: can(Resource::Reports, Action::Export),
            can_invite_members: can(Resource::Team, Action::Invite),
            can_manage_api_keys: can(Resource::Api, Action::ManageKeys),
            can_manage_billing: can(Resource::Billing, Action::Manage),
        }
    }

    /// Flags keyed by their field names
    pub fn to_map(&self) -> BTreeMap<String, bool> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => fields
                .into_iter()
                .filter_map(|(name, value)| value.as_bool().map(|flag| (name, flag)))
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    /// Number of flags set
    pub fn count_enabled(&self) -> usize {
        self.to_map().values().filter(|flag| **flag).count()
    }
}
