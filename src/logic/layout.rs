//! View Router: which dashboard tree a role gets.

use serde_json::Value;

use crate::logic::resolve_role;
use crate::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutVariant {
    Admin,
    RestaurantOwner,
    RestaurantStaff,
    Driver,
    Customer,
}

/// Screens a layout can mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Users,
    Restaurants,
    Orders,
    KitchenQueue,
    Deliveries,
    Menu,
    Inventory,
    Reservations,
    Reviews,
    Analytics,
    Notifications,
    Profile,
    MyOrders,
    MyReservations,
    Favorites,
    Addresses,
}

/// Pick the layout for a bare role string. Unknown roles get the customer
/// layout so nobody is left without a UI.
pub fn select_layout(role: &str) -> LayoutVariant {
    LayoutVariant::from(&Role::parse(role))
}

impl From<&Role> for LayoutVariant {
    fn from(role: &Role) -> Self {
        match role {
            Role::Admin => LayoutVariant::Admin,
            Role::RestaurantOwner => LayoutVariant::RestaurantOwner,
            Role::RestaurantStaff => LayoutVariant::RestaurantStaff,
            Role::Driver => LayoutVariant::Driver,
            Role::Customer | Role::Other(_) => LayoutVariant::Customer,
        }
    }
}

impl LayoutVariant {
    /// Layout straight from a raw user payload
    pub fn for_user(user: Option<&Value>) -> Self {
        select_layout(&resolve_role(user))
    }

    pub fn home_path(&self) -> &'static str {
        match self {
            LayoutVariant::Admin => "/admin",
            LayoutVariant::RestaurantOwner => "/owner",
            LayoutVariant::RestaurantStaff => "/staff",
            LayoutVariant::Driver => "/driver",
            LayoutVariant::Customer => "/",
        }
    }

    pub fn sections(&self) -> &'static [Section] {
        use Section::*;
        match self {
            LayoutVariant::Admin => &[
                Overview,
                Users,
                Restaurants,
                Orders,
                Reservations,
                Reviews,
                Inventory,
                Analytics,
                Notifications,
                Profile,
            ],
            LayoutVariant::RestaurantOwner => &[
                Overview,
                Orders,
                KitchenQueue,
                Menu,
                Inventory,
                Reservations,
                Reviews,
                Analytics,
                Notifications,
                Profile,
            ],
            LayoutVariant::RestaurantStaff => &[
                KitchenQueue,
                Orders,
                Reservations,
                Inventory,
                Notifications,
                Profile,
            ],
            LayoutVariant::Driver => &[Deliveries, Notifications, Profile],
            LayoutVariant::Customer => &[
                Restaurants,
                MyOrders,
                MyReservations,
                Favorites,
                Addresses,
                Notifications,
                Profile,
            ],
        }
    }

    /// Route guard for the host router
    pub fn can_access(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }
}

impl Section {
    /// Read endpoints a mounted section subscribes to
    pub fn endpoints(&self) -> &'static [&'static str] {
        match self {
            Section::Overview => &["get_dashboard_analytics", "get_order_stats"],
            Section::Users => &["get_users", "get_user_stats"],
            Section::Restaurants => &["get_restaurants"],
            Section::Orders => &["get_orders"],
            Section::KitchenQueue => &["get_kitchen_queue"],
            Section::Deliveries => &["get_delivery_queue"],
            Section::Menu => &["get_menu"],
            Section::Inventory => &[
                "get_inventory_items",
                "get_low_stock_items",
                "get_inventory_valuation",
            ],
            Section::Reservations => &["get_reservations"],
            Section::Reviews => &["get_reviews", "get_review_stats"],
            Section::Analytics => &["get_revenue_analytics", "get_popular_items"],
            Section::Notifications => &["get_notifications", "get_unread_count"],
            Section::Profile => &["get_profile"],
            Section::MyOrders => &["get_my_orders"],
            Section::MyReservations => &["get_my_reservations"],
            Section::Favorites => &["get_favorites"],
            Section::Addresses => &["get_addresses"],
        }
    }
}

impl std::fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            LayoutVariant::Admin => "Admin",
            LayoutVariant::RestaurantOwner => "RestaurantOwner",
            LayoutVariant::RestaurantStaff => "RestaurantStaff",
            LayoutVariant::Driver => "Driver",
            LayoutVariant::Customer => "Customer",
        };
        f.write_str(name)
    }
}
