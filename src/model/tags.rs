use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::scalar_to_string;

/// Reserved id for the "whole collection" partition of a kind
pub const LIST_ID: &str = "LIST";

/// Cache partitions, one per concept the dashboards read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagKind {
    Profile,
    User,
    UserStats,
    Restaurant,
    MenuItem,
    Table,
    Room,
    /// Favorites and loyalty share one partition
    Favorites,
    Order,
    MyOrders,
    KitchenQueue,
    DeliveryQueue,
    OrderStats,
    Reservation,
    MyReservations,
    Availability,
    Review,
    MyReviews,
    ReviewStats,
    InventoryItem,
    LowStock,
    StockTransaction,
    InventoryAnalytics,
    Supplier,
    Notification,
    UnreadCount,
    Address,
    Analytics,
}

impl TagKind {
    pub const ALL: &'static [TagKind] = &[
        TagKind::Profile,
        TagKind::User,
        TagKind::UserStats,
        TagKind::Restaurant,
        TagKind::MenuItem,
        TagKind::Table,
        TagKind::Room,
        TagKind::Favorites,
        TagKind::Order,
        TagKind::MyOrders,
        TagKind::KitchenQueue,
        TagKind::DeliveryQueue,
        TagKind::OrderStats,
        TagKind::Reservation,
        TagKind::MyReservations,
        TagKind::Availability,
        TagKind::Review,
        TagKind::MyReviews,
        TagKind::ReviewStats,
        TagKind::InventoryItem,
        TagKind::LowStock,
        TagKind::StockTransaction,
        TagKind::InventoryAnalytics,
        TagKind::Supplier,
        TagKind::Notification,
        TagKind::UnreadCount,
        TagKind::Address,
        TagKind::Analytics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Profile => "Profile",
            TagKind::User => "User",
            TagKind::UserStats => "UserStats",
            TagKind::Restaurant => "Restaurant",
            TagKind::MenuItem => "MenuItem",
            TagKind::Table => "Table",
            TagKind::Room => "Room",
            TagKind::Favorites => "Favorites",
            TagKind::Order => "Order",
            TagKind::MyOrders => "MyOrders",
            TagKind::KitchenQueue => "KitchenQueue",
            TagKind::DeliveryQueue => "DeliveryQueue",
            TagKind::OrderStats => "OrderStats",
            TagKind::Reservation => "Reservation",
            TagKind::MyReservations => "MyReservations",
            TagKind::Availability => "Availability",
            TagKind::Review => "Review",
            TagKind::MyReviews => "MyReviews",
            TagKind::ReviewStats => "ReviewStats",
            TagKind::InventoryItem => "InventoryItem",
            TagKind::LowStock => "LowStock",
            TagKind::StockTransaction => "StockTransaction",
            TagKind::InventoryAnalytics => "InventoryAnalytics",
            TagKind::Supplier => "Supplier",
            TagKind::Notification => "Notification",
            TagKind::UnreadCount => "UnreadCount",
            TagKind::Address => "Address",
            TagKind::Analytics => "Analytics",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagKind::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown tag kind: {}", s))
    }
}

/// A concrete cache partition: a kind, optionally narrowed to one id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    pub kind: TagKind,
    pub id: Option<String>,
}

impl Tag {
    pub fn whole(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    pub fn list(kind: TagKind) -> Self {
        Self::entity(kind, LIST_ID)
    }

    pub fn entity(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }

    /// Whether invalidating `self` hits an entry that provided `provided`.
    ///
    /// A kind-wide tag on either side matches every id of that kind.
    pub fn invalidates(&self, provided: &Tag) -> bool {
        if self.kind != provided.kind {
            return false;
        }
        match (&self.id, &provided.id) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.kind, id),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// How a declared tag picks its id at call time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagScope {
    /// Every id of the kind
    Whole,
    /// The `LIST` partition
    List,
    /// A named partition such as `VALUATION`
    Fixed(&'static str),
    /// The id comes from an argument; kind-wide when the argument is absent
    Arg(&'static str),
    /// One tag per `id` found in the normalized result
    ResultIds,
}

/// A tag as declared on an endpoint, before arguments and results are known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagTemplate {
    pub kind: TagKind,
    pub scope: TagScope,
}

impl TagTemplate {
    pub const fn whole(kind: TagKind) -> Self {
        Self {
            kind,
            scope: TagScope::Whole,
        }
    }

    pub const fn list(kind: TagKind) -> Self {
        Self {
            kind,
            scope: TagScope::List,
        }
    }

    pub const fn fixed(kind: TagKind, name: &'static str) -> Self {
        Self {
            kind,
            scope: TagScope::Fixed(name),
        }
    }

    pub const fn arg(kind: TagKind, param: &'static str) -> Self {
        Self {
            kind,
            scope: TagScope::Arg(param),
        }
    }

    pub const fn result_ids(kind: TagKind) -> Self {
        Self {
            kind,
            scope: TagScope::ResultIds,
        }
    }

    /// Turn the template into concrete tags for one call
    pub fn resolve(&self, args: &Value, result: Option<&Value>) -> Vec<Tag> {
        match self.scope {
            TagScope::Whole => vec![Tag::whole(self.kind)],
            TagScope::List => vec![Tag::list(self.kind)],
            TagScope::Fixed(name) => vec![Tag::entity(self.kind, name)],
            TagScope::Arg(param) => match args.get(param).and_then(scalar_to_string) {
                Some(id) => vec![Tag::entity(self.kind, id)],
                None => vec![Tag::whole(self.kind)],
            },
            TagScope::ResultIds => result
                .map(result_ids)
                .unwrap_or_default()
                .into_iter()
                .map(|id| Tag::entity(self.kind, id))
                .collect(),
        }
    }

    /// Static check: can some call invalidating `self` ever hit an entry tagged by `provided`?
    pub fn may_invalidate(&self, provided: &TagTemplate) -> bool {
        if self.kind != provided.kind {
            return false;
        }
        use TagScope::*;
        match (self.scope, provided.scope) {
            (Whole, _) | (_, Whole) => true,
            (List, List) => true,
            (List, Fixed(name)) | (Fixed(name), List) => name == LIST_ID,
            (List, _) | (_, List) => false,
            (Fixed(a), Fixed(b)) => a == b,
            // dynamic ids can take any value
            _ => true,
        }
    }
}

impl std::fmt::Display for TagTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.scope {
            TagScope::Whole => write!(f, "{}", self.kind),
            TagScope::List => write!(f, "{}:{}", self.kind, LIST_ID),
            TagScope::Fixed(name) => write!(f, "{}:{}", self.kind, name),
            TagScope::Arg(param) => write!(f, "{}:<{}>", self.kind, param),
            TagScope::ResultIds => write!(f, "{}:<result ids>", self.kind),
        }
    }
}

/// Collect item ids from a canonical page, a bare array, or a single object
fn result_ids(result: &Value) -> Vec<String> {
    let items: Vec<&Value> = match result {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![result],
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| item.get("id").and_then(scalar_to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_wide_tag_hits_every_id() {
        let whole = Tag::whole(TagKind::Order);
        assert!(whole.invalidates(&Tag::entity(TagKind::Order, "o1")));
        assert!(whole.invalidates(&Tag::list(TagKind::Order)));
        assert!(!whole.invalidates(&Tag::whole(TagKind::Review)));
    }

    #[test]
    fn test_entity_tag_only_hits_same_id() {
        let o1 = Tag::entity(TagKind::Order, "o1");
        assert!(o1.invalidates(&Tag::entity(TagKind::Order, "o1")));
        assert!(!o1.invalidates(&Tag::entity(TagKind::Order, "o2")));
        assert!(!o1.invalidates(&Tag::list(TagKind::Order)));
        // kind-wide providers are hit by any id
        assert!(o1.invalidates(&Tag::whole(TagKind::Order)));
    }

    #[test]
    fn test_resolve_arg_falls_back_to_kind_wide() {
        let template = TagTemplate::arg(TagKind::ReviewStats, "restaurantId");

        let with_arg = template.resolve(&json!({"restaurantId": "r1"}), None);
        assert_eq!(with_arg, vec![Tag::entity(TagKind::ReviewStats, "r1")]);

        let without = template.resolve(&json!({}), None);
        assert_eq!(without, vec![Tag::whole(TagKind::ReviewStats)]);
    }

    #[test]
    fn test_resolve_result_ids_from_page_and_object() {
        let template = TagTemplate::result_ids(TagKind::Order);
        let page = json!({"data": [{"id": "o1"}, {"id": "o2"}], "total": 2});
        assert_eq!(
            template.resolve(&json!({}), Some(&page)),
            vec![
                Tag::entity(TagKind::Order, "o1"),
                Tag::entity(TagKind::Order, "o2")
            ]
        );

        let single = json!({"id": 7, "status": "Pending"});
        assert_eq!(
            template.resolve(&json!({}), Some(&single)),
            vec![Tag::entity(TagKind::Order, "7")]
        );
        assert!(template.resolve(&json!({}), None).is_empty());
    }

    #[test]
    fn test_static_matching() {
        let list = TagTemplate::list(TagKind::Order);
        let by_id = TagTemplate::arg(TagKind::Order, "id");
        let valuation = TagTemplate::fixed(TagKind::InventoryAnalytics, "VALUATION");

        assert!(list.may_invalidate(&TagTemplate::list(TagKind::Order)));
        assert!(!list.may_invalidate(&TagTemplate::result_ids(TagKind::Order)));
        assert!(by_id.may_invalidate(&TagTemplate::result_ids(TagKind::Order)));
        assert!(!by_id.may_invalidate(&TagTemplate::list(TagKind::Order)));
        assert!(TagTemplate::whole(TagKind::InventoryAnalytics).may_invalidate(&valuation));
        assert!(!valuation.may_invalidate(&TagTemplate::fixed(TagKind::InventoryAnalytics, "SUMMARY")));
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Tag::list(TagKind::Order).to_string(), "Order:LIST");
        assert_eq!(Tag::whole(TagKind::KitchenQueue).to_string(), "KitchenQueue");
        assert_eq!("lowstock".parse::<TagKind>(), Ok(TagKind::LowStock));
        assert!("Loyalty".parse::<TagKind>().is_err());
    }
}
