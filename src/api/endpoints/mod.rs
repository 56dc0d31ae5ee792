//! Endpoint Registry: one declarative entry per server operation.
//!
//! Definitions are `const` data. Nothing here performs I/O; the client turns a
//! definition plus an argument object into an [`ApiRequest`] and uses the tag
//! templates to decide what to cache and what to invalidate.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::api::{ApiError, ApiRequest};
use crate::model::{scalar_to_string, HttpMethod, Tag, TagScope, TagTemplate};

pub mod analytics;
pub mod auth;
pub mod inventory;
pub mod location;
pub mod notifications;
pub mod orders;
pub mod reservations;
pub mod restaurants;
pub mod reviews;
pub mod users;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Auth,
    Users,
    Restaurants,
    Orders,
    Reservations,
    Reviews,
    Inventory,
    Notifications,
    Location,
    Analytics,
}

impl Domain {
    pub fn path_prefix(&self) -> &'static str {
        match self {
            Domain::Auth => "auth",
            Domain::Users => "users",
            Domain::Restaurants => "restaurants",
            Domain::Orders => "orders",
            Domain::Reservations => "reservations",
            Domain::Reviews => "reviews",
            Domain::Inventory => "inventory",
            Domain::Notifications => "notifications",
            Domain::Location => "location",
            Domain::Analytics => "analytics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Uuid,
    Number,
    Bool,
    Object,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Which normalization family a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Passed through untouched
    Raw,
    /// Bare array or `{data, total, page, limit}` envelope
    Page,
    /// Token-bearing auth response
    Auth,
    /// A single user
    User,
    /// A paginated list of users
    UserPage,
}

#[derive(Debug, Clone, Copy)]
pub struct EndpointDef {
    pub domain: Domain,
    pub name: &'static str,
    pub method: HttpMethod,
    /// Relative path; `{param}` segments are filled from the arguments
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    pub response: ResponseShape,
    pub provides: &'static [TagTemplate],
    pub invalidates: &'static [TagTemplate],
}

impl EndpointDef {
    /// Reads are cached and deduplicated; everything else is a mutation
    pub fn is_query(&self) -> bool {
        self.method == HttpMethod::Get
    }

    pub fn path_params(&self) -> Vec<&'static str> {
        let mut params = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            params.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn provided_tags(&self, args: &Value, result: Option<&Value>) -> Vec<Tag> {
        resolve_all(self.provides, args, result)
    }

    pub fn invalidated_tags(&self, args: &Value, result: Option<&Value>) -> Vec<Tag> {
        resolve_all(self.invalidates, args, result)
    }

    /// Whether invalidating `tags` can hit what this read provides for `args`,
    /// decided before the result is known. Result-id tags match any tag of
    /// their kind.
    pub fn may_provide(&self, args: &Value, tags: &[Tag]) -> bool {
        self.provides.iter().any(|template| match template.scope {
            TagScope::ResultIds => tags.iter().any(|tag| tag.kind == template.kind),
            _ => template
                .resolve(args, None)
                .iter()
                .any(|provided| tags.iter().any(|tag| tag.invalidates(provided))),
        })
    }

    /// Fill the path template and route the remaining arguments to the query
    /// string or the JSON body depending on the verb.
    pub fn build_request(&self, args: &Value, bearer: Option<String>) -> Result<ApiRequest, ApiError> {
        let mut rest: Map<String, Value> = match args {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                return Err(ApiError::Validation(format!(
                    "arguments for '{}' must be an object, got {}",
                    self.name, other
                )))
            }
        };

        let mut path = self.path.to_string();
        for param in self.path_params() {
            let value = rest
                .remove(param)
                .as_ref()
                .and_then(scalar_to_string)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    ApiError::Validation(format!("'{}' is required for {}", param, self.name))
                })?;
            let dot_segment = value == "." || value == "..";
            if dot_segment || value.contains(['/', '?', '#']) || value.contains(char::is_whitespace) {
                return Err(ApiError::Validation(format!(
                    "'{}' is not a valid path value for {}",
                    param, self.name
                )));
            }
            path = path.replace(&format!("{{{}}}", param), &value);
        }
        rest.retain(|_, v| !v.is_null());

        let (query, body) = if self.method.has_body() {
            let body = if rest.is_empty() {
                None
            } else {
                Some(Value::Object(rest))
            };
            (Vec::new(), body)
        } else {
            (query_pairs(&rest), None)
        };

        Ok(ApiRequest {
            method: self.method,
            path,
            query,
            body,
            bearer,
        })
    }
}

fn resolve_all(templates: &[TagTemplate], args: &Value, result: Option<&Value>) -> Vec<Tag> {
    let mut tags: Vec<Tag> = templates
        .iter()
        .flat_map(|template| template.resolve(args, result))
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

fn query_pairs(args: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in args {
        match value {
            Value::Array(items) => {
                pairs.extend(
                    items
                        .iter()
                        .filter_map(scalar_to_string)
                        .map(|item| (key.clone(), item)),
                );
            }
            Value::Object(_) => pairs.push((key.clone(), value.to_string())),
            scalar => {
                if let Some(s) = scalar_to_string(scalar) {
                    pairs.push((key.clone(), s));
                }
            }
        }
    }
    pairs
}

/// Every endpoint the client knows, indexed by operation name
#[derive(Debug)]
pub struct Registry {
    by_name: HashMap<&'static str, &'static EndpointDef>,
}

impl Registry {
    pub fn from_domains(domains: &[&'static [EndpointDef]]) -> Self {
        let mut by_name = HashMap::new();
        for def in domains.iter().flat_map(|d| d.iter()) {
            if by_name.insert(def.name, def).is_some() {
                log::warn!("endpoint '{}' registered twice; keeping the last one", def.name);
            }
        }
        Self { by_name }
    }

    /// The full catalog, built once
    pub fn standard() -> &'static Registry {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(|| Registry::from_domains(&ALL_DOMAINS))
    }

    pub fn get(&self, name: &str) -> Result<&'static EndpointDef, ApiError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ApiError::UnknownEndpoint(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All endpoints, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &'static EndpointDef> {
        let mut defs: Vec<&'static EndpointDef> = self.by_name.values().copied().collect();
        defs.sort_by_key(|d| d.name);
        defs.into_iter()
    }

    pub fn queries(&self) -> impl Iterator<Item = &'static EndpointDef> {
        self.iter().filter(|d| d.is_query())
    }

    pub fn mutations(&self) -> impl Iterator<Item = &'static EndpointDef> {
        self.iter().filter(|d| !d.is_query())
    }
}

pub const ALL_DOMAINS: [&[EndpointDef]; 10] = [
    auth::ENDPOINTS,
    users::ENDPOINTS,
    restaurants::ENDPOINTS,
    orders::ENDPOINTS,
    reservations::ENDPOINTS,
    reviews::ENDPOINTS,
    inventory::ENDPOINTS,
    notifications::ENDPOINTS,
    location::ENDPOINTS,
    analytics::ENDPOINTS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagKind;
    use serde_json::json;

    #[test]
    fn test_operation_names_are_unique() {
        let declared: usize = ALL_DOMAINS.iter().map(|d| d.len()).sum();
        assert_eq!(Registry::standard().len(), declared);
    }

    #[test]
    fn test_paths_live_under_their_domain_prefix() {
        for def in Registry::standard().iter() {
            assert!(
                def.path.starts_with(def.domain.path_prefix()),
                "{} has path {} outside {}",
                def.name,
                def.path,
                def.domain.path_prefix()
            );
        }
    }

    #[test]
    fn test_path_params_are_declared() {
        for def in Registry::standard().iter() {
            for param in def.path_params() {
                let spec = def
                    .param(param)
                    .unwrap_or_else(|| panic!("{} does not declare '{}'", def.name, param));
                assert!(spec.required, "{}: path param '{}' must be required", def.name, param);
            }
        }
    }

    #[test]
    fn test_every_query_provides_tags_and_only_queries_do() {
        for def in Registry::standard().iter() {
            if def.is_query() {
                assert!(!def.provides.is_empty(), "{} provides nothing", def.name);
            } else {
                assert!(def.provides.is_empty(), "mutation {} provides tags", def.name);
            }
        }
    }

    #[test]
    fn test_build_get_request() {
        let def = Registry::standard().get("get_orders").unwrap();
        let request = def
            .build_request(
                &json!({"page": 2, "status": ["Pending", "Ready"], "search": null}),
                Some("t0k".to_string()),
            )
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "orders");
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "Pending".to_string()),
                ("status".to_string(), "Ready".to_string()),
            ]
        );
        assert_eq!(request.body, None);
        assert_eq!(request.bearer.as_deref(), Some("t0k"));
    }

    #[test]
    fn test_build_mutation_request_moves_path_params_out_of_body() {
        let def = Registry::standard().get("update_order_status").unwrap();
        let request = def
            .build_request(&json!({"id": "o1", "status": "Ready"}), None)
            .unwrap();

        assert_eq!(request.path, "orders/o1/status");
        assert_eq!(request.body, Some(json!({"status": "Ready"})));
        assert!(request.query.is_empty());

        let cancel = Registry::standard().get("cancel_order").unwrap();
        let request = cancel.build_request(&json!({"id": "o1"}), None).unwrap();
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_build_request_rejects_bad_path_values() {
        let def = Registry::standard().get("get_order").unwrap();
        assert!(matches!(
            def.build_request(&json!({}), None),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            def.build_request(&json!({"id": "../users"}), None),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            def.build_request(&json!(["o1"]), None),
            Err(ApiError::Validation(_))
        ));
        for dots in [".", ".."] {
            assert!(matches!(
                def.build_request(&json!({ "id": dots }), None),
                Err(ApiError::Validation(_))
            ));
        }
        // dots inside a value are fine
        let request = def.build_request(&json!({"id": "o.1"}), None).unwrap();
        assert_eq!(request.path, "orders/o.1");
    }

    #[test]
    fn test_cancel_order_invalidates_dependent_views() {
        let def = Registry::standard().get("cancel_order").unwrap();
        let tags = def.invalidated_tags(&json!({"id": "o1"}), None);

        for expected in [
            Tag::entity(TagKind::Order, "o1"),
            Tag::list(TagKind::Order),
            Tag::whole(TagKind::MyOrders),
            Tag::whole(TagKind::KitchenQueue),
            Tag::whole(TagKind::DeliveryQueue),
        ] {
            assert!(tags.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_invalidation_args_are_declared_params() {
        for def in Registry::standard().mutations() {
            for template in def.invalidates {
                if let TagScope::Arg(param) = template.scope {
                    assert!(def.param(param).is_some(), "{} has no '{}' argument", def.name, param);
                }
            }
        }
    }

    #[test]
    fn test_creates_leave_detail_views_alone() {
        let registry = Registry::standard();
        let detail = Tag::entity(TagKind::Order, "o1");
        let tags = registry
            .get("create_order")
            .unwrap()
            .invalidated_tags(&json!({"restaurantId": "r1", "items": [{"menuItemId": "m1"}]}), None);
        assert!(!tags.iter().any(|tag| tag.invalidates(&detail)));
        assert!(tags.contains(&Tag::list(TagKind::Order)));
        assert!(tags.contains(&Tag::whole(TagKind::KitchenQueue)));

        let tags = registry
            .get("create_inventory_item")
            .unwrap()
            .invalidated_tags(&json!({"name": "Flour", "quantity": 10, "unit": "kg"}), None);
        assert!(!tags.contains(&Tag::whole(TagKind::InventoryItem)));
        assert!(tags.contains(&Tag::list(TagKind::InventoryItem)));
    }

    #[test]
    fn test_may_provide_before_the_result_is_known() {
        let registry = Registry::standard();
        let cancelled = registry
            .get("cancel_order")
            .unwrap()
            .invalidated_tags(&json!({"id": "o1"}), None);

        let queue = registry.get("get_kitchen_queue").unwrap();
        assert!(queue.may_provide(&json!({}), &cancelled));
        let order = registry.get("get_order").unwrap();
        assert!(order.may_provide(&json!({"id": "o1"}), &cancelled));
        assert!(!order.may_provide(&json!({"id": "o2"}), &[Tag::entity(TagKind::Order, "o1")]));
        let reservations = registry.get("get_my_reservations").unwrap();
        assert!(!reservations.may_provide(&json!({}), &cancelled));
    }

    #[test]
    fn test_unknown_endpoint() {
        assert_eq!(
            Registry::standard().get("launch_rocket").unwrap_err(),
            ApiError::UnknownEndpoint("launch_rocket".to_string())
        );
    }
}
