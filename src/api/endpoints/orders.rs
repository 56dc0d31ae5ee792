use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const ID: &[ParamSpec] = &[ParamSpec::required("id", ParamKind::Text)];

/// An order changed but kept its status
const ORDER_EDITED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Order, "id"),
    TagTemplate::list(TagKind::Order),
    TagTemplate::whole(TagKind::MyOrders),
];

/// The kitchen and delivery queues are status-filtered views over orders, so
/// anything that can move an order between statuses refreshes them too.
const ORDER_STATUS_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Order, "id"),
    TagTemplate::list(TagKind::Order),
    TagTemplate::whole(TagKind::MyOrders),
    TagTemplate::whole(TagKind::KitchenQueue),
    TagTemplate::whole(TagKind::DeliveryQueue),
    TagTemplate::whole(TagKind::OrderStats),
    TagTemplate::whole(TagKind::Analytics),
];

/// A new order has no detail view yet; only the lists and queues see it
const ORDER_CREATED: &[TagTemplate] = &[
    TagTemplate::list(TagKind::Order),
    TagTemplate::whole(TagKind::MyOrders),
    TagTemplate::whole(TagKind::KitchenQueue),
    TagTemplate::whole(TagKind::DeliveryQueue),
    TagTemplate::whole(TagKind::OrderStats),
    TagTemplate::whole(TagKind::Analytics),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Orders,
        name: "get_orders",
        method: HttpMethod::Get,
        path: "orders",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("status", ParamKind::Text),
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("search", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::Order),
            TagTemplate::result_ids(TagKind::Order),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "get_my_orders",
        method: HttpMethod::Get,
        path: "orders/my-orders",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("status", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::whole(TagKind::MyOrders),
            TagTemplate::result_ids(TagKind::Order),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "get_order",
        method: HttpMethod::Get,
        path: "orders/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[TagTemplate::arg(TagKind::Order, "id")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "get_kitchen_queue",
        method: HttpMethod::Get,
        path: "orders/kitchen-queue",
        params: &[
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("status", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::whole(TagKind::KitchenQueue),
            TagTemplate::result_ids(TagKind::Order),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "get_delivery_queue",
        method: HttpMethod::Get,
        path: "orders/delivery-queue",
        params: &[ParamSpec::optional("driverId", ParamKind::Text)],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::whole(TagKind::DeliveryQueue),
            TagTemplate::result_ids(TagKind::Order),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "get_order_stats",
        method: HttpMethod::Get,
        path: "orders/stats",
        params: &[ParamSpec::optional("restaurantId", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::whole(TagKind::OrderStats)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "create_order",
        method: HttpMethod::Post,
        path: "orders",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::required("items", ParamKind::List),
            ParamSpec::optional("deliveryAddressId", ParamKind::Text),
            ParamSpec::optional("notes", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ORDER_CREATED,
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "update_order",
        method: HttpMethod::Patch,
        path: "orders/{id}",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("notes", ParamKind::Text),
            ParamSpec::optional("items", ParamKind::List),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ORDER_EDITED,
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "update_order_status",
        method: HttpMethod::Patch,
        path: "orders/{id}/status",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("status", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ORDER_STATUS_CHANGED,
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "cancel_order",
        method: HttpMethod::Patch,
        path: "orders/{id}/cancel",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("reason", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ORDER_STATUS_CHANGED,
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "assign_driver",
        method: HttpMethod::Patch,
        path: "orders/{id}/assign-driver",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("driverId", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[
            TagTemplate::arg(TagKind::Order, "id"),
            TagTemplate::list(TagKind::Order),
            TagTemplate::whole(TagKind::DeliveryQueue),
        ],
    },
    EndpointDef {
        domain: Domain::Orders,
        name: "delete_order",
        method: HttpMethod::Delete,
        path: "orders/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ORDER_STATUS_CHANGED,
    },
];
