use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const ID: &[ParamSpec] = &[ParamSpec::required("id", ParamKind::Text)];

/// One quantity change can cross the low-stock threshold and moves the
/// aggregate valuation, so stock transactions refresh all of these.
const STOCK_MOVED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::InventoryItem, "id"),
    TagTemplate::list(TagKind::InventoryItem),
    TagTemplate::whole(TagKind::LowStock),
    TagTemplate::list(TagKind::StockTransaction),
    TagTemplate::whole(TagKind::InventoryAnalytics),
];

const ITEM_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::InventoryItem, "id"),
    TagTemplate::list(TagKind::InventoryItem),
    TagTemplate::whole(TagKind::LowStock),
    TagTemplate::whole(TagKind::InventoryAnalytics),
];

const ITEM_CREATED: &[TagTemplate] = &[
    TagTemplate::list(TagKind::InventoryItem),
    TagTemplate::whole(TagKind::LowStock),
    TagTemplate::whole(TagKind::InventoryAnalytics),
];

/// Same fan-out as `STOCK_MOVED`, keyed by the transferred item
const STOCK_TRANSFERRED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::InventoryItem, "itemId"),
    TagTemplate::list(TagKind::InventoryItem),
    TagTemplate::whole(TagKind::LowStock),
    TagTemplate::list(TagKind::StockTransaction),
    TagTemplate::whole(TagKind::InventoryAnalytics),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_inventory_items",
        method: HttpMethod::Get,
        path: "inventory/items",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("category", ParamKind::Text),
            ParamSpec::optional("search", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::InventoryItem),
            TagTemplate::result_ids(TagKind::InventoryItem),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_inventory_item",
        method: HttpMethod::Get,
        path: "inventory/items/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[TagTemplate::arg(TagKind::InventoryItem, "id")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_low_stock_items",
        method: HttpMethod::Get,
        path: "inventory/low-stock",
        params: &[ParamSpec::optional("restaurantId", ParamKind::Text)],
        response: ResponseShape::Page,
        provides: &[TagTemplate::whole(TagKind::LowStock)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_stock_transactions",
        method: HttpMethod::Get,
        path: "inventory/transactions",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("itemId", ParamKind::Text),
            ParamSpec::optional("type", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[TagTemplate::list(TagKind::StockTransaction)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_inventory_analytics",
        method: HttpMethod::Get,
        path: "inventory/analytics",
        params: &[ParamSpec::optional("restaurantId", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::fixed(TagKind::InventoryAnalytics, "SUMMARY")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_inventory_valuation",
        method: HttpMethod::Get,
        path: "inventory/valuation",
        params: &[ParamSpec::optional("restaurantId", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::fixed(TagKind::InventoryAnalytics, "VALUATION")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "get_suppliers",
        method: HttpMethod::Get,
        path: "inventory/suppliers",
        params: &[],
        response: ResponseShape::Page,
        provides: &[TagTemplate::list(TagKind::Supplier)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "create_inventory_item",
        method: HttpMethod::Post,
        path: "inventory/items",
        params: &[
            ParamSpec::required("name", ParamKind::Text),
            ParamSpec::required("quantity", ParamKind::Number),
            ParamSpec::required("unit", ParamKind::Text),
            ParamSpec::optional("reorderLevel", ParamKind::Number),
            ParamSpec::optional("unitCost", ParamKind::Number),
            ParamSpec::optional("supplierId", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ITEM_CREATED,
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "update_inventory_item",
        method: HttpMethod::Patch,
        path: "inventory/items/{id}",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("reorderLevel", ParamKind::Number),
            ParamSpec::optional("unitCost", ParamKind::Number),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ITEM_CHANGED,
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "delete_inventory_item",
        method: HttpMethod::Delete,
        path: "inventory/items/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ITEM_CHANGED,
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "adjust_stock",
        method: HttpMethod::Post,
        path: "inventory/items/{id}/adjust",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("quantity", ParamKind::Number),
            ParamSpec::required("reason", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: STOCK_MOVED,
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "transfer_stock",
        method: HttpMethod::Post,
        path: "inventory/transfer",
        params: &[
            ParamSpec::required("itemId", ParamKind::Text),
            ParamSpec::required("fromRestaurantId", ParamKind::Text),
            ParamSpec::required("toRestaurantId", ParamKind::Text),
            ParamSpec::required("quantity", ParamKind::Number),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: STOCK_TRANSFERRED,
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "restock_item",
        method: HttpMethod::Post,
        path: "inventory/items/{id}/restock",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("quantity", ParamKind::Number),
            ParamSpec::optional("supplierId", ParamKind::Text),
            ParamSpec::optional("unitCost", ParamKind::Number),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: STOCK_MOVED,
    },
    EndpointDef {
        domain: Domain::Inventory,
        name: "create_supplier",
        method: HttpMethod::Post,
        path: "inventory/suppliers",
        params: &[
            ParamSpec::required("name", ParamKind::Text),
            ParamSpec::optional("email", ParamKind::Text),
            ParamSpec::optional("phone", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[TagTemplate::list(TagKind::Supplier)],
    },
];
