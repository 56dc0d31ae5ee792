use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const ID: &[ParamSpec] = &[ParamSpec::required("id", ParamKind::Text)];
const RESTAURANT_ID: &[ParamSpec] = &[ParamSpec::required("restaurantId", ParamKind::Text)];

const RESTAURANT_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Restaurant, "id"),
    TagTemplate::list(TagKind::Restaurant),
];

const MENU_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::MenuItem, "id"),
    TagTemplate::list(TagKind::MenuItem),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Restaurants,
        name: "get_restaurants",
        method: HttpMethod::Get,
        path: "restaurants",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("search", ParamKind::Text),
            ParamSpec::optional("cuisine", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::Restaurant),
            TagTemplate::result_ids(TagKind::Restaurant),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "get_restaurant",
        method: HttpMethod::Get,
        path: "restaurants/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[TagTemplate::arg(TagKind::Restaurant, "id")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "create_restaurant",
        method: HttpMethod::Post,
        path: "restaurants",
        params: &[
            ParamSpec::required("name", ParamKind::Text),
            ParamSpec::optional("description", ParamKind::Text),
            ParamSpec::optional("address", ParamKind::Object),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[TagTemplate::list(TagKind::Restaurant)],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "update_restaurant",
        method: HttpMethod::Patch,
        path: "restaurants/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: RESTAURANT_CHANGED,
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "delete_restaurant",
        method: HttpMethod::Delete,
        path: "restaurants/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: RESTAURANT_CHANGED,
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "get_menu",
        method: HttpMethod::Get,
        path: "restaurants/{restaurantId}/menu",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::optional("category", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::MenuItem),
            TagTemplate::result_ids(TagKind::MenuItem),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "create_menu_item",
        method: HttpMethod::Post,
        path: "restaurants/{restaurantId}/menu",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::required("name", ParamKind::Text),
            ParamSpec::required("price", ParamKind::Number),
            ParamSpec::optional("category", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[TagTemplate::list(TagKind::MenuItem)],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "update_menu_item",
        method: HttpMethod::Patch,
        path: "restaurants/{restaurantId}/menu/{id}",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("price", ParamKind::Number),
            ParamSpec::optional("available", ParamKind::Bool),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: MENU_CHANGED,
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "delete_menu_item",
        method: HttpMethod::Delete,
        path: "restaurants/{restaurantId}/menu/{id}",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::required("id", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: MENU_CHANGED,
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "get_tables",
        method: HttpMethod::Get,
        path: "restaurants/{restaurantId}/tables",
        params: RESTAURANT_ID,
        response: ResponseShape::Page,
        provides: &[TagTemplate::list(TagKind::Table)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "get_rooms",
        method: HttpMethod::Get,
        path: "restaurants/{restaurantId}/rooms",
        params: RESTAURANT_ID,
        response: ResponseShape::Page,
        provides: &[TagTemplate::list(TagKind::Room)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "get_favorites",
        method: HttpMethod::Get,
        path: "restaurants/favorites",
        params: &[],
        response: ResponseShape::Page,
        provides: &[TagTemplate::whole(TagKind::Favorites)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Restaurants,
        name: "toggle_favorite",
        method: HttpMethod::Post,
        path: "restaurants/{id}/favorite",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[
            TagTemplate::whole(TagKind::Favorites),
            TagTemplate::arg(TagKind::Restaurant, "id"),
        ],
    },
];
