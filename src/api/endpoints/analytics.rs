use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const RANGE: &[ParamSpec] = &[
    ParamSpec::optional("restaurantId", ParamKind::Text),
    ParamSpec::optional("from", ParamKind::Text),
    ParamSpec::optional("to", ParamKind::Text),
    ParamSpec::optional("period", ParamKind::Text),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Analytics,
        name: "get_dashboard_analytics",
        method: HttpMethod::Get,
        path: "analytics/dashboard",
        params: RANGE,
        response: ResponseShape::Raw,
        provides: &[TagTemplate::fixed(TagKind::Analytics, "DASHBOARD")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Analytics,
        name: "get_revenue_analytics",
        method: HttpMethod::Get,
        path: "analytics/revenue",
        params: RANGE,
        response: ResponseShape::Raw,
        provides: &[TagTemplate::fixed(TagKind::Analytics, "REVENUE")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Analytics,
        name: "get_popular_items",
        method: HttpMethod::Get,
        path: "analytics/popular-items",
        params: &[
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("limit", ParamKind::Number),
        ],
        response: ResponseShape::Page,
        provides: &[TagTemplate::fixed(TagKind::Analytics, "POPULAR")],
        invalidates: &[],
    },
];
