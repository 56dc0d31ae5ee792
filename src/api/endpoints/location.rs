use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const ADDRESS_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Address, "id"),
    TagTemplate::list(TagKind::Address),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Location,
        name: "get_addresses",
        method: HttpMethod::Get,
        path: "location/addresses",
        params: &[ParamSpec::optional("userId", ParamKind::Uuid)],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::Address),
            TagTemplate::result_ids(TagKind::Address),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Location,
        name: "create_address",
        method: HttpMethod::Post,
        path: "location/addresses",
        params: &[
            ParamSpec::required("userId", ParamKind::Uuid),
            ParamSpec::required("street", ParamKind::Text),
            ParamSpec::required("city", ParamKind::Text),
            ParamSpec::required("country", ParamKind::Text),
            ParamSpec::optional("postalCode", ParamKind::Text),
            ParamSpec::optional("label", ParamKind::Text),
            ParamSpec::optional("latitude", ParamKind::Number),
            ParamSpec::optional("longitude", ParamKind::Number),
            ParamSpec::optional("isDefault", ParamKind::Bool),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[TagTemplate::list(TagKind::Address)],
    },
    EndpointDef {
        domain: Domain::Location,
        name: "update_address",
        method: HttpMethod::Patch,
        path: "location/addresses/{id}",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("street", ParamKind::Text),
            ParamSpec::optional("city", ParamKind::Text),
            ParamSpec::optional("country", ParamKind::Text),
            ParamSpec::optional("postalCode", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ADDRESS_CHANGED,
    },
    EndpointDef {
        domain: Domain::Location,
        name: "delete_address",
        method: HttpMethod::Delete,
        path: "location/addresses/{id}",
        params: &[ParamSpec::required("id", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: ADDRESS_CHANGED,
    },
    EndpointDef {
        domain: Domain::Location,
        name: "set_default_address",
        method: HttpMethod::Patch,
        path: "location/addresses/{id}/default",
        params: &[ParamSpec::required("id", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        // the previous default changes too
        invalidates: &[TagTemplate::whole(TagKind::Address)],
    },
];
