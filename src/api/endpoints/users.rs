use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const ID: &[ParamSpec] = &[ParamSpec::required("id", ParamKind::Text)];

/// Role and status edits change both the user and the global counts
const USER_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::User, "id"),
    TagTemplate::list(TagKind::User),
    TagTemplate::whole(TagKind::UserStats),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Users,
        name: "get_users",
        method: HttpMethod::Get,
        path: "users",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("role", ParamKind::Text),
            ParamSpec::optional("status", ParamKind::Text),
            ParamSpec::optional("search", ParamKind::Text),
        ],
        response: ResponseShape::UserPage,
        provides: &[
            TagTemplate::list(TagKind::User),
            TagTemplate::result_ids(TagKind::User),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Users,
        name: "get_user",
        method: HttpMethod::Get,
        path: "users/{id}",
        params: ID,
        response: ResponseShape::User,
        provides: &[TagTemplate::arg(TagKind::User, "id")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Users,
        name: "get_user_stats",
        method: HttpMethod::Get,
        path: "users/stats",
        params: &[],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::whole(TagKind::UserStats)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Users,
        name: "update_user_role",
        method: HttpMethod::Patch,
        path: "users/{id}/role",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("role", ParamKind::Text),
        ],
        response: ResponseShape::User,
        provides: &[],
        invalidates: USER_CHANGED,
    },
    EndpointDef {
        domain: Domain::Users,
        name: "update_user_status",
        method: HttpMethod::Patch,
        path: "users/{id}/status",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("status", ParamKind::Text),
        ],
        response: ResponseShape::User,
        provides: &[],
        invalidates: USER_CHANGED,
    },
    EndpointDef {
        domain: Domain::Users,
        name: "delete_user",
        method: HttpMethod::Delete,
        path: "users/{id}",
        params: ID,
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: USER_CHANGED,
    },
];
