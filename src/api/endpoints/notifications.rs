use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const NOTIFICATION_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Notification, "id"),
    TagTemplate::list(TagKind::Notification),
    TagTemplate::whole(TagKind::UnreadCount),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Notifications,
        name: "get_notifications",
        method: HttpMethod::Get,
        path: "notifications",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("unreadOnly", ParamKind::Bool),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::Notification),
            TagTemplate::result_ids(TagKind::Notification),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Notifications,
        name: "get_unread_count",
        method: HttpMethod::Get,
        path: "notifications/unread-count",
        params: &[],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::whole(TagKind::UnreadCount)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Notifications,
        name: "mark_notification_read",
        method: HttpMethod::Patch,
        path: "notifications/{id}/read",
        params: &[ParamSpec::required("id", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: NOTIFICATION_CHANGED,
    },
    EndpointDef {
        domain: Domain::Notifications,
        name: "mark_all_notifications_read",
        method: HttpMethod::Patch,
        path: "notifications/read-all",
        params: &[],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[
            TagTemplate::whole(TagKind::Notification),
            TagTemplate::whole(TagKind::UnreadCount),
        ],
    },
    EndpointDef {
        domain: Domain::Notifications,
        name: "delete_notification",
        method: HttpMethod::Delete,
        path: "notifications/{id}",
        params: &[ParamSpec::required("id", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: NOTIFICATION_CHANGED,
    },
];
