use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

/// Any booking change can free or take a slot
const RESERVATION_CHANGED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Reservation, "id"),
    TagTemplate::list(TagKind::Reservation),
    TagTemplate::whole(TagKind::MyReservations),
    TagTemplate::whole(TagKind::Availability),
];

const RESERVATION_CREATED: &[TagTemplate] = &[
    TagTemplate::list(TagKind::Reservation),
    TagTemplate::whole(TagKind::MyReservations),
    TagTemplate::whole(TagKind::Availability),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Reservations,
        name: "get_reservations",
        method: HttpMethod::Get,
        path: "reservations",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("date", ParamKind::Text),
            ParamSpec::optional("status", ParamKind::Text),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::Reservation),
            TagTemplate::result_ids(TagKind::Reservation),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "get_my_reservations",
        method: HttpMethod::Get,
        path: "reservations/my-reservations",
        params: &[ParamSpec::optional("status", ParamKind::Text)],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::whole(TagKind::MyReservations),
            TagTemplate::result_ids(TagKind::Reservation),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "get_reservation",
        method: HttpMethod::Get,
        path: "reservations/{id}",
        params: &[ParamSpec::required("id", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::arg(TagKind::Reservation, "id")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "check_availability",
        method: HttpMethod::Get,
        path: "reservations/availability",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::required("date", ParamKind::Text),
            ParamSpec::optional("time", ParamKind::Text),
            ParamSpec::optional("partySize", ParamKind::Number),
            ParamSpec::optional("roomId", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::whole(TagKind::Availability)],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "create_reservation",
        method: HttpMethod::Post,
        path: "reservations",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::required("date", ParamKind::Text),
            ParamSpec::required("time", ParamKind::Text),
            ParamSpec::required("partySize", ParamKind::Number),
            ParamSpec::optional("tableId", ParamKind::Text),
            ParamSpec::optional("roomId", ParamKind::Text),
            ParamSpec::optional("specialRequests", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: RESERVATION_CREATED,
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "update_reservation",
        method: HttpMethod::Patch,
        path: "reservations/{id}",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("date", ParamKind::Text),
            ParamSpec::optional("time", ParamKind::Text),
            ParamSpec::optional("partySize", ParamKind::Number),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: RESERVATION_CHANGED,
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "update_reservation_status",
        method: HttpMethod::Patch,
        path: "reservations/{id}/status",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("status", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: RESERVATION_CHANGED,
    },
    EndpointDef {
        domain: Domain::Reservations,
        name: "cancel_reservation",
        method: HttpMethod::Patch,
        path: "reservations/{id}/cancel",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("reason", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: RESERVATION_CHANGED,
    },
];
