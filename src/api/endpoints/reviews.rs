use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

/// Average ratings are derived server-side, so every review write refreshes
/// the aggregate. Edits and deletes do not know the restaurant and refresh
/// every aggregate.
const REVIEW_EDITED: &[TagTemplate] = &[
    TagTemplate::arg(TagKind::Review, "id"),
    TagTemplate::list(TagKind::Review),
    TagTemplate::whole(TagKind::MyReviews),
    TagTemplate::whole(TagKind::ReviewStats),
];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Reviews,
        name: "get_reviews",
        method: HttpMethod::Get,
        path: "reviews",
        params: &[
            ParamSpec::optional("page", ParamKind::Number),
            ParamSpec::optional("limit", ParamKind::Number),
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("menuItemId", ParamKind::Text),
            ParamSpec::optional("rating", ParamKind::Number),
        ],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::list(TagKind::Review),
            TagTemplate::result_ids(TagKind::Review),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reviews,
        name: "get_my_reviews",
        method: HttpMethod::Get,
        path: "reviews/my-reviews",
        params: &[],
        response: ResponseShape::Page,
        provides: &[
            TagTemplate::whole(TagKind::MyReviews),
            TagTemplate::result_ids(TagKind::Review),
        ],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reviews,
        name: "get_review_stats",
        method: HttpMethod::Get,
        path: "reviews/stats",
        params: &[
            ParamSpec::optional("restaurantId", ParamKind::Text),
            ParamSpec::optional("menuItemId", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[TagTemplate::arg(TagKind::ReviewStats, "restaurantId")],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Reviews,
        name: "create_review",
        method: HttpMethod::Post,
        path: "reviews",
        params: &[
            ParamSpec::required("restaurantId", ParamKind::Text),
            ParamSpec::optional("menuItemId", ParamKind::Text),
            ParamSpec::optional("orderId", ParamKind::Text),
            ParamSpec::required("rating", ParamKind::Number),
            ParamSpec::optional("comment", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[
            TagTemplate::list(TagKind::Review),
            TagTemplate::whole(TagKind::MyReviews),
            TagTemplate::arg(TagKind::ReviewStats, "restaurantId"),
        ],
    },
    EndpointDef {
        domain: Domain::Reviews,
        name: "update_review",
        method: HttpMethod::Patch,
        path: "reviews/{id}",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::optional("rating", ParamKind::Number),
            ParamSpec::optional("comment", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: REVIEW_EDITED,
    },
    EndpointDef {
        domain: Domain::Reviews,
        name: "delete_review",
        method: HttpMethod::Delete,
        path: "reviews/{id}",
        params: &[ParamSpec::required("id", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: REVIEW_EDITED,
    },
    EndpointDef {
        domain: Domain::Reviews,
        name: "respond_to_review",
        method: HttpMethod::Post,
        path: "reviews/{id}/response",
        params: &[
            ParamSpec::required("id", ParamKind::Text),
            ParamSpec::required("response", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[
            TagTemplate::arg(TagKind::Review, "id"),
            TagTemplate::list(TagKind::Review),
        ],
    },
];
