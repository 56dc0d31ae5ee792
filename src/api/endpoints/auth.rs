use super::{Domain, EndpointDef, ParamKind, ParamSpec, ResponseShape};
use crate::model::{HttpMethod, TagKind, TagTemplate};

const PROFILE: &[TagTemplate] = &[TagTemplate::whole(TagKind::Profile)];

pub const ENDPOINTS: &[EndpointDef] = &[
    EndpointDef {
        domain: Domain::Auth,
        name: "login",
        method: HttpMethod::Post,
        path: "auth/login",
        params: &[
            ParamSpec::required("email", ParamKind::Text),
            ParamSpec::required("password", ParamKind::Text),
        ],
        response: ResponseShape::Auth,
        provides: &[],
        invalidates: PROFILE,
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "register",
        method: HttpMethod::Post,
        path: "auth/register",
        params: &[
            ParamSpec::required("name", ParamKind::Text),
            ParamSpec::required("email", ParamKind::Text),
            ParamSpec::required("password", ParamKind::Text),
            ParamSpec::optional("phone", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "verify_otp",
        method: HttpMethod::Post,
        path: "auth/verify-otp",
        params: &[
            ParamSpec::required("email", ParamKind::Text),
            ParamSpec::required("otp", ParamKind::Text),
        ],
        response: ResponseShape::Auth,
        provides: &[],
        invalidates: PROFILE,
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "resend_otp",
        method: HttpMethod::Post,
        path: "auth/resend-otp",
        params: &[ParamSpec::required("email", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "refresh_token",
        method: HttpMethod::Post,
        path: "auth/refresh",
        params: &[ParamSpec::optional("refreshToken", ParamKind::Text)],
        response: ResponseShape::Auth,
        provides: &[],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "logout",
        method: HttpMethod::Post,
        path: "auth/logout",
        params: &[],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: PROFILE,
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "get_profile",
        method: HttpMethod::Get,
        path: "auth/profile",
        params: &[],
        response: ResponseShape::User,
        provides: PROFILE,
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "update_profile",
        method: HttpMethod::Patch,
        path: "auth/profile",
        params: &[
            ParamSpec::optional("name", ParamKind::Text),
            ParamSpec::optional("phone", ParamKind::Text),
        ],
        response: ResponseShape::User,
        provides: &[],
        invalidates: PROFILE,
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "change_password",
        method: HttpMethod::Post,
        path: "auth/change-password",
        params: &[
            ParamSpec::required("currentPassword", ParamKind::Text),
            ParamSpec::required("newPassword", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "forgot_password",
        method: HttpMethod::Post,
        path: "auth/forgot-password",
        params: &[ParamSpec::required("email", ParamKind::Text)],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[],
    },
    EndpointDef {
        domain: Domain::Auth,
        name: "reset_password",
        method: HttpMethod::Post,
        path: "auth/reset-password",
        params: &[
            ParamSpec::required("token", ParamKind::Text),
            ParamSpec::required("password", ParamKind::Text),
        ],
        response: ResponseShape::Raw,
        provides: &[],
        invalidates: &[],
    },
];
