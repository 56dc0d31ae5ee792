pub mod client;
pub mod endpoints;
pub mod errors;
pub mod transport;

pub use client::*;
pub use endpoints::{Domain, EndpointDef, ParamKind, ParamSpec, Registry, ResponseShape};
pub use errors::*;
pub use transport::*;
