pub mod auth;
pub mod common;
pub mod order;
pub mod page;
pub mod session;
pub mod status;
pub mod tags;
pub mod user;

pub use auth::*;
pub use common::*;
pub use order::*;
pub use page::*;
pub use session::*;
pub use status::*;
pub use tags::*;
pub use user::*;
