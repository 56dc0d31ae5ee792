pub mod layout;
pub mod normalize;
pub mod role;
pub mod tag_graph;
pub mod validate;

pub use layout::*;
pub use normalize::*;
pub use role::*;
pub use tag_graph::*;
pub use validate::*;
