pub mod session_store;
pub mod tag_cache;
pub mod traits;

pub use session_store::*;
pub use tag_cache::*;
pub use traits::*;
