pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::{ApiClient, ApiError, HttpTransport, Registry, Subscription, Transport};

// Export logic types
pub use logic::{
    dangling_invalidations, resolve_role, select_layout, validate_args, LayoutVariant, Section,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, TagCache};

/// Build a client from loaded configuration: HTTP transport against the
/// configured base URL, file-backed session when a path is set.
pub fn client_from_config(
    config: &crate::config::AppConfig,
) -> anyhow::Result<ApiClient<HttpTransport>> {
    use std::sync::Arc;

    let transport = HttpTransport::new(&config.api.base_url)?;
    let store: Arc<dyn SessionStore> = match &config.session.path {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => Arc::new(MemorySessionStore::new()),
    };
    let cache = TagCache::new(config.cache.keep_unused_for());
    Ok(ApiClient::with_cache(transport, store, cache))
}
