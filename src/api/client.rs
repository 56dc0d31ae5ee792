//! The client core: cached, deduplicated reads and tag-invalidating writes.
//!
//! Every read goes through the [`TagCache`]. Concurrent reads of the same
//! endpoint and arguments share one in-flight call. A successful mutation
//! resolves its invalidation tags, drops unsubscribed entries that match, and
//! refetches the subscribed ones before it returns. Reads still on the wire
//! when a write lands are marked dirty and go out again before they cache.

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, OnceCell};
use tokio::task::JoinSet;

use crate::api::endpoints::{EndpointDef, Registry, ResponseShape};
use crate::api::{ApiError, ApiRequest, Transport};
use crate::logic::{normalize_response, select_layout, validate_args, LayoutVariant};
use crate::model::{AuthSession, CanonicalUser, SessionSnapshot, Tag};
use crate::store::{CacheKey, SessionStore, TagCache};

type SharedFetch = Arc<OnceCell<Result<Value, ApiError>>>;

/// A read on the wire. `dirty` is set when a write may have changed what it
/// is about to return; it doubles as the identity of this particular call.
struct InFlight {
    def: &'static EndpointDef,
    args: Value,
    cell: SharedFetch,
    dirty: Arc<AtomicBool>,
}

/// What a finished read does with its payload
enum Landing {
    Cached,
    Reissue,
    Superseded,
}

struct ClientInner<T> {
    registry: &'static Registry,
    transport: T,
    cache: Arc<TagCache>,
    session: RwLock<SessionSnapshot>,
    store: Arc<dyn SessionStore>,
    in_flight: Mutex<HashMap<CacheKey, InFlight>>,
}

/// Cheap to clone; clones share the cache, the session and in-flight calls
pub struct ApiClient<T: Transport> {
    inner: Arc<ClientInner<T>>,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// Client over the standard endpoint catalog with the default cache settings
    pub fn new(transport: T, store: Arc<dyn SessionStore>) -> Self {
        Self::with_cache(transport, store, TagCache::default())
    }

    pub fn with_cache(transport: T, store: Arc<dyn SessionStore>, cache: TagCache) -> Self {
        Self::from_parts(Registry::standard(), transport, store, cache)
    }

    /// The persisted session is restored here so a restart keeps the login
    pub fn from_parts(
        registry: &'static Registry,
        transport: T,
        store: Arc<dyn SessionStore>,
        cache: TagCache,
    ) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Could not restore persisted session, starting anonymous: {:#}", err);
                SessionSnapshot::anonymous()
            }
        };
        if session.is_authenticated() {
            log::info!("Restored session for role {}", session.role_name());
        }

        Self {
            inner: Arc::new(ClientInner {
                registry,
                transport,
                cache: Arc::new(cache),
                session: RwLock::new(session),
                store,
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn registry(&self) -> &'static Registry {
        self.inner.registry
    }

    pub fn cache(&self) -> &TagCache {
        &self.inner.cache
    }

    pub fn session(&self) -> SessionSnapshot {
        self.inner.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }

    pub fn current_user(&self) -> Option<CanonicalUser> {
        self.inner.session.read().user.clone()
    }

    /// Layout for whoever is logged in; anonymous visitors get the customer tree
    pub fn layout(&self) -> LayoutVariant {
        select_layout(self.inner.session.read().role_name())
    }

    /// Read through the cache
    pub async fn query(&self, name: &str, args: Value) -> Result<Value, ApiError> {
        let def = self.query_def(name)?;
        validate_args(def, &args)?;
        let args = canonical_args(args);
        let key = CacheKey::new(def.name, &args);
        self.read(def, &key, args).await
    }

    /// [`query`](Self::query), deserialized into `R`
    pub async fn query_as<R: DeserializeOwned>(&self, name: &str, args: Value) -> Result<R, ApiError> {
        let data = self.query(name, args).await?;
        serde_json::from_value(data).map_err(|e| ApiError::shape(name, e.to_string()))
    }

    /// Read and stay subscribed; the returned handle sees every refetch
    pub async fn subscribe(&self, name: &str, args: Value) -> Result<Subscription<T>, ApiError> {
        let def = self.query_def(name)?;
        validate_args(def, &args)?;
        let args = canonical_args(args);
        let key = CacheKey::new(def.name, &args);

        let data = self.read(def, &key, args.clone()).await?;
        let tags = def.provided_tags(&args, Some(&data));
        let receiver = self.inner.cache.attach(&key, &args, &data, &tags);
        log::debug!("Subscribed to {} ({} subscribers)", key, self.inner.cache.subscribers(&key));

        Ok(Subscription {
            client: self.clone(),
            def,
            key,
            args,
            receiver,
        })
    }

    /// Run a write. On success the endpoint's invalidation tags are applied
    /// and every subscribed entry they hit is refetched before this returns.
    /// A failed write leaves the cache untouched.
    pub async fn mutate(&self, name: &str, args: Value) -> Result<Value, ApiError> {
        let def = self.inner.registry.get(name)?;
        if def.is_query() {
            return Err(ApiError::Validation(format!(
                "'{}' is a read; use query or subscribe",
                name
            )));
        }
        validate_args(def, &args)?;
        let args = canonical_args(args);

        let request = def.build_request(&args, self.bearer())?;
        log::debug!("{} {} ({})", request.method, request.path, def.name);
        let body = self.send(request).await?;
        let data = normalize_response(def, body)?;

        if def.response == ResponseShape::Auth {
            let auth: AuthSession = serde_json::from_value(data.clone())
                .map_err(|e| ApiError::shape(def.name, e.to_string()))?;
            self.install_session(auth)?;
        }

        let tags = def.invalidated_tags(&args, Some(&data));
        let (invalidation, reissued) = {
            // held across both steps so a read cannot land in between unseen
            let in_flight = self.inner.in_flight.lock();
            let reissued = mark_in_flight(&in_flight, &tags);
            (self.inner.cache.invalidate(&tags), reissued)
        };
        log::info!(
            "{} invalidated {} tag(s): {} entries to refetch, {} dropped, {} in-flight reads reissued",
            def.name,
            tags.len(),
            invalidation.refetch.len(),
            invalidation.dropped,
            reissued
        );
        self.refetch_all(invalidation.refetch).await;

        Ok(data)
    }

    /// End the session locally even when the server call fails
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            if let Ok(def) = self.inner.registry.get("logout") {
                let request = def.build_request(&Value::Null, self.bearer())?;
                if let Err(err) = self.send(request).await {
                    log::warn!("Server-side logout failed: {}", err);
                }
            }
        }

        *self.inner.session.write() = SessionSnapshot::anonymous();
        self.inner.in_flight.lock().clear();
        self.inner.cache.clear();
        self.inner
            .store
            .clear()
            .map_err(|e| ApiError::Session(format!("{:#}", e)))?;
        log::info!("Logged out; cache reset");
        Ok(())
    }

    /// Evict entries that have had no subscribers for longer than the keep window
    pub fn collect_garbage(&self) -> usize {
        let evicted = self.inner.cache.evict_unused(Instant::now());
        if evicted > 0 {
            log::debug!("Evicted {} unused cache entries", evicted);
        }
        evicted
    }

    fn query_def(&self, name: &str) -> Result<&'static EndpointDef, ApiError> {
        let def = self.inner.registry.get(name)?;
        if !def.is_query() {
            return Err(ApiError::Validation(format!(
                "'{}' is a mutation; use mutate",
                name
            )));
        }
        Ok(def)
    }

    /// Token from the session, falling back to whatever the host persisted
    /// since the client was built. A persisted token is adopted into the session.
    fn bearer(&self) -> Option<String> {
        let current = self.inner.session.read().token.clone();
        if let Some(token) = current.filter(|t| !t.is_empty()) {
            return Some(token);
        }

        let persisted = match self.inner.store.load() {
            Ok(persisted) => persisted,
            Err(err) => {
                log::warn!("Could not read persisted session: {:#}", err);
                return None;
            }
        };
        let token = persisted.token.filter(|t| !t.is_empty())?;
        let mut session = self.inner.session.write();
        session.token = Some(token.clone());
        if session.user.is_none() {
            session.user = persisted.user;
        }
        log::info!("Adopted persisted session for role {}", session.role_name());
        Some(token)
    }

    async fn read(
        &self,
        def: &'static EndpointDef,
        key: &CacheKey,
        args: Value,
    ) -> Result<Value, ApiError> {
        if let Some(data) = self.inner.cache.get(key) {
            log::debug!("Cache hit for {}", key);
            return Ok(data);
        }
        self.fetch_shared(def, key, args, false).await
    }

    /// One network call per key at a time. `force` starts a new call even if
    /// an older one is still running, so a refetch never returns data that
    /// was requested before the invalidation.
    async fn fetch_shared(
        &self,
        def: &'static EndpointDef,
        key: &CacheKey,
        args: Value,
        force: bool,
    ) -> Result<Value, ApiError> {
        let (cell, dirty) = {
            let mut in_flight = self.inner.in_flight.lock();
            let running = if force {
                None
            } else {
                in_flight
                    .get(key)
                    .map(|running| (Arc::clone(&running.cell), Arc::clone(&running.dirty)))
            };
            match running {
                Some(shared) => {
                    log::debug!("Joining in-flight fetch of {}", key);
                    shared
                }
                None => {
                    let cell: SharedFetch = Arc::new(OnceCell::new());
                    let dirty = Arc::new(AtomicBool::new(false));
                    in_flight.insert(
                        key.clone(),
                        InFlight {
                            def,
                            args: args.clone(),
                            cell: Arc::clone(&cell),
                            dirty: Arc::clone(&dirty),
                        },
                    );
                    (cell, dirty)
                }
            }
        };

        let result = cell
            .get_or_init(|| self.fetch(def, key, &args, &dirty))
            .await
            .clone();

        {
            let mut in_flight = self.inner.in_flight.lock();
            if in_flight
                .get(key)
                .is_some_and(|current| Arc::ptr_eq(&current.cell, &cell))
            {
                in_flight.remove(key);
            }
        }
        result
    }

    /// Only the newest call for a key writes the cache, and only with data
    /// requested after the last write that touched it.
    async fn fetch(
        &self,
        def: &'static EndpointDef,
        key: &CacheKey,
        args: &Value,
        dirty: &Arc<AtomicBool>,
    ) -> Result<Value, ApiError> {
        loop {
            let request = def.build_request(args, self.bearer())?;
            log::debug!("Fetching {} from {}", key, request.path);
            let body = self.send(request).await?;
            let data = normalize_response(def, body)?;

            let landing = {
                let in_flight = self.inner.in_flight.lock();
                match in_flight.get(key) {
                    Some(current) if Arc::ptr_eq(&current.dirty, dirty) => {
                        if dirty.swap(false, Ordering::SeqCst) {
                            Landing::Reissue
                        } else {
                            let tags = def.provided_tags(args, Some(&data));
                            self.inner
                                .cache
                                .put(key.clone(), args.clone(), data.clone(), tags);
                            Landing::Cached
                        }
                    }
                    _ => Landing::Superseded,
                }
            };

            match landing {
                Landing::Cached => return Ok(data),
                Landing::Superseded => {
                    log::debug!("Fetch of {} was superseded; not caching it", key);
                    return Ok(data);
                }
                Landing::Reissue => {
                    log::debug!("{} was invalidated while in flight; fetching again", key);
                }
            }
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let response = self.inner.transport.send(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }
        let err = ApiError::from_response(response.status, response.body);
        if err.is_unauthorized() {
            self.purge_token();
        }
        Err(err)
    }

    /// A 401 means the token is dead; stop sending it
    fn purge_token(&self) {
        let had_token = self.inner.session.write().token.take().is_some();
        if let Err(err) = self.inner.store.clear_token() {
            log::warn!("Could not clear persisted token: {:#}", err);
        }
        if had_token {
            log::warn!("Server answered 401; dropped the cached access token");
        }
    }

    fn install_session(&self, auth: AuthSession) -> Result<(), ApiError> {
        let snapshot = {
            let mut session = self.inner.session.write();
            let user = auth.user.or_else(|| session.user.take());
            *session = SessionSnapshot::new(Some(auth.access_token), user);
            session.clone()
        };
        log::info!("Session started for role {}", snapshot.role_name());
        self.inner
            .store
            .save(&snapshot)
            .map_err(|e| ApiError::Session(format!("{:#}", e)))
    }

    async fn refetch_all(&self, stale: Vec<(CacheKey, Value)>) {
        let mut tasks = JoinSet::new();
        for (key, args) in stale {
            let def = match self.inner.registry.get(key.endpoint) {
                Ok(def) => def,
                Err(err) => {
                    log::warn!("Cannot refetch {}: {}", key, err);
                    continue;
                }
            };
            let client = self.clone();
            tasks.spawn(async move {
                let result = client.fetch_shared(def, &key, args, true).await;
                (key, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(_))) => {}
                Ok((key, Err(err))) => log::warn!("Refetch of {} failed, keeping stale data: {}", key, err),
                Err(err) => log::warn!("Refetch task aborted: {}", err),
            }
        }
    }
}

/// A mounted view's hold on one cache entry. Dropping it releases the entry.
pub struct Subscription<T: Transport> {
    client: ApiClient<T>,
    def: &'static EndpointDef,
    key: CacheKey,
    args: Value,
    receiver: watch::Receiver<Value>,
}

impl<T: Transport> Subscription<T> {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn endpoint(&self) -> &'static str {
        self.def.name
    }

    /// Latest payload seen by this subscription
    pub fn current(&self) -> Value {
        self.receiver.borrow().clone()
    }

    /// Wait for the next refetch. `None` once the entry is gone, e.g. after logout.
    pub async fn changed(&mut self) -> Option<Value> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Like [`changed`](Self::changed) but gives up after `timeout`
    pub async fn changed_within(&mut self, timeout: Duration) -> Option<Value> {
        tokio::time::timeout(timeout, self.changed()).await.ok().flatten()
    }

    /// Force a new network call for this entry
    pub async fn refetch(&self) -> Result<Value, ApiError> {
        self.client
            .fetch_shared(self.def, &self.key, self.args.clone(), true)
            .await
    }
}

impl<T: Transport> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.client.inner.cache.release(&self.key);
    }
}

impl<T: Transport> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Subscription").field("key", &self.key).finish()
    }
}

/// Flag every running read whose result the tags could hit. Returns how many.
fn mark_in_flight(in_flight: &HashMap<CacheKey, InFlight>, tags: &[Tag]) -> usize {
    let mut marked = 0;
    for running in in_flight.values() {
        if running.def.may_provide(&running.args, tags) {
            running.dirty.store(true, Ordering::SeqCst);
            marked += 1;
        }
    }
    marked
}

/// Null fields carry no meaning on the wire, so they do not split cache keys
fn canonical_args(args: Value) -> Value {
    match args {
        Value::Object(map) => {
            let map: Map<String, Value> = map.into_iter().filter(|(_, v)| !v.is_null()).collect();
            Value::Object(map)
        }
        _ => Value::Object(Map::new()),
    }
}
