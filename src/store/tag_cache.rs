use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::model::{args_signature, Tag, TagKind};

/// Identity of one cached read: endpoint plus argument signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub endpoint: &'static str,
    pub signature: String,
}

impl CacheKey {
    pub fn new(endpoint: &'static str, args: &Value) -> Self {
        Self {
            endpoint,
            signature: args_signature(endpoint, args),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}#{}", self.endpoint, self.signature)
    }
}

/// Cache entry for one read
#[derive(Debug)]
struct CacheEntry {
    args: Value,
    data: Value,
    tags: Vec<Tag>,
    fetched_at: DateTime<Utc>,
    subscribers: usize,
    /// Set when the last subscriber leaves
    unused_since: Option<Instant>,
    /// Invalidated while subscribed; data is kept until the refetch lands
    stale: bool,
    updates: watch::Sender<Value>,
}

/// Observable state of an entry, for inspection and tests
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub key: CacheKey,
    pub data: Value,
    pub tags: Vec<Tag>,
    pub fetched_at: DateTime<Utc>,
    pub subscribers: usize,
    pub stale: bool,
}

/// Entries that must be fetched again after an invalidation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invalidation {
    pub refetch: Vec<(CacheKey, Value)>,
    pub dropped: usize,
}

impl Invalidation {
    pub fn is_empty(&self) -> bool {
        self.refetch.is_empty() && self.dropped == 0
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Entries grouped by the kinds of the tags they provide
    by_kind: HashMap<TagKind, HashSet<CacheKey>>,
}

impl CacheState {
    fn index(&mut self, key: &CacheKey, tags: &[Tag]) {
        for tag in tags {
            self.by_kind.entry(tag.kind).or_default().insert(key.clone());
        }
    }

    fn unindex(&mut self, key: &CacheKey, tags: &[Tag]) {
        for tag in tags {
            if let Some(keys) = self.by_kind.get_mut(&tag.kind) {
                keys.remove(key);
                if keys.is_empty() {
                    self.by_kind.remove(&tag.kind);
                }
            }
        }
    }

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.unindex(key, &entry.tags);
        Some(entry)
    }
}

/// Keyed store behind a narrow API: `put`, `get`, `invalidate`, plus
/// subscriber bookkeeping. Nothing outside the client writes to it.
#[derive(Debug)]
pub struct TagCache {
    state: Mutex<CacheState>,
    /// How long an entry without subscribers is kept
    keep_unused_for: Duration,
}

impl TagCache {
    pub fn new(keep_unused_for: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            keep_unused_for,
        }
    }

    /// Cached payload, if present and not invalidated
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let state = self.state.lock();
        state
            .entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.data.clone())
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.state
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| entry.stale)
    }

    pub fn args(&self, key: &CacheKey) -> Option<Value> {
        self.state.lock().entries.get(key).map(|e| e.args.clone())
    }

    /// Store a fresh payload. An existing entry keeps its subscribers, who
    /// are notified of the new data; its tag set is replaced.
    pub fn put(&self, key: CacheKey, args: Value, data: Value, tags: Vec<Tag>) {
        let mut state = self.state.lock();

        if let Some(old_tags) = state.entries.get(&key).map(|e| e.tags.clone()) {
            state.unindex(&key, &old_tags);
            state.index(&key, &tags);
            if let Some(entry) = state.entries.get_mut(&key) {
                entry.args = args;
                entry.data = data.clone();
                entry.tags = tags;
                entry.fetched_at = Utc::now();
                entry.stale = false;
                entry.updates.send_replace(data);
            }
            return;
        }

        state.index(&key, &tags);
        let (updates, _) = watch::channel(data.clone());
        state.entries.insert(
            key,
            CacheEntry {
                args,
                data,
                tags,
                fetched_at: Utc::now(),
                subscribers: 0,
                unused_since: Some(Instant::now()),
                stale: false,
                updates,
            },
        );
    }

    /// Register a subscriber. If the entry vanished between the fetch and this
    /// call it is re-created from the payload the caller already holds.
    pub fn attach(
        &self,
        key: &CacheKey,
        args: &Value,
        data: &Value,
        tags: &[Tag],
    ) -> watch::Receiver<Value> {
        if !self.contains(key) {
            self.put(key.clone(), args.clone(), data.clone(), tags.to_vec());
        }

        let mut state = self.state.lock();
        match state.entries.get_mut(key) {
            Some(entry) => {
                entry.subscribers += 1;
                entry.unused_since = None;
                entry.updates.subscribe()
            }
            // only reachable if another thread removed it between the two locks
            None => watch::channel(data.clone()).1,
        }
    }

    /// Drop one subscriber; the entry becomes eligible for eviction at zero
    pub fn release(&self, key: &CacheKey) {
        let mut state = self.state.lock();
        let Some(entry) = state.entries.get_mut(key) else {
            return;
        };
        entry.subscribers = entry.subscribers.saturating_sub(1);
        if entry.subscribers == 0 {
            if self.keep_unused_for.is_zero() {
                state.remove(key);
                log::debug!("Evicted {} (last subscriber left)", key);
            } else {
                entry.unused_since = Some(Instant::now());
            }
        }
    }

    pub fn subscribers(&self, key: &CacheKey) -> usize {
        self.state
            .lock()
            .entries
            .get(key)
            .map(|e| e.subscribers)
            .unwrap_or(0)
    }

    /// Invalidate every entry providing a tag hit by `tags`.
    ///
    /// Subscribed entries are marked stale and returned for refetching, each
    /// once no matter how many tags hit it. Unsubscribed entries are dropped.
    pub fn invalidate(&self, tags: &[Tag]) -> Invalidation {
        let mut state = self.state.lock();

        let mut hit: Vec<CacheKey> = tags
            .iter()
            .filter_map(|tag| state.by_kind.get(&tag.kind))
            .flatten()
            .filter(|key| {
                state.entries.get(*key).is_some_and(|entry| {
                    tags.iter()
                        .any(|tag| entry.tags.iter().any(|provided| tag.invalidates(provided)))
                })
            })
            .cloned()
            .collect();
        hit.sort();
        hit.dedup();

        let mut result = Invalidation::default();
        for key in hit {
            let subscribed = state
                .entries
                .get(&key)
                .is_some_and(|entry| entry.subscribers > 0);
            if subscribed {
                if let Some(entry) = state.entries.get_mut(&key) {
                    entry.stale = true;
                    result.refetch.push((key, entry.args.clone()));
                }
            } else {
                state.remove(&key);
                result.dropped += 1;
            }
        }
        result
    }

    /// Remove entries that have had no subscribers for longer than `keep_unused_for`
    pub fn evict_unused(&self, now: Instant) -> usize {
        let mut state = self.state.lock();
        let expired: Vec<CacheKey> = state
            .entries
            .iter()
            .filter(|(_, entry)| {
                entry.subscribers == 0
                    && entry
                        .unused_since
                        .is_some_and(|since| now.saturating_duration_since(since) >= self.keep_unused_for)
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            state.remove(key);
        }
        expired.len()
    }

    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        let state = self.state.lock();
        let sorted: BTreeMap<&CacheKey, &CacheEntry> = state.entries.iter().collect();
        sorted
            .into_iter()
            .map(|(key, entry)| EntrySnapshot {
                key: key.clone(),
                data: entry.data.clone(),
                tags: entry.tags.clone(),
                fetched_at: entry.fetched_at,
                subscribers: entry.subscribers,
                stale: entry.stale,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything, e.g. on logout
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.by_kind.clear();
    }
}

impl Default for TagCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_list_key() -> (CacheKey, Value) {
        let args = json!({"page": 1});
        (CacheKey::new("get_orders", &args), args)
    }

    #[test]
    fn test_cache_basic_operations() {
        let cache = TagCache::default();
        let (key, args) = order_list_key();

        cache.put(
            key.clone(),
            args.clone(),
            json!({"data": []}),
            vec![Tag::list(TagKind::Order)],
        );
        assert_eq!(cache.get(&key), Some(json!({"data": []})));
        assert_eq!(cache.args(&key), Some(args));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_unsubscribed_entry_drops_it() {
        let cache = TagCache::default();
        let (key, args) = order_list_key();
        cache.put(key.clone(), args, json!([]), vec![Tag::list(TagKind::Order)]);

        let result = cache.invalidate(&[Tag::list(TagKind::Order)]);
        assert_eq!(result.dropped, 1);
        assert!(result.refetch.is_empty());
        assert!(!cache.contains(&key));
    }

    #[test]
    fn test_invalidate_subscribed_entry_marks_stale_once() {
        let cache = TagCache::default();
        let (key, args) = order_list_key();
        let tags = vec![Tag::list(TagKind::Order), Tag::entity(TagKind::Order, "o1")];
        cache.put(key.clone(), args.clone(), json!([]), tags.clone());
        let _rx = cache.attach(&key, &args, &json!([]), &tags);

        // two tags hit the same entry; it is still refetched once
        let result = cache.invalidate(&[
            Tag::entity(TagKind::Order, "o1"),
            Tag::list(TagKind::Order),
        ]);
        assert_eq!(result.refetch, vec![(key.clone(), args)]);
        assert!(cache.is_stale(&key));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_invalidate_ignores_unrelated_tags() {
        let cache = TagCache::default();
        let (key, args) = order_list_key();
        cache.put(key.clone(), args, json!([]), vec![Tag::entity(TagKind::Order, "o1")]);

        let result = cache.invalidate(&[
            Tag::entity(TagKind::Order, "o2"),
            Tag::whole(TagKind::Review),
        ]);
        assert!(result.is_empty());
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_put_notifies_subscribers_and_clears_stale() {
        let cache = TagCache::default();
        let (key, args) = order_list_key();
        let tags = vec![Tag::list(TagKind::Order)];
        cache.put(key.clone(), args.clone(), json!(["old"]), tags.clone());
        let rx = cache.attach(&key, &args, &json!(["old"]), &tags);

        cache.invalidate(&tags);
        cache.put(key.clone(), args, json!(["new"]), tags);

        assert_eq!(*rx.borrow(), json!(["new"]));
        assert!(!cache.is_stale(&key));
        assert_eq!(cache.subscribers(&key), 1);
    }

    #[test]
    fn test_release_and_eviction() {
        let cache = TagCache::new(Duration::from_secs(60));
        let (key, args) = order_list_key();
        let tags = vec![Tag::list(TagKind::Order)];
        cache.put(key.clone(), args.clone(), json!([]), tags.clone());
        let _rx = cache.attach(&key, &args, &json!([]), &tags);

        // subscribed entries are never evicted
        assert_eq!(cache.evict_unused(Instant::now() + Duration::from_secs(3600)), 0);

        cache.release(&key);
        assert_eq!(cache.evict_unused(Instant::now()), 0);
        assert_eq!(cache.evict_unused(Instant::now() + Duration::from_secs(61)), 1);
        assert!(!cache.contains(&key));
    }

    #[test]
    fn test_zero_keep_evicts_on_last_release() {
        let cache = TagCache::new(Duration::ZERO);
        let (key, args) = order_list_key();
        let tags = vec![Tag::list(TagKind::Order)];
        let _a = cache.attach(&key, &args, &json!([]), &tags);
        let _b = cache.attach(&key, &args, &json!([]), &tags);
        assert_eq!(cache.subscribers(&key), 2);

        cache.release(&key);
        assert!(cache.contains(&key));
        cache.release(&key);
        assert!(!cache.contains(&key));
    }

    #[test]
    fn test_snapshot_is_sorted_and_complete() {
        let cache = TagCache::default();
        cache.put(
            CacheKey::new("get_reviews", &json!({})),
            json!({}),
            json!(1),
            vec![Tag::list(TagKind::Review)],
        );
        cache.put(
            CacheKey::new("get_orders", &json!({})),
            json!({}),
            json!(2),
            vec![Tag::list(TagKind::Order)],
        );

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].key.endpoint, "get_orders");
        assert_eq!(snapshot[1].data, json!(1));
    }
}
