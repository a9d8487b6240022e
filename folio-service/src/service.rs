//! The content facade: cached reads, gated writes, revert.

use folio_core::{
    revert_message, AccessError, BlogPost, ContentItem, ContentKind, ContentSnapshot, FolioConfig,
    FolioResult, Metadata, VersionNumber, VersionRecord,
};
use folio_storage::{CacheKey, CacheStats, PortfolioStore, StoredKind, TtlCache};
use tracing::{debug, info, warn};

use crate::{
    AllowAll, Authorizer, KeyedRateLimiter, PassThrough, RequestLimiter, Sanitizer, WriteContext,
};

/// What the facade keeps in its cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedContent {
    /// A by-id read; `None` records that the item was absent.
    Item(Option<ContentSnapshot>),
    /// Every live item of one kind, in insertion order.
    Collection(Vec<ContentSnapshot>),
}

impl CachedContent {
    fn into_item<K: ContentItem>(self) -> Option<K> {
        match self {
            CachedContent::Item(snapshot) => snapshot.and_then(ContentSnapshot::into_item),
            CachedContent::Collection(_) => None,
        }
    }

    fn into_list<K: ContentItem>(self) -> Vec<K> {
        match self {
            CachedContent::Collection(snapshots) => snapshots
                .into_iter()
                .filter_map(ContentSnapshot::into_item)
                .collect(),
            CachedContent::Item(_) => Vec::new(),
        }
    }
}

/// Service API over a [`PortfolioStore`].
///
/// Reads go through the TTL cache. Writes pass the authorizer, then the
/// rate limiter, then the sanitizer, hit the store directly and finally
/// drop the item and collection cache keys of the kind they touched.
pub struct ContentService {
    store: PortfolioStore,
    cache: TtlCache<CacheKey, CachedContent>,
    authorizer: Box<dyn Authorizer>,
    limiter: Box<dyn RequestLimiter>,
    sanitizer: Box<dyn Sanitizer>,
    config: FolioConfig,
}

/// Builder for [`ContentService`].
///
/// Unset gates default to letting every write through, unset sanitizer to
/// [`PassThrough`], and the limiter to a [`KeyedRateLimiter`] when the
/// config enables rate limiting.
pub struct ContentServiceBuilder {
    config: FolioConfig,
    store: Option<PortfolioStore>,
    authorizer: Option<Box<dyn Authorizer>>,
    limiter: Option<Box<dyn RequestLimiter>>,
    sanitizer: Option<Box<dyn Sanitizer>>,
}

impl ContentServiceBuilder {
    pub fn new(config: FolioConfig) -> Self {
        Self {
            config,
            store: None,
            authorizer: None,
            limiter: None,
            sanitizer: None,
        }
    }

    /// Serve an existing store, e.g. one built with seed data.
    pub fn store(mut self, store: PortfolioStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Some(Box::new(authorizer));
        self
    }

    pub fn rate_limiter(mut self, limiter: impl RequestLimiter + 'static) -> Self {
        self.limiter = Some(Box::new(limiter));
        self
    }

    pub fn sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Some(Box::new(sanitizer));
        self
    }

    /// Validate the config and assemble the service.
    pub fn build(self) -> FolioResult<ContentService> {
        self.config.validate()?;

        let limiter: Box<dyn RequestLimiter> = match self.limiter {
            Some(limiter) => limiter,
            None if self.config.rate_limit_enabled => {
                Box::new(KeyedRateLimiter::from_config(&self.config)?)
            }
            None => Box::new(AllowAll),
        };

        Ok(ContentService {
            store: self
                .store
                .unwrap_or_else(|| PortfolioStore::new(&self.config)),
            cache: TtlCache::new(self.config.cache_default_ttl),
            authorizer: self.authorizer.unwrap_or_else(|| Box::new(AllowAll)),
            limiter,
            sanitizer: self.sanitizer.unwrap_or_else(|| Box::new(PassThrough)),
            config: self.config,
        })
    }
}

impl ContentService {
    pub fn builder(config: FolioConfig) -> ContentServiceBuilder {
        ContentServiceBuilder::new(config)
    }

    /// Service over an empty store with default gates.
    pub fn new(config: FolioConfig) -> FolioResult<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Sweep expired cache entries.
    pub fn clean_expired_cache(&self) -> usize {
        self.cache.clean_expired()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn get<K: StoredKind>(&self, id: &str) -> FolioResult<Option<K>> {
        let cached = self
            .cache
            .get_or_try_load(CacheKey::item(K::KIND, id), None, || {
                self.store
                    .get::<K>(id)
                    .map(|item| CachedContent::Item(item.map(ContentItem::into_snapshot)))
            })?;
        Ok(cached.into_item())
    }

    pub fn list<K: StoredKind>(&self) -> FolioResult<Vec<K>> {
        let cached = self
            .cache
            .get_or_try_load(CacheKey::collection(K::KIND), None, || {
                self.store.list::<K>().map(|items| {
                    CachedContent::Collection(
                        items.into_iter().map(ContentItem::into_snapshot).collect(),
                    )
                })
            })?;
        Ok(cached.into_list())
    }

    pub fn get_metadata(&self) -> FolioResult<Option<Metadata>> {
        self.get::<Metadata>(self.store.metadata_id())
    }

    /// Published or not, the post whose slug matches.
    pub fn find_blog_post_by_slug(&self, slug: &str) -> FolioResult<Option<BlogPost>> {
        Ok(self
            .list::<BlogPost>()?
            .into_iter()
            .find(|post| post.slug == slug))
    }

    /// History of one item, newest first.
    pub fn list_versions(&self, kind: ContentKind, id: &str) -> FolioResult<Vec<VersionRecord>> {
        self.store.list_versions(kind, id)
    }

    pub fn get_version(
        &self,
        kind: ContentKind,
        id: &str,
        version: VersionNumber,
    ) -> FolioResult<Option<VersionRecord>> {
        self.store.get_version(kind, id, version)
    }

    /// The newest version records across all content.
    pub fn recent_activity(&self, limit: usize) -> FolioResult<Vec<VersionRecord>> {
        self.store.ledger().recent(limit)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Create or replace an item.
    pub fn upsert<K: StoredKind>(&self, ctx: &WriteContext, mut item: K) -> FolioResult<K> {
        self.check_gates(ctx, "upsert", K::KIND)?;

        item.sanitize_with(&|text: &str| self.sanitizer.sanitize_text(text));
        let stored = self.store.upsert(item, self.author(ctx))?;

        self.invalidate(K::KIND, stored.id());
        Ok(stored)
    }

    pub fn update_metadata(&self, ctx: &WriteContext, metadata: Metadata) -> FolioResult<Metadata> {
        self.upsert(ctx, metadata)
    }

    /// Delete an item. `Ok(false)` if it did not exist.
    pub fn delete<K: StoredKind>(&self, ctx: &WriteContext, id: &str) -> FolioResult<bool> {
        self.check_gates(ctx, "delete", K::KIND)?;

        let deleted = self.store.delete::<K>(id, self.author(ctx))?;
        if deleted {
            self.invalidate(K::KIND, id);
        }
        Ok(deleted)
    }

    /// Write the state recorded in `version` back as a new version.
    ///
    /// Returns `Ok(false)` if there is no such version. The restored state
    /// goes through the same validated upsert path as any other write, and
    /// a deleted item comes back to life.
    pub fn revert_to_version(
        &self,
        ctx: &WriteContext,
        kind: ContentKind,
        id: &str,
        version: VersionNumber,
    ) -> FolioResult<bool> {
        self.check_gates(ctx, "revert", kind)?;

        let Some(record) = self.store.get_version(kind, id, version)? else {
            debug!(%kind, id, version, "Revert target not found");
            return Ok(false);
        };

        let (_, new_record) = self.store.write_snapshot(
            record.data,
            self.author(ctx),
            Some(revert_message(version)),
        )?;
        self.invalidate(kind, id);

        info!(%kind, id, from = version, version = new_record.version, "Reverted item");
        Ok(true)
    }

    /// Typed form of [`ContentService::revert_to_version`].
    pub fn revert<K: StoredKind>(
        &self,
        ctx: &WriteContext,
        id: &str,
        version: VersionNumber,
    ) -> FolioResult<bool> {
        self.revert_to_version(ctx, K::KIND, id, version)
    }

    fn author<'a>(&'a self, ctx: &'a WriteContext) -> &'a str {
        ctx.author
            .as_deref()
            .filter(|author| !author.trim().is_empty())
            .unwrap_or(&self.config.default_author)
    }

    fn check_gates(&self, ctx: &WriteContext, action: &str, kind: ContentKind) -> FolioResult<()> {
        if !self.authorizer.authorize(&ctx.credential) {
            warn!(%kind, action, caller_id = %ctx.caller_id, "Rejected unauthorized write");
            return Err(AccessError::Unauthorized {
                action: format!("{} {}", action, kind),
            }
            .into());
        }
        if !self.limiter.allow_request(&ctx.caller_id) {
            warn!(%kind, action, caller_id = %ctx.caller_id, "Rejected rate-limited write");
            return Err(AccessError::RateLimited {
                caller_id: ctx.caller_id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn invalidate(&self, kind: ContentKind, id: &str) {
        for key in CacheKey::affected_by_write(kind, id) {
            self.cache.delete(&key);
        }
    }
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
