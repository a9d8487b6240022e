//! Authorization and rate-limit gates in front of every write.
//!
//! Both gates are injected hooks. The service calls the authorizer first
//! and the limiter second, and neither is consulted for reads.

use std::num::NonZeroU32;
use std::sync::Arc;

use dashmap::DashMap;
use folio_core::{ConfigError, FolioConfig, FolioResult};
use governor::{clock::DefaultClock, Quota, RateLimiter};
use subtle::ConstantTimeEq;

/// Decides whether a credential may write.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, credential: &str) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn authorize(&self, credential: &str) -> bool {
        self(credential)
    }
}

/// Decides whether a caller may issue another write right now.
pub trait RequestLimiter: Send + Sync {
    fn allow_request(&self, caller_id: &str) -> bool;
}

impl<F> RequestLimiter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn allow_request(&self, caller_id: &str) -> bool {
        self(caller_id)
    }
}

/// Lets everything through. For deployments where an outer layer already
/// authenticates and throttles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _credential: &str) -> bool {
        true
    }
}

impl RequestLimiter for AllowAll {
    fn allow_request(&self, _caller_id: &str) -> bool {
        true
    }
}

/// Accepts a fixed set of bearer tokens.
#[derive(Clone, Default)]
pub struct TokenAuthorizer {
    tokens: Vec<Vec<u8>>,
}

impl TokenAuthorizer {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().as_bytes().to_vec())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl Authorizer for TokenAuthorizer {
    fn authorize(&self, credential: &str) -> bool {
        let presented = credential.as_bytes();
        // Check every token so timing does not reveal which one matched.
        self.tokens
            .iter()
            .fold(0u8, |found, token| found | token.as_slice().ct_eq(presented).unwrap_u8())
            == 1
    }
}

impl std::fmt::Debug for TokenAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthorizer")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    DefaultClock,
>;

/// One token bucket per caller id.
#[derive(Clone)]
pub struct KeyedRateLimiter {
    quota: Quota,
    limiters: Arc<DashMap<String, Arc<DirectRateLimiter>>>,
}

impl KeyedRateLimiter {
    /// `per_minute` steady writes per caller, with room for `burst` at once.
    pub fn new(per_minute: u32, burst: u32) -> FolioResult<Self> {
        let rate = NonZeroU32::new(per_minute).ok_or_else(|| ConfigError::InvalidValue {
            field: "rate_limit_per_minute".to_string(),
            value: per_minute.to_string(),
            reason: "must be greater than zero".to_string(),
        })?;
        let burst = NonZeroU32::new(burst).ok_or_else(|| ConfigError::InvalidValue {
            field: "rate_limit_burst".to_string(),
            value: burst.to_string(),
            reason: "must be greater than zero".to_string(),
        })?;

        Ok(Self {
            quota: Quota::per_minute(rate).allow_burst(burst),
            limiters: Arc::new(DashMap::new()),
        })
    }

    pub fn from_config(config: &FolioConfig) -> FolioResult<Self> {
        Self::new(config.rate_limit_per_minute, config.rate_limit_burst)
    }

    fn limiter_for(&self, caller_id: &str) -> Arc<DirectRateLimiter> {
        if let Some(limiter) = self.limiters.get(caller_id) {
            return Arc::clone(&limiter);
        }
        self.limiters
            .entry(caller_id.to_string())
            .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)))
            .clone()
    }

    /// Number of callers with a bucket.
    pub fn tracked_callers(&self) -> usize {
        self.limiters.len()
    }
}

impl RequestLimiter for KeyedRateLimiter {
    fn allow_request(&self, caller_id: &str) -> bool {
        self.limiter_for(caller_id).check().is_ok()
    }
}

impl std::fmt::Debug for KeyedRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedRateLimiter")
            .field("quota", &self.quota)
            .field("callers", &self.limiters.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
