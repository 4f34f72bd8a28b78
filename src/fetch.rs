//! County fetch orchestration
//!
//! A [`CountyFetcher`] answers "show me this county" requests: it serves a
//! fresh cached record when one exists and otherwise resolves the county
//! code, calls the Census API, parses the response and stores the result.
//! The outcome of the latest call is exposed as a [`FetchState`] snapshot.
//!
//! Concurrent fetches of the same county are not coalesced: each call checks
//! the cache on its own, so two calls that both miss both hit the network.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{normalize, CacheStats, CountyCache};
use crate::data::{
    find_county, parse_county_response, CensusConfig, CountyNotFoundError, CountyRecord,
};
use crate::request::RequestExecutor;

/// Where a fetch currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FetchPhase {
    /// No fetch has run yet
    #[default]
    Idle,
    /// Looking the county up in the cache
    CheckingCache,
    /// Served from the cache without network access
    CacheHit,
    /// Waiting on the Census API
    Fetching,
    /// Response parsed into a record
    ParseOk,
    /// Response arrived but had an unusable shape
    ParseFail,
    /// Transport failure or non-2xx status
    NetworkFail,
    /// The county name has no known code
    NotFound,
}

/// Observable result of the most recent fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchState {
    /// The record, when one is available
    pub data: Option<CountyRecord>,
    /// Whether a network request is in flight
    pub is_loading: bool,
    /// Whether the fetch failed
    pub is_error: bool,
    /// Failure message when `is_error` is set
    pub error: Option<String>,
    /// Whether `data` came from the cache
    pub is_from_cache: bool,
    /// Current step of the fetch
    pub phase: FetchPhase,
}

/// Signals whether the consumer of a fetch is still around
///
/// Clones share the same flag. Once cancelled, any fetch holding the token
/// discards its result when the network call returns.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}

impl LivenessToken {
    /// Creates a live token
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Marks the consumer as gone
    pub fn cancel(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Whether the consumer is still around
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// Fetches county records through the shared cache
#[derive(Debug)]
pub struct CountyFetcher {
    /// HTTP executor for Census requests
    executor: RequestExecutor,
    /// Process-wide record cache
    cache: Arc<CountyCache>,
    /// Census API settings
    config: CensusConfig,
    /// Outcome of the latest fetch
    state: RwLock<FetchState>,
}

impl CountyFetcher {
    /// Creates a fetcher over a shared cache
    pub fn new(executor: RequestExecutor, cache: Arc<CountyCache>, config: CensusConfig) -> Self {
        Self {
            executor,
            cache,
            config,
            state: RwLock::new(FetchState::default()),
        }
    }

    /// Fetches a county by any accepted spelling of its name
    ///
    /// The outcome is published through [`CountyFetcher::state`]. Network
    /// failures and malformed responses are reported there, not returned.
    ///
    /// # Errors
    ///
    /// Returns `CountyNotFoundError` when the name has no known county code.
    /// No request is made in that case.
    pub async fn fetch_county(
        &self,
        raw_name: &str,
        liveness: &LivenessToken,
    ) -> Result<(), CountyNotFoundError> {
        if !liveness.is_alive() {
            return Ok(());
        }

        let key = normalize(raw_name);
        self.set_state(FetchState {
            phase: FetchPhase::CheckingCache,
            ..FetchState::default()
        });

        if let Some(record) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            self.set_state(FetchState {
                data: Some(record),
                is_from_cache: true,
                phase: FetchPhase::CacheHit,
                ..FetchState::default()
            });
            return Ok(());
        }

        debug!(key = %key, "Cache miss");
        self.set_state(FetchState {
            is_loading: true,
            phase: FetchPhase::Fetching,
            ..FetchState::default()
        });

        let county = match find_county(raw_name) {
            Ok(county) => county,
            Err(e) => {
                warn!(name = raw_name, "Unknown county");
                self.set_state(FetchState {
                    is_error: true,
                    error: Some(e.to_string()),
                    phase: FetchPhase::NotFound,
                    ..FetchState::default()
                });
                return Err(e);
            }
        };

        let url = self.config.endpoint_url();
        let options = self.config.county_request(county.code);
        let result = self.executor.execute(&url, options).await;

        if !liveness.is_alive() {
            debug!(county = county.name, "Consumer gone; discarding response");
            return Ok(());
        }

        if !result.ok {
            let message = result
                .error
                .unwrap_or_else(|| format!("Request failed with status {}", result.status));
            self.set_state(FetchState {
                is_error: true,
                error: Some(message),
                phase: FetchPhase::NetworkFail,
                ..FetchState::default()
            });
            return Ok(());
        }

        match result.data.as_ref().and_then(parse_county_response) {
            Some(record) => {
                // Keyed by the API's own name so the next lookup matches even
                // if the caller spelled it differently.
                self.cache.set(&record.name, record.clone());
                info!(county = %record.name, population = record.population, "Fetched county");
                self.set_state(FetchState {
                    data: Some(record),
                    phase: FetchPhase::ParseOk,
                    ..FetchState::default()
                });
            }
            None => {
                warn!(county = county.name, "Census response had an unexpected shape");
                self.set_state(FetchState {
                    phase: FetchPhase::ParseFail,
                    ..FetchState::default()
                });
            }
        }

        Ok(())
    }

    /// Snapshot of the latest fetch outcome
    pub fn state(&self) -> FetchState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// The shared cache
    pub fn cache(&self) -> &Arc<CountyCache> {
        &self.cache
    }

    /// Number of cached entries
    pub fn cache_size(&self) -> usize {
        self.cache.size()
    }

    /// Names of all cached counties
    pub fn list_cached_names(&self) -> Vec<String> {
        self.cache.list_names()
    }

    /// Cache diagnostics
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Empties the shared cache
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Removes expired cache entries, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        self.cache.cleanup_expired()
    }

    fn set_state(&self, next: FetchState) {
        if let Ok(mut state) = self.state.write() {
            *state = next;
        }
    }
}
