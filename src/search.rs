//! Search entry point: input text in, translated display item out.
//!
//! A search runs the pattern matcher, resolves languages against the current
//! settings, then answers from the cache or asks the backend. Each backend
//! call runs on a spawned task shared by every identical lookup that overlaps
//! it, and the task fills the cache whether or not anyone is still waiting.
//! Failures are logged and reported as "no results"; they are never cached.

use crate::cache::TranslationCache;
use crate::i18n::{MetricsReport, TranslationMetrics};
use crate::pattern::PatternMatcher;
use crate::resolver::{resolve, ResolvedIntent};
use crate::settings::SettingsProvider;
use crate::translation::{TranslateError, TranslateResponse, TranslationBackend, TranslationRequest};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

type PendingLookup = Shared<BoxFuture<'static, Result<TranslateResponse, Arc<TranslateError>>>>;

/// Ordering hint for the host menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Menu item shown for a successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationItem {
    pub name: String,
    pub priority: Priority,
}

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub intent: ResolvedIntent,
    pub item: TranslationItem,
}

/// Turns search text into translation results.
///
/// Owns the matcher and the in-flight table; settings, backend and cache are
/// shared with the host.
pub struct Translator {
    matcher: PatternMatcher,
    settings: Arc<dyn SettingsProvider>,
    backend: Arc<dyn TranslationBackend>,
    cache: Arc<TranslationCache>,
    metrics: Arc<TranslationMetrics>,
    pending: Arc<Mutex<HashMap<TranslationRequest, PendingLookup>>>,
}

impl Translator {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        backend: Arc<dyn TranslationBackend>,
        cache: Arc<TranslationCache>,
    ) -> Self {
        Self {
            matcher: PatternMatcher::new(),
            settings,
            backend,
            cache,
            metrics: Arc::new(TranslationMetrics::new()),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Match and resolve `input` without dispatching anything.
    pub fn pattern_match(&self, input: &str) -> Option<ResolvedIntent> {
        let raw = self.matcher.match_input(input)?;
        resolve(
            &raw,
            &self.settings.default_source_language(),
            &self.settings.default_target_language(),
        )
    }

    /// Translate `input` if it is a translation query.
    ///
    /// Returns `None` for non-queries, empty queries and backend failures.
    /// Dropping the returned future does not cancel the backend call: it runs
    /// to completion and still fills the cache.
    pub async fn search(&self, input: &str) -> Option<SearchResult> {
        let intent = self.pattern_match(input)?;
        let request = intent.request();

        let response = match self.lookup(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "Translation failed ({} -> {}): {}",
                    intent.source_lang_code, intent.target_lang_code, e
                );
                return None;
            }
        };

        Some(SearchResult {
            item: TranslationItem {
                name: response.text(),
                priority: Priority::High,
            },
            intent,
        })
    }

    /// The response cache this translator reads and fills.
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Snapshot of the cache and backend counters.
    ///
    /// # Returns
    /// A serializable report; later searches do not change it.
    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    /// Number of backend calls currently running.
    pub fn in_flight(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn cached(&self, request: &TranslationRequest) -> Option<TranslateResponse> {
        let response = self.cache.get(request)?;
        debug!("Translation cache hit");
        self.metrics.record_cache_hit();
        Some(response)
    }

    async fn lookup(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslateResponse, Arc<TranslateError>> {
        if let Some(response) = self.cached(&request) {
            return Ok(response);
        }

        let lookup = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(lookup) = pending.get(&request) {
                self.metrics.record_cache_miss();
                self.metrics.record_joined_in_flight();
                lookup.clone()
            } else if let Some(response) = self.cached(&request) {
                // A call finished between the first check and the lock
                return Ok(response);
            } else {
                self.metrics.record_cache_miss();
                self.metrics.record_api_call();
                let lookup = self.spawn_lookup(request.clone());
                pending.insert(request, lookup.clone());
                lookup
            }
        };

        lookup.await
    }

    /// Start the backend call on its own task.
    ///
    /// The task caches a success and then removes its pending entry, so both
    /// happen even when every waiting search has been dropped. Must be called
    /// with the pending lock held.
    fn spawn_lookup(&self, request: TranslationRequest) -> PendingLookup {
        let backend = Arc::clone(&self.backend);
        let cache = Arc::clone(&self.cache);
        let metrics = Arc::clone(&self.metrics);
        let pending = Arc::clone(&self.pending);

        let task = tokio::spawn(async move {
            let result = backend.translate(&request).await.map_err(Arc::new);
            match &result {
                Ok(response) => cache.insert(request.clone(), response.clone()),
                Err(_) => metrics.record_api_failure(),
            }
            pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&request);
            result
        });

        async move {
            task.await
                .unwrap_or_else(|e| Err(Arc::new(TranslateError::Task(e.to_string()))))
        }
        .boxed()
        .shared()
    }
}
