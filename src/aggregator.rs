//! Concurrent multi-engine aggregation with deduplication and ban tracking.

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::engines;
use crate::error::{Result, SearchError};
use crate::fetch::HttpFetcher;
use crate::query::{Query, SearchOperator};
use crate::result::ResultSet;
use crate::session::{EngineReport, PaginationSession};

/// The merged outcome of one aggregate search.
#[derive(Debug)]
pub struct AggregateOutcome {
    /// Deduplicated results, in merge order.
    pub results: ResultSet,
    /// Engines that refused service during this search.
    pub banned_engines: Vec<String>,
    /// Per-engine session reports, in completion order.
    pub reports: Vec<EngineReport>,
}

/// Runs one pagination session per selected engine concurrently and merges
/// their outputs under the configured deduplication policy.
///
/// Sessions share nothing while running; completed sessions are merged one
/// at a time by the coordinating task, so the dedup filters never race.
/// The order in which engines complete is not deterministic, and therefore
/// neither is the final item order nor which of two duplicates is kept.
pub struct Aggregator {
    engine_names: Vec<String>,
    proxy: Option<String>,
    timeout: Duration,
    operator: Option<SearchOperator>,
    ignore_duplicate_urls: bool,
    ignore_duplicate_domains: bool,
}

impl Aggregator {
    /// Creates an aggregator over the named engines. Names are matched
    /// case-insensitively against the known engines; unknown names are
    /// excluded, not an error.
    pub fn new<I, S>(engine_names: I, proxy: Option<String>, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            engine_names: engine_names.into_iter().map(Into::into).collect(),
            proxy,
            timeout,
            operator: None,
            ignore_duplicate_urls: false,
            ignore_duplicate_domains: false,
        }
    }

    /// Applies a search operator identically to every engine's query.
    pub fn set_search_operator(&mut self, operator: SearchOperator) {
        self.operator = Some(operator);
    }

    /// Excludes items whose normalized link was already merged.
    pub fn set_ignore_duplicate_urls(&mut self, on: bool) {
        self.ignore_duplicate_urls = on;
    }

    /// Excludes items whose host was already merged.
    pub fn set_ignore_duplicate_domains(&mut self, on: bool) {
        self.ignore_duplicate_domains = on;
    }

    /// Searches all selected engines concurrently, fetching up to
    /// `max_pages` pages per engine, and merges the results.
    ///
    /// Per-engine failures and bans are contained in that engine's report;
    /// this call only errors on an invalid query.
    pub async fn search(&self, query: &Query, max_pages: usize) -> Result<AggregateOutcome> {
        if query.terms().trim().is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".into()));
        }

        let query = match (&self.operator, query.operator()) {
            (Some(operator), None) => query.clone().with_operator(operator.clone()),
            _ => query.clone(),
        };

        let mut sessions = Vec::new();
        for engine in engines::select(&self.engine_names) {
            match HttpFetcher::new(self.proxy.as_deref(), self.timeout) {
                Ok(fetcher) => {
                    sessions.push(Ok(PaginationSession::new(engine, Box::new(fetcher))));
                }
                Err(error) => {
                    warn!(engine = engine.name(), %error, "session setup failed");
                    sessions.push(Err(EngineReport::setup_failed(engine.name(), error)));
                }
            }
        }
        debug!(engines = sessions.len(), query = %query.dispatch_string(), "dispatching sessions");

        Ok(self.run(sessions, &query, max_pages).await)
    }

    /// Fan-out/fan-in: every session runs concurrently, and each completed
    /// session is merged as it terminates (single-writer discipline).
    pub(crate) async fn run(
        &self,
        sessions: Vec<std::result::Result<PaginationSession, EngineReport>>,
        query: &Query,
        max_pages: usize,
    ) -> AggregateOutcome {
        let mut outcome = AggregateOutcome {
            results: ResultSet::new(),
            banned_engines: Vec::new(),
            reports: Vec::new(),
        };

        let mut running = FuturesUnordered::new();
        for session in sessions {
            match session {
                Ok(session) => running.push(session.run(query, max_pages)),
                Err(report) => self.merge(report, &mut outcome),
            }
        }

        while let Some(report) = running.next().await {
            self.merge(report, &mut outcome);
        }

        outcome
    }

    fn merge(&self, report: EngineReport, outcome: &mut AggregateOutcome) {
        let mut links = outcome.results.links();
        let mut hosts = outcome.results.hosts();

        for item in &report.items {
            if self.ignore_duplicate_urls && links.contains(&item.dedup_link()) {
                continue;
            }
            if self.ignore_duplicate_domains && hosts.contains(&item.host) {
                continue;
            }
            links.insert(item.dedup_link());
            hosts.insert(item.host.clone());
            outcome.results.push(item.clone());
        }

        debug!(
            engine = %report.engine,
            items = report.items.len(),
            merged = outcome.results.len(),
            "session merged"
        );
        if report.is_banned() {
            outcome.banned_engines.push(report.engine.clone());
        }
        outcome.reports.push(report);
    }
}
