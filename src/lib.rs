//! # metaserp
//!
//! A concurrent multi-engine web search scraper. Each selected engine is
//! driven through its own pagination session (fetch, parse, follow the
//! engine's next-page control) up to a configured depth, and the per-engine
//! outputs are merged into a single deduplicated result collection while
//! tracking which engines refused service.
//!
//! - Async parallel sessions, one per engine, nothing shared while running
//! - URL and domain deduplication, each independently switchable
//! - Ban detection from blocking statuses and per-engine block-page markers
//! - Search operators (`site:`, `intitle:`, ...) applied across all engines
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use metaserp::{Aggregator, Query};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut aggregator = Aggregator::new(
//!         ["duckduckgo", "bing", "mojeek"],
//!         None,
//!         Duration::from_secs(10),
//!     );
//!     aggregator.set_ignore_duplicate_urls(true);
//!
//!     let outcome = aggregator.search(&Query::new("rust async runtime"), 2).await?;
//!     for item in outcome.results.items() {
//!         println!("{}: {}", item.title, item.link);
//!     }
//!     for engine in &outcome.banned_engines {
//!         eprintln!("banned: {engine}");
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod engine;
mod error;
mod fetch;
mod query;
mod result;
mod selector;
mod session;

pub mod config;
pub mod engines;
pub mod report;

pub use aggregator::{AggregateOutcome, Aggregator};
pub use engine::{Engine, EngineDescriptor, PageRequest};
pub use error::{is_blocking_status, Result, SearchError};
pub use fetch::{FetchRequest, Fetcher, HttpFetcher, HttpResponse, Method};
pub use query::{Query, SearchOperator};
pub use result::{normalize_host, ResultItem, ResultSet};
pub use selector::NextSelector;
pub use session::{EngineReport, PaginationSession, Termination};
