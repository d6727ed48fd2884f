//! Compiled-in defaults shared by the fetcher and the aggregator.

/// User agent presented to the engines.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Default `Accept-Language` header.
pub const ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.5";

/// Default per-fetch timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Default number of results pages requested per engine.
pub const DEFAULT_PAGES: usize = 1;
