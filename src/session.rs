//! Per-engine pagination session.
//!
//! One session drives one engine through repeated fetch/parse cycles until
//! the engine stops offering a next page, the page cap is reached, the
//! engine blocks the client, or a fetch fails. The session exclusively owns
//! its engine and fetcher; nothing is shared with other sessions.

use scraper::Html;
use tracing::{debug, warn};

use crate::engine::{Engine, PageRequest};
use crate::error::{is_blocking_status, SearchError};
use crate::fetch::{FetchRequest, Fetcher, HttpResponse};
use crate::query::Query;
use crate::result::ResultItem;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Pagination ended normally: no next page, or the page cap was reached.
    Done,
    /// The engine refused service; no further fetches were performed.
    Banned,
    /// A fetch or first-page parse failed.
    Failed,
}

/// Everything a terminated session hands back to the aggregator. Items
/// gathered before a ban or failure are retained.
#[derive(Debug)]
pub struct EngineReport {
    pub engine: String,
    pub items: Vec<ResultItem>,
    pub termination: Termination,
    pub error: Option<SearchError>,
    /// Number of results pages fetched (auxiliary first-page fetches not
    /// counted).
    pub pages: usize,
}

impl EngineReport {
    /// A report for an engine whose session could not be set up.
    pub fn setup_failed(engine: impl Into<String>, error: SearchError) -> Self {
        Self {
            engine: engine.into(),
            items: Vec::new(),
            termination: Termination::Failed,
            error: Some(error),
            pages: 0,
        }
    }

    /// True when the session terminated because the engine blocked it.
    pub fn is_banned(&self) -> bool {
        self.termination == Termination::Banned
    }
}

/// Drives one engine through fetch/parse/next-page cycles.
pub struct PaginationSession {
    engine: Box<dyn Engine>,
    fetcher: Box<dyn Fetcher>,
}

/// What one fetched page yielded. Computed synchronously; the parsed
/// document never lives across an await point.
struct PageOutcome {
    banned: bool,
    blocks: usize,
    items: Vec<ResultItem>,
    next: PageRequest,
}

impl PaginationSession {
    pub fn new(engine: Box<dyn Engine>, fetcher: Box<dyn Fetcher>) -> Self {
        Self { engine, fetcher }
    }

    /// Runs the session to termination. Fetches at most `max_pages` results
    /// pages regardless of how many next-page links the engine reports.
    pub async fn run(mut self, query: &Query, max_pages: usize) -> EngineReport {
        let name = self.engine.name().to_string();
        let mut items: Vec<ResultItem> = Vec::new();
        let mut pages = 0usize;

        if max_pages == 0 {
            return finish(name, items, Termination::Done, None, pages);
        }

        let mut request = match self.engine.first_page(self.fetcher.as_mut(), query).await {
            Ok(request) => request,
            Err(error) => {
                warn!(engine = %name, %error, "first page setup failed");
                let termination = match &error {
                    SearchError::Status(status) if is_blocking_status(*status) => {
                        Termination::Banned
                    }
                    _ => Termination::Failed,
                };
                return finish(name, items, termination, Some(error), pages);
            }
        };

        while let Some(url) = request.url.take() {
            let fetch_request = match request.form.take() {
                Some(form) => FetchRequest::post(url, form),
                None => FetchRequest::get(url),
            };

            let response = match self.fetcher.fetch(&fetch_request).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(engine = %name, %error, "fetch failed");
                    return finish(name, items, Termination::Failed, Some(error), pages);
                }
            };
            pages += 1;

            let outcome = inspect_page(self.engine.as_ref(), &response);

            if outcome.banned {
                warn!(engine = %name, status = response.status, "engine banned");
                return finish(name, items, Termination::Banned, None, pages);
            }
            if !response.is_success() {
                warn!(engine = %name, status = response.status, "unexpected status");
                let error = SearchError::Status(response.status);
                return finish(name, items, Termination::Failed, Some(error), pages);
            }
            if outcome.blocks == 0 {
                if pages == 1 {
                    let error = SearchError::Parse("no result blocks on first page".into());
                    return finish(name, items, Termination::Failed, Some(error), pages);
                }
                debug!(engine = %name, page = pages, "no result blocks extracted");
            }
            debug!(engine = %name, page = pages, items = outcome.items.len(), "page parsed");
            items.extend(outcome.items);

            if pages >= max_pages {
                debug!(engine = %name, "page limit reached");
                break;
            }
            request = outcome.next;
        }

        finish(name, items, Termination::Done, None, pages)
    }
}

fn finish(
    engine: String,
    items: Vec<ResultItem>,
    termination: Termination,
    error: Option<SearchError>,
    pages: usize,
) -> EngineReport {
    EngineReport {
        engine,
        items,
        termination,
        error,
        pages,
    }
}

fn inspect_page(engine: &dyn Engine, response: &HttpResponse) -> PageOutcome {
    let page = Html::parse_document(&response.body);

    if engine.detect_ban(response.status, &page) {
        return PageOutcome {
            banned: true,
            blocks: 0,
            items: Vec::new(),
            next: PageRequest::end(),
        };
    }

    let blocks = engine.result_blocks(&page);
    let count = blocks.len();
    let items = blocks
        .into_iter()
        .filter_map(|block| engine.extract_item(block))
        .collect();

    PageOutcome {
        banned: false,
        blocks: count,
        items,
        next: engine.next_page(&page),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::engine::EngineDescriptor;
    use crate::error::Result;
    use crate::selector::NextSelector;

    struct TestEngine {
        descriptor: EngineDescriptor,
    }

    impl TestEngine {
        fn new() -> Self {
            Self {
                descriptor: EngineDescriptor {
                    name: "Test",
                    base_url: "https://test.example",
                    blocks: "div.result",
                    url: "a.link",
                    title: "a.link",
                    text: "p.snippet",
                    next: NextSelector::Css("a.next[href]"),
                    ban_marker: Some("form#blocked"),
                },
            }
        }

        fn with_terminal_next(mut self) -> Self {
            self.descriptor.next = NextSelector::CssWithText {
                css: "div.pagination a[href]",
                text: "Next",
                excluded_class: Some("disabled"),
            };
            self
        }
    }

    #[async_trait]
    impl Engine for TestEngine {
        fn descriptor(&self) -> &EngineDescriptor {
            &self.descriptor
        }

        async fn first_page(
            &self,
            _fetcher: &mut dyn Fetcher,
            query: &Query,
        ) -> Result<PageRequest> {
            Ok(PageRequest::get(format!(
                "{}/search?q={}",
                self.descriptor.base_url,
                query.encoded()
            )))
        }
    }

    struct ScriptedFetcher {
        responses: VecDeque<Result<HttpResponse>>,
        requests: Arc<Mutex<Vec<FetchRequest>>>,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<HttpResponse>>) -> (Self, Arc<Mutex<Vec<FetchRequest>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    responses: responses.into(),
                    requests: Arc::clone(&requests),
                },
                requests,
            )
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&mut self, request: &FetchRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .pop_front()
                .expect("fetched more pages than scripted")
        }
    }

    fn ok(body: String) -> Result<HttpResponse> {
        Ok(HttpResponse { status: 200, body })
    }

    fn status(status: u16) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status,
            body: String::new(),
        })
    }

    fn results_page(page: usize, items: usize, with_next: bool) -> String {
        let mut body = String::from("<html><body>");
        for i in 0..items {
            body.push_str(&format!(
                r#"<div class="result">
                     <a class="link" href="https://site{page}.example/item{i}">Item {page}-{i}</a>
                     <p class="snippet">snippet {i}</p>
                   </div>"#
            ));
        }
        if with_next {
            body.push_str(&format!(
                r#"<a class="next" href="/search?page={}">next</a>"#,
                page + 1
            ));
        }
        body.push_str("</body></html>");
        body
    }

    async fn run_session(
        engine: TestEngine,
        responses: Vec<Result<HttpResponse>>,
        max_pages: usize,
    ) -> (EngineReport, usize) {
        let (fetcher, requests) = ScriptedFetcher::new(responses);
        let session = PaginationSession::new(Box::new(engine), Box::new(fetcher));
        let report = session.run(&Query::new("rust"), max_pages).await;
        let fetches = requests.lock().unwrap().len();
        (report, fetches)
    }

    #[tokio::test]
    async fn test_page_cap_stops_pagination() {
        // Three pages of ten items each, but only two may be fetched.
        let responses = vec![
            ok(results_page(1, 10, true)),
            ok(results_page(2, 10, true)),
            ok(results_page(3, 10, true)),
        ];
        let (report, fetches) = run_session(TestEngine::new(), responses, 2).await;

        assert_eq!(report.termination, Termination::Done);
        assert_eq!(report.items.len(), 20);
        assert_eq!(report.pages, 2);
        assert_eq!(fetches, 2, "third page must never be fetched");
    }

    #[tokio::test]
    async fn test_done_when_no_next_link() {
        let responses = vec![ok(results_page(1, 3, false))];
        let (report, fetches) = run_session(TestEngine::new(), responses, 5).await;

        assert_eq!(report.termination, Termination::Done);
        assert_eq!(report.items.len(), 3);
        assert_eq!(fetches, 1);
    }

    #[tokio::test]
    async fn test_banned_on_first_fetch() {
        let responses = vec![status(429)];
        let (report, fetches) = run_session(TestEngine::new(), responses, 3).await;

        assert_eq!(report.termination, Termination::Banned);
        assert!(report.is_banned());
        assert!(report.items.is_empty());
        assert_eq!(fetches, 1, "a banned session performs no further fetches");
    }

    #[tokio::test]
    async fn test_banned_by_page_marker_retains_items() {
        let responses = vec![
            ok(results_page(1, 4, true)),
            ok(r#"<html><form id="blocked"></form></html>"#.to_string()),
        ];
        let (report, _) = run_session(TestEngine::new(), responses, 5).await;

        assert_eq!(report.termination, Termination::Banned);
        assert_eq!(report.items.len(), 4, "items from before the ban are kept");
        assert_eq!(report.pages, 2);
    }

    #[tokio::test]
    async fn test_terminal_next_control_ends_session() {
        let engine = TestEngine::new().with_terminal_next();
        let mut body = results_page(1, 2, false);
        body.push_str(
            r#"<div class="pagination"><a class="pg disabled" href="/p2">Next</a></div>"#,
        );
        let (report, fetches) = run_session(engine, vec![ok(body)], 5).await;

        assert_eq!(report.termination, Termination::Done);
        assert_eq!(report.items.len(), 2);
        assert_eq!(fetches, 1, "disabled next control must not be followed");
    }

    #[tokio::test]
    async fn test_transport_failure_retains_earlier_items() {
        // A refused local connection yields a real transport error.
        let cause = reqwest::get("http://127.0.0.1:1/unreachable").await.unwrap_err();
        let err = SearchError::Transport(cause);
        let responses = vec![ok(results_page(1, 5, true)), Err(err)];
        let (report, _) = run_session(TestEngine::new(), responses, 5).await;

        assert_eq!(report.termination, Termination::Failed);
        assert_eq!(report.items.len(), 5);
        assert!(matches!(report.error, Some(SearchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_plain_error_status_fails() {
        let responses = vec![status(500)];
        let (report, _) = run_session(TestEngine::new(), responses, 3).await;

        assert_eq!(report.termination, Termination::Failed);
        assert!(matches!(report.error, Some(SearchError::Status(500))));
    }

    #[tokio::test]
    async fn test_empty_first_page_fails() {
        let responses = vec![ok("<html><body>nothing here</body></html>".to_string())];
        let (report, _) = run_session(TestEngine::new(), responses, 3).await;

        assert_eq!(report.termination, Termination::Failed);
        assert!(matches!(report.error, Some(SearchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_empty_later_page_continues() {
        let mut empty_with_next = String::from("<html><body>");
        empty_with_next.push_str(r#"<a class="next" href="/search?page=3">next</a>"#);
        empty_with_next.push_str("</body></html>");

        let responses = vec![
            ok(results_page(1, 3, true)),
            ok(empty_with_next),
            ok(results_page(3, 2, false)),
        ];
        let (report, fetches) = run_session(TestEngine::new(), responses, 5).await;

        assert_eq!(report.termination, Termination::Done);
        assert_eq!(report.items.len(), 5);
        assert_eq!(fetches, 3);
    }

    #[tokio::test]
    async fn test_zero_max_pages_fetches_nothing() {
        let (report, fetches) = run_session(TestEngine::new(), vec![], 0).await;

        assert_eq!(report.termination, Termination::Done);
        assert_eq!(fetches, 0);
    }

    #[tokio::test]
    async fn test_items_with_invalid_links_skipped() {
        let body = r#"<html><body>
            <div class="result"><a class="link" href="https://ok.example/a">Good</a></div>
            <div class="result"><a class="link" href="">No link</a></div>
            <div class="result"><p class="snippet">no anchor at all</p></div>
        </body></html>"#;
        let (report, _) = run_session(TestEngine::new(), vec![ok(body.to_string())], 1).await;

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].title, "Good");
    }
}
