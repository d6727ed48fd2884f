//! Engine adapter contract and descriptor-driven default behavior.
//!
//! Each concrete engine supplies an [`EngineDescriptor`] with its extraction
//! rules and overrides only genuine site quirks (link fixups, auxiliary
//! first-page fetches). The shared fetch/parse/paginate behavior lives in
//! the trait's default methods and in the pagination session.

use async_trait::async_trait;
use scraper::{ElementRef, Html};

use crate::error::{is_blocking_status, Result};
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::result::ResultItem;
use crate::selector::{self, NextSelector};

/// The result of asking an adapter for a page. A `None` URL signals that
/// pagination has ended; a present `form` makes the fetch a POST.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub url: Option<String>,
    pub form: Option<Vec<(String, String)>>,
}

impl PageRequest {
    /// A GET page request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            form: None,
        }
    }

    /// A POST page request with a form payload.
    pub fn post(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            url: Some(url.into()),
            form: Some(form),
        }
    }

    /// The "no further page" request.
    pub fn end() -> Self {
        Self::default()
    }

    /// True when pagination has ended.
    pub fn is_end(&self) -> bool {
        self.url.is_none()
    }
}

/// Per-site extraction rules: where the repeating result blocks live, where
/// title/link/text sit inside one block, how the next-page control is
/// identified, and an optional block-page marker.
#[derive(Debug, Clone)]
pub struct EngineDescriptor {
    pub name: &'static str,
    pub base_url: &'static str,
    /// Selector for the repeating result blocks.
    pub blocks: &'static str,
    /// Selector for the link element inside one block.
    pub url: &'static str,
    /// Selector for the title element inside one block.
    pub title: &'static str,
    /// Selector for the snippet element inside one block.
    pub text: &'static str,
    /// How the "next page" control is identified.
    pub next: NextSelector,
    /// Selector matching an engine-specific block page, if the engine
    /// serves one with a 200 status.
    pub ban_marker: Option<&'static str>,
}

/// The capability set each concrete search engine implements.
///
/// Default implementations read the descriptor; engines override the
/// methods where the site deviates.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Returns the engine's extraction rules.
    fn descriptor(&self) -> &EngineDescriptor;

    /// Returns the engine name.
    fn name(&self) -> &str {
        self.descriptor().name
    }

    /// Builds the request for the initial results page. May perform
    /// auxiliary fetches through `fetcher` (hidden search form discovery,
    /// redirect targets) before returning the request used for parsing.
    async fn first_page(&self, fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest>;

    /// Locates the repeating result blocks within a parsed page.
    fn result_blocks<'a>(&self, page: &'a Html) -> Vec<ElementRef<'a>> {
        selector::select_all(page, self.descriptor().blocks)
    }

    /// Extracts one result item from a block. `None` drops the block:
    /// a missing link or title is a parse failure for that item, while the
    /// snippet may legitimately be empty.
    fn extract_item(&self, block: ElementRef<'_>) -> Option<ResultItem> {
        let descriptor = self.descriptor();
        let href = selector::select_one_in(block, descriptor.url)
            .and_then(|tag| selector::attribute(tag, "href"))
            .filter(|href| !href.is_empty())?;
        let link = self.fix_link(&href)?;
        let title = selector::select_one_in(block, descriptor.title).map(selector::text_of)?;
        let text = selector::select_one_in(block, descriptor.text)
            .map(selector::text_of)
            .unwrap_or_default();
        ResultItem::from_parts(title, link, text)
    }

    /// Engine-specific link fixups: wrapper-redirect peeling, tracking
    /// segment stripping. The default resolves relative links against the
    /// engine's base URL.
    fn fix_link(&self, href: &str) -> Option<String> {
        Some(absolutize(self.descriptor().base_url, href))
    }

    /// Returns the request for the subsequent page, or an ended request
    /// when the "next" control is absent or carries a terminal marker.
    fn next_page(&self, page: &Html) -> PageRequest {
        match self.descriptor().next.resolve(page) {
            Some((target, form)) => PageRequest {
                url: Some(absolutize(self.descriptor().base_url, &target)),
                form,
            },
            None => PageRequest::end(),
        }
    }

    /// True when the response is a blocking response for this engine:
    /// a blocking status, or the descriptor's ban marker present in the body.
    fn detect_ban(&self, status: u16, page: &Html) -> bool {
        if is_blocking_status(status) {
            return true;
        }
        self.descriptor()
            .ban_marker
            .is_some_and(|css| selector::select_one(page, css).is_some())
    }
}

/// Resolves an href against an engine's base URL.
pub(crate) fn absolutize(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if href.starts_with('/') {
        format!("{}{href}", base.trim_end_matches('/'))
    } else {
        format!("{}/{href}", base.trim_end_matches('/'))
    }
}
