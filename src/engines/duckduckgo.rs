//! DuckDuckGo (html.duckduckgo.com) search engine.

use async_trait::async_trait;

use crate::engine::{absolutize, Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches the HTML-only DuckDuckGo frontend. Pagination is a POST form
/// whose submit button is labeled "Next".
pub struct DuckDuckGo {
    descriptor: EngineDescriptor,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Duckduckgo",
                base_url: "https://html.duckduckgo.com",
                blocks: "div#links div.result",
                url: "a.result__a",
                title: "a.result__a",
                text: "a.result__snippet",
                next: NextSelector::Form {
                    css: "div.nav-link form",
                    text: "Next",
                },
                ban_marker: Some("div.anomaly-modal__mask"),
            },
        }
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for DuckDuckGo {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/html/?q={}",
            self.descriptor.base_url,
            query.encoded()
        )))
    }

    /// Result links are wrapped in a `/l/?uddg=` redirect.
    fn fix_link(&self, href: &str) -> Option<String> {
        match href.split_once("uddg=") {
            Some((_, wrapped)) => {
                let encoded = wrapped.split('&').next().unwrap_or(wrapped);
                Some(urlencoding::decode(encoded).ok()?.into_owned())
            }
            None => Some(absolutize(self.descriptor.base_url, href)),
        }
    }
}
