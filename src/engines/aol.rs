//! AOL search engine.

use async_trait::async_trait;

use crate::engine::{absolutize, Engine, EngineDescriptor, PageRequest};
use crate::error::{Result, SearchError};
use crate::fetch::{FetchRequest, Fetcher};
use crate::query::Query;
use crate::selector::NextSelector;

use super::yahoo;

/// Searches search.aol.com, which serves Yahoo's result markup under its
/// own host. A warm-up fetch of the homepage is needed to pick up the
/// session cookies before the first results request.
pub struct Aol {
    descriptor: EngineDescriptor,
}

impl Aol {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Aol",
                base_url: "https://search.aol.com",
                blocks: "div#web li div.dd.algo.algo-sr",
                url: "div.compTitle h3.title a",
                title: "div.compTitle h3.title",
                text: "div.compText",
                next: NextSelector::Css("a.next"),
                ban_marker: None,
            },
        }
    }
}

impl Default for Aol {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Aol {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        let home = fetcher
            .fetch(&FetchRequest::get(self.descriptor.base_url))
            .await?;
        if !home.is_success() {
            return Err(SearchError::Status(home.status));
        }
        Ok(PageRequest::get(format!(
            "{}/aol/search?q={}&ei=UTF-8&nojs=1",
            self.descriptor.base_url,
            query.encoded()
        )))
    }

    fn fix_link(&self, href: &str) -> Option<String> {
        Some(match yahoo::strip_redirect(href) {
            Some(target) => target,
            None => absolutize(self.descriptor.base_url, href),
        })
    }
}
