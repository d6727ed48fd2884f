//! Yahoo search engine.

use async_trait::async_trait;

use crate::engine::{absolutize, Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches search.yahoo.com (nojs frontend). Result links are wrapped in
/// an `r.search.yahoo.com` redirect carrying the target after `/RU=`.
pub struct Yahoo {
    descriptor: EngineDescriptor,
}

impl Yahoo {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Yahoo",
                base_url: "https://search.yahoo.com",
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

impl Default for Yahoo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Yahoo {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/search?p={}&ei=UTF-8&nojs=1",
            self.descriptor.base_url,
            query.encoded()
        )))
    }

    fn fix_link(&self, href: &str) -> Option<String> {
        Some(match strip_redirect(href) {
            Some(target) => target,
            None => absolutize(self.descriptor.base_url, href),
        })
    }
}

/// Peels the `/RU=<target>/RK=...` redirect wrapper off a Yahoo result link.
pub(super) fn strip_redirect(href: &str) -> Option<String> {
    let (_, rest) = href.split_once("/RU=")?;
    let end = rest.find("/R").unwrap_or(rest.len());
    urlencoding::decode(&rest[..end]).ok().map(|s| s.into_owned())
}
