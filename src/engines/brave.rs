//! Brave search engine.

use async_trait::async_trait;

use crate::engine::{Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches search.brave.com. The "Next" anchor carries a `disabled` class
/// on the last page.
pub struct Brave {
    descriptor: EngineDescriptor,
}

impl Brave {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Brave",
                base_url: "https://search.brave.com",
                blocks: "div#results div[data-loc=\"main\"]",
                url: "a.result-header[href]",
                title: "a.result-header[href] span.snippet-title",
                text: "div.snippet-content",
                next: NextSelector::CssWithText {
                    css: "div#pagination a[href]",
                    text: "Next",
                    excluded_class: Some("disabled"),
                },
                ban_marker: None,
            },
        }
    }
}

impl Default for Brave {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Brave {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/search?q={}&source=web",
            self.descriptor.base_url,
            query.encoded()
        )))
    }
}
