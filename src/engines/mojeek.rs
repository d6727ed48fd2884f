//! Mojeek search engine.

use async_trait::async_trait;

use crate::engine::{Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches mojeek.com. The pagination bar labels its links by text only.
pub struct Mojeek {
    descriptor: EngineDescriptor,
}

impl Mojeek {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Mojeek",
                base_url: "https://www.mojeek.com",
                blocks: "ul.results-standard > li",
                url: "a.ob[href]",
                title: "a.ob[href]",
                text: "p.s",
                next: NextSelector::CssWithText {
                    css: "div.pagination li a[href]",
                    text: "Next",
                    excluded_class: None,
                },
                ban_marker: None,
            },
        }
    }
}

impl Default for Mojeek {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Mojeek {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/search?q={}",
            self.descriptor.base_url,
            query.encoded()
        )))
    }
}
