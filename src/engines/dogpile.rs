//! Dogpile search engine.

use async_trait::async_trait;

use crate::engine::{Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches dogpile.com. The snippet is the last span of each result block.
pub struct Dogpile {
    descriptor: EngineDescriptor,
}

impl Dogpile {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Dogpile",
                base_url: "https://www.dogpile.com",
                blocks: "div[class^=\"web-\"] div[class$=\"__result\"]",
                url: "a[class$=\"title\"]",
                title: "a[class$=\"title\"]",
                text: "span:last-of-type",
                next: NextSelector::Css("a.pagination__num--next"),
                ban_marker: None,
            },
        }
    }
}

impl Default for Dogpile {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Dogpile {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/serp?q={}",
            self.descriptor.base_url,
            query.encoded()
        )))
    }
}
