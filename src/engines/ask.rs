//! Ask search engine.

use async_trait::async_trait;

use crate::engine::{Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches uk.ask.com.
pub struct Ask {
    descriptor: EngineDescriptor,
}

impl Ask {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Ask",
                base_url: "https://uk.ask.com",
                blocks: "div.PartialSearchResults-body div.PartialSearchResults-item",
                url: "a.PartialSearchResults-item-title-link.result-link",
                title: "a.PartialSearchResults-item-title-link.result-link",
                text: "p.PartialSearchResults-item-abstract",
                next: NextSelector::Css("li.PartialWebPagination-next a[href]"),
                ban_marker: None,
            },
        }
    }
}

impl Default for Ask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Ask {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/web?o=0&l=dir&qo=serpSearchTopBox&q={}",
            self.descriptor.base_url,
            query.encoded()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_parses_result_markup() {
        let engine = Ask::new();
        let page = Html::parse_document(
            r#"<div class="PartialSearchResults-body">
                 <div class="PartialSearchResults-item">
                   <a class="PartialSearchResults-item-title-link result-link"
                      href="https://example.com/answer">An answer</a>
                   <p class="PartialSearchResults-item-abstract">Abstract.</p>
                 </div>
               </div>"#,
        );
        let blocks = engine.result_blocks(&page);
        assert_eq!(blocks.len(), 1);
        let item = engine.extract_item(blocks[0]).unwrap();
        assert_eq!(item.title, "An answer");
        assert_eq!(item.text, "Abstract.");
    }

    #[test]
    fn test_next_page_link() {
        let engine = Ask::new();
        let page = Html::parse_document(
            r#"<ul><li class="PartialWebPagination-next">
                 <a href="/web?o=0&q=rust&page=2">Next</a>
               </li></ul>"#,
        );
        let next = engine.next_page(&page);
        assert_eq!(
            next.url.as_deref(),
            Some("https://uk.ask.com/web?o=0&q=rust&page=2")
        );
    }
}
