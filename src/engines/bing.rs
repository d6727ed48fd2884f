//! Bing search engine.

use async_trait::async_trait;

use crate::engine::{Engine, EngineDescriptor, PageRequest};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::query::Query;
use crate::selector::NextSelector;

/// Searches bing.com.
pub struct Bing {
    descriptor: EngineDescriptor,
}

impl Bing {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Bing",
                base_url: "https://www.bing.com",
                blocks: "ol#b_results > li.b_algo",
                url: "h2 a[href]",
                title: "h2",
                text: "p",
                next: NextSelector::Css("div#b_content nav[role=\"navigation\"] a.sb_pagN"),
                ban_marker: None,
            },
        }
    }
}

impl Default for Bing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Bing {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, _fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        Ok(PageRequest::get(format!(
            "{}/search?q={}&search=&form=QBLH",
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
        let engine = Bing::new();
        let page = Html::parse_document(
            r#"<ol id="b_results">
                 <li class="b_algo">
                   <h2><a href="https://example.com/doc">Doc title</a></h2>
                   <p>Doc snippet.</p>
                 </li>
                 <li class="b_ad">ignored</li>
               </ol>"#,
        );
        let blocks = engine.result_blocks(&page);
        assert_eq!(blocks.len(), 1);
        let item = engine.extract_item(blocks[0]).unwrap();
        assert_eq!(item.link, "https://example.com/doc");
        assert_eq!(item.title, "Doc title");
    }

    #[test]
    fn test_next_page_link() {
        let engine = Bing::new();
        let page = Html::parse_document(
            r#"<div id="b_content"><nav role="navigation">
                 <a class="sb_pagN" href="/search?q=rust&first=11">Next</a>
               </nav></div>"#,
        );
        let next = engine.next_page(&page);
        assert_eq!(
            next.url.as_deref(),
            Some("https://www.bing.com/search?q=rust&first=11")
        );
    }
}
