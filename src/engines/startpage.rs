//! Startpage search engine.

use async_trait::async_trait;
use scraper::Html;

use crate::engine::{Engine, EngineDescriptor, PageRequest};
use crate::error::{Result, SearchError};
use crate::fetch::{FetchRequest, Fetcher};
use crate::query::Query;
use crate::selector::{self, NextSelector};

/// Searches startpage.com. The first page requires discovering the hidden
/// search form on the homepage; pagination is form-based; a block page is
/// served as a feedback form with a 200 status.
pub struct Startpage {
    descriptor: EngineDescriptor,
}

impl Startpage {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Startpage",
                base_url: "https://www.startpage.com",
                blocks: "section.w-gl div.w-gl__result",
                url: "a.w-gl__result-url",
                title: "a.w-gl__result-title h3",
                text: "p.w-gl__description",
                next: NextSelector::Form {
                    css: "form.pagination__form",
                    text: "Next",
                },
                ban_marker: Some("form#blocked_feedback_form"),
            },
        }
    }
}

impl Default for Startpage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Startpage {
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

        let mut form = search_form_inputs(&home.body);
        if form.is_empty() {
            return Err(SearchError::Parse("startpage search form not found".into()));
        }
        form.retain(|(name, _)| name != "query");
        form.push(("query".to_string(), query.dispatch_string()));

        Ok(PageRequest::post(
            format!("{}/sp/search", self.descriptor.base_url),
            form,
        ))
    }
}

fn search_form_inputs(body: &str) -> Vec<(String, String)> {
    let page = Html::parse_document(body);
    selector::select_all(&page, "form#search input[name]")
        .into_iter()
        .filter_map(|input| {
            let name = selector::attribute(input, "name")?;
            let value = selector::attribute(input, "value").unwrap_or_default();
            Some((name, value))
        })
        .collect()
}
