//! Google search engine.

use async_trait::async_trait;
use scraper::Html;

use crate::engine::{absolutize, Engine, EngineDescriptor, PageRequest};
use crate::error::{Result, SearchError};
use crate::fetch::{FetchRequest, Fetcher};
use crate::query::Query;
use crate::selector::{self, NextSelector};

/// Searches google.com through the no-JavaScript frontend.
///
/// The plain `/search` URL usually answers with a shell page containing a
/// hidden form pointing at the nojs results; the first page is therefore an
/// auxiliary fetch to discover that form before issuing the real request.
pub struct Google {
    descriptor: EngineDescriptor,
}

impl Google {
    pub fn new() -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "Google",
                base_url: "https://www.google.com",
                blocks: "div#main > div",
                url: "a[href]",
                title: "a h3",
                text: "div",
                next: NextSelector::Css("footer a[href][aria-label=\"Next page\"]"),
                ban_marker: None,
            },
        }
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for Google {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn first_page(&self, fetcher: &mut dyn Fetcher, query: &Query) -> Result<PageRequest> {
        let url = format!("{}/search?q={}", self.descriptor.base_url, query.encoded());
        let shell = fetcher.fetch(&FetchRequest::get(url.clone())).await?;
        if !shell.is_success() {
            return Err(SearchError::Status(shell.status));
        }

        match nojs_form_query(&shell.body, &query.encoded()) {
            Some(params) => Ok(PageRequest::get(format!(
                "{}/search?{params}",
                self.descriptor.base_url
            ))),
            // Some clients get the results directly; re-request the same URL
            // so the session parses it.
            None => Ok(PageRequest::get(url)),
        }
    }

    /// Result links come wrapped as `/url?q=<target>&sa=...`.
    fn fix_link(&self, href: &str) -> Option<String> {
        match href.strip_prefix("/url?q=") {
            Some(wrapped) => {
                let target = wrapped.split("&sa=").next().unwrap_or(wrapped);
                Some(urlencoding::decode(target).ok()?.into_owned())
            }
            None => Some(absolutize(self.descriptor.base_url, href)),
        }
    }
}

/// Rebuilds the search query string from the shell page's form inputs,
/// replacing the `q` field. `None` when the page carries no such form.
fn nojs_form_query(body: &str, encoded_query: &str) -> Option<String> {
    let page = Html::parse_document(body);
    let inputs = selector::select_all(&page, "form[action=\"/search\"] input[name]");
    if inputs.is_empty() {
        return None;
    }
    let params: Vec<String> = inputs
        .into_iter()
        .filter_map(|input| {
            let name = selector::attribute(input, "name")?;
            if name == "btnI" {
                return None;
            }
            let value = if name == "q" {
                encoded_query.to_string()
            } else {
                selector::attribute(input, "value").unwrap_or_default()
            };
            Some(format!("{name}={value}"))
        })
        .collect();
    Some(params.join("&"))
}
