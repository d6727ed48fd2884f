//! Extracted result items and the ordered, dedup-aware result collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

/// A single extracted search result.
///
/// Construction goes through [`ResultItem::from_parts`], which guarantees the
/// link is a valid absolute URL and the title is non-empty; only `text` may
/// be empty. `host` is derived from the link and is the domain dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub link: String,
    /// Result snippet text.
    pub text: String,
    /// Normalized domain of `link`.
    pub host: String,
}

impl ResultItem {
    /// Builds an item from extracted fields, or `None` when the link is not
    /// a valid absolute URL or the title is empty. Items that fail here are
    /// dropped, never stored as partial records.
    pub fn from_parts(
        title: impl Into<String>,
        link: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<Self> {
        let title: String = title.into();
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let link: String = link.into();
        let link = link.trim().to_string();
        let url = Url::parse(&link).ok()?;
        let host = host_of(&url)?;
        let text: String = text.into();
        Some(Self {
            title: title.to_string(),
            link,
            text: text.trim().to_string(),
            host,
        })
    }

    /// Returns the normalized link used as the URL dedup key
    /// (scheme stripped, trailing slash stripped, lower-cased).
    pub fn dedup_link(&self) -> String {
        self.link
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_lowercase()
    }
}

/// Returns the normalized domain of a URL: lower-cased, leading `www.`
/// stripped, port and path removed. Empty string for unparseable input.
pub fn normalize_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| host_of(&u))
        .unwrap_or_default()
}

fn host_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Ordered sequence of result items. Insertion order is discovery order
/// within one engine and merge order across engines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    items: Vec<ResultItem>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one item.
    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items have been merged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The set of normalized links already present.
    pub fn links(&self) -> HashSet<String> {
        self.items.iter().map(ResultItem::dedup_link).collect()
    }

    /// The set of hosts already present.
    pub fn hosts(&self) -> HashSet<String> {
        self.items.iter().map(|i| i.host.clone()).collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_valid() {
        let item = ResultItem::from_parts("Title", "https://example.com/page", "snippet").unwrap();
        assert_eq!(item.title, "Title");
        assert_eq!(item.link, "https://example.com/page");
        assert_eq!(item.text, "snippet");
        assert_eq!(item.host, "example.com");
    }

    #[test]
    fn test_from_parts_empty_text_allowed() {
        let item = ResultItem::from_parts("Title", "https://example.com", "").unwrap();
        assert_eq!(item.text, "");
    }

    #[test]
    fn test_from_parts_missing_title_dropped() {
        assert!(ResultItem::from_parts("", "https://example.com", "text").is_none());
        assert!(ResultItem::from_parts("   ", "https://example.com", "text").is_none());
    }

    #[test]
    fn test_from_parts_invalid_link_dropped() {
        assert!(ResultItem::from_parts("Title", "not a url", "text").is_none());
        assert!(ResultItem::from_parts("Title", "/relative/path", "text").is_none());
        assert!(ResultItem::from_parts("Title", "", "text").is_none());
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("https://www.Example.com:8080/x"), "example.com");
        assert_eq!(normalize_host("http://sub.example.org/a/b?c=d"), "sub.example.org");
        assert_eq!(normalize_host("https://www.wikipedia.org"), "wikipedia.org");
        assert_eq!(normalize_host("garbage"), "");
    }

    #[test]
    fn test_dedup_link() {
        let a = ResultItem::from_parts("t", "https://Example.com/Page/", "").unwrap();
        let b = ResultItem::from_parts("t", "http://example.com/page", "").unwrap();
        assert_eq!(a.dedup_link(), b.dedup_link());
    }

    #[test]
    fn test_result_set_order_preserved() {
        let mut set = ResultSet::new();
        set.push(ResultItem::from_parts("first", "https://a.com/1", "").unwrap());
        set.push(ResultItem::from_parts("second", "https://b.com/2", "").unwrap());
        assert_eq!(set.len(), 2);
        assert_eq!(set.items()[0].title, "first");
        assert_eq!(set.items()[1].title, "second");
    }

    #[test]
    fn test_result_set_key_views() {
        let mut set = ResultSet::new();
        set.push(ResultItem::from_parts("a", "https://A.com/X/", "").unwrap());
        set.push(ResultItem::from_parts("b", "https://www.a.com/y", "").unwrap());
        assert!(set.links().contains("a.com/x"));
        assert!(set.links().contains("www.a.com/y"));
        assert_eq!(set.hosts().len(), 1, "www is stripped from the host key");
        assert!(set.hosts().contains("a.com"));
    }

    #[test]
    fn test_result_item_serialization() {
        let item = ResultItem::from_parts("Title", "https://example.com", "text").unwrap();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"link\":\"https://example.com\""));
        assert!(json.contains("\"host\":\"example.com\""));
    }
}
