//! Search query and search-operator handling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An engine-agnostic query modifier, prefixed into the query string
/// identically for every selected engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOperator {
    /// Restrict results to one site (`site:example.com`).
    Site(String),
    /// Require the terms in the page title (`intitle:term`).
    Intitle(String),
    /// Require the terms in the result URL (`inurl:term`).
    Inurl(String),
    /// Restrict results to a file type (`filetype:pdf`).
    Filetype(String),
    /// A raw operator string passed through unchanged.
    Raw(String),
}

impl SearchOperator {
    /// Parses the conventional `name:value` form; anything else is `Raw`.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once(':') {
            Some(("site", v)) => Self::Site(v.to_string()),
            Some(("intitle", v)) => Self::Intitle(v.to_string()),
            Some(("inurl", v)) => Self::Inurl(v.to_string()),
            Some(("filetype", v)) => Self::Filetype(v.to_string()),
            _ => Self::Raw(spec.to_string()),
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site(v) => write!(f, "site:{v}"),
            Self::Intitle(v) => write!(f, "intitle:{v}"),
            Self::Inurl(v) => write!(f, "inurl:{v}"),
            Self::Filetype(v) => write!(f, "filetype:{v}"),
            Self::Raw(v) => write!(f, "{v}"),
        }
    }
}

/// An immutable search string plus an optional search operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    terms: String,
    operator: Option<SearchOperator>,
}

impl Query {
    /// Creates a new query with the given terms.
    pub fn new(terms: impl Into<String>) -> Self {
        Self {
            terms: terms.into(),
            operator: None,
        }
    }

    /// Attaches a search operator.
    pub fn with_operator(mut self, operator: SearchOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Returns the raw search terms.
    pub fn terms(&self) -> &str {
        &self.terms
    }

    /// Returns the attached operator, if any.
    pub fn operator(&self) -> Option<&SearchOperator> {
        self.operator.as_ref()
    }

    /// The string actually dispatched to engines, operator included.
    pub fn dispatch_string(&self) -> String {
        match &self.operator {
            Some(op) => format!("{op} {}", self.terms),
            None => self.terms.clone(),
        }
    }

    /// URL-encoded form of the dispatch string.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.dispatch_string()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_new() {
        let query = Query::new("rust programming");
        assert_eq!(query.terms(), "rust programming");
        assert!(query.operator().is_none());
        assert_eq!(query.dispatch_string(), "rust programming");
    }

    #[test]
    fn test_query_with_operator() {
        let query = Query::new("async").with_operator(SearchOperator::Site("docs.rs".into()));
        assert_eq!(query.dispatch_string(), "site:docs.rs async");
    }

    #[test]
    fn test_query_encoded() {
        let query = Query::new("rust async").with_operator(SearchOperator::Site("docs.rs".into()));
        assert_eq!(query.encoded(), "site%3Adocs.rs%20rust%20async");
    }

    #[test]
    fn test_operator_parse_known() {
        assert_eq!(
            SearchOperator::parse("site:example.com"),
            SearchOperator::Site("example.com".into())
        );
        assert_eq!(
            SearchOperator::parse("filetype:pdf"),
            SearchOperator::Filetype("pdf".into())
        );
        assert_eq!(
            SearchOperator::parse("intitle:rust"),
            SearchOperator::Intitle("rust".into())
        );
        assert_eq!(
            SearchOperator::parse("inurl:blog"),
            SearchOperator::Inurl("blog".into())
        );
    }

    #[test]
    fn test_operator_parse_raw() {
        assert_eq!(
            SearchOperator::parse("before:2020"),
            SearchOperator::Raw("before:2020".into())
        );
        assert_eq!(
            SearchOperator::parse("plainword"),
            SearchOperator::Raw("plainword".into())
        );
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(SearchOperator::Site("a.com".into()).to_string(), "site:a.com");
        assert_eq!(SearchOperator::Raw("x:y".into()).to_string(), "x:y");
    }
}
