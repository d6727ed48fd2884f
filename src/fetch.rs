//! Narrow fetch interface and its reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::{Client, Proxy};

use crate::config;
use crate::error::{Result, SearchError};

/// HTTP method of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outgoing page request.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub form: Option<Vec<(String, String)>>,
}

impl FetchRequest {
    /// A GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            form: None,
        }
    }

    /// A POST request with a form payload.
    pub fn post(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            method: Method::Post,
            form: Some(form),
        }
    }
}

/// Status and body of a fetched page.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for fetching pages.
///
/// Takes `&mut self` so implementations can track per-session state such as
/// the referer; each pagination session owns its fetcher exclusively.
#[async_trait]
pub trait Fetcher: Send {
    /// Performs the request, returning status and body. Transport failures
    /// (connect, timeout) surface as [`SearchError::Transport`].
    async fn fetch(&mut self, request: &FetchRequest) -> Result<HttpResponse>;
}

/// A fetcher backed by a reqwest client.
///
/// Carries the session's headers, proxy and timeout configuration, and sets
/// the `Referer` header to the previously fetched URL, like a browser
/// following the engine's pagination links would.
pub struct HttpFetcher {
    client: Client,
    referer: Option<String>,
}

impl HttpFetcher {
    /// Creates a fetcher with the given proxy and per-fetch timeout.
    ///
    /// A malformed proxy specification fails eagerly with
    /// [`SearchError::Config`].
    pub fn new(proxy: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(config::ACCEPT_LANGUAGE));

        let mut builder = Client::builder()
            .user_agent(config::USER_AGENT)
            .default_headers(headers)
            .timeout(timeout);

        if let Some(spec) = proxy {
            builder = builder.proxy(parse_proxy(spec)?);
        }

        Ok(Self {
            client: builder.build()?,
            referer: None,
        })
    }
}

fn parse_proxy(spec: &str) -> Result<Proxy> {
    let parsed = url::Url::parse(spec)
        .map_err(|_| SearchError::Config(format!("invalid proxy: {spec}")))?;
    if !matches!(parsed.scheme(), "http" | "https" | "socks5" | "socks5h") {
        return Err(SearchError::Config(format!(
            "unsupported proxy scheme: {}",
            parsed.scheme()
        )));
    }
    Proxy::all(spec).map_err(|_| SearchError::Config(format!("invalid proxy: {spec}")))
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&mut self, request: &FetchRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }
        if let Some(referer) = &self.referer {
            if let Ok(value) = HeaderValue::from_str(referer) {
                builder = builder.header(REFERER, value);
            }
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        self.referer = Some(request.url.clone());

        Ok(HttpResponse { status, body })
    }
}
