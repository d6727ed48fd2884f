//! CSS selector descriptors and lookup helpers over parsed pages.
//!
//! Engines describe their markup with static selector strings plus a typed
//! [`NextSelector`] for the pagination control. The variants form a closed
//! set resolved once at engine construction, not re-dispatched by name at
//! call time.

use scraper::{ElementRef, Html, Selector};

/// How an engine's "next page" control is identified.
#[derive(Debug, Clone)]
pub enum NextSelector {
    /// A plain CSS selector on an element carrying an `href`.
    Css(&'static str),
    /// An anchor matched by `css` whose visible text must equal `text`.
    /// Anchors carrying `excluded_class` are terminal and end pagination.
    CssWithText {
        css: &'static str,
        text: &'static str,
        excluded_class: Option<&'static str>,
    },
    /// A form matched by `css`, identified by its label text or a submit
    /// input valued `text`. Its named inputs become the POST payload.
    Form {
        css: &'static str,
        text: &'static str,
    },
}

impl NextSelector {
    /// Resolves the next-page control against a parsed page. Returns the
    /// (possibly relative) target plus an optional form payload, or `None`
    /// when pagination ends: no control, or a terminal/disabled control.
    pub fn resolve(&self, page: &Html) -> Option<(String, Option<Vec<(String, String)>>)> {
        match self {
            Self::Css(css) => {
                let tag = select_one(page, css)?;
                Some((attribute(tag, "href")?, None))
            }
            Self::CssWithText {
                css,
                text,
                excluded_class,
            } => {
                let tag = select_all(page, css).into_iter().find(|tag| {
                    text_of(*tag) == *text
                        && !excluded_class.is_some_and(|class| has_class(*tag, class))
                })?;
                Some((attribute(tag, "href")?, None))
            }
            Self::Form { css, text } => {
                let form = select_all(page, css).into_iter().find(|form| {
                    text_of(*form) == *text || has_submit_valued(*form, text)
                })?;
                Some((attribute(form, "action")?, Some(form_inputs(form))))
            }
        }
    }
}

/// All elements matching `css` in document order. An unparseable selector
/// yields nothing.
pub fn select_all<'a>(page: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => page.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// The first element matching `css`, if any.
pub fn select_one<'a>(page: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    page.select(&selector).next()
}

/// All descendants of `root` matching `css`.
pub fn select_all_in<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => root.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// The first descendant of `root` matching `css`, if any.
pub fn select_one_in<'a>(root: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    root.select(&selector).next()
}

/// A trimmed attribute value, if present.
pub fn attribute(tag: ElementRef<'_>, name: &str) -> Option<String> {
    tag.value().attr(name).map(|v| v.trim().to_string())
}

/// The element's visible text, whitespace-collapsed.
pub fn text_of(tag: ElementRef<'_>) -> String {
    tag.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name/value pairs of a form's named inputs.
pub fn form_inputs(form: ElementRef<'_>) -> Vec<(String, String)> {
    select_all_in(form, "input[name]")
        .into_iter()
        .filter_map(|input| {
            let name = attribute(input, "name")?;
            let value = attribute(input, "value").unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

fn has_class(tag: ElementRef<'_>, class: &str) -> bool {
    attribute(tag, "class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

fn has_submit_valued(form: ElementRef<'_>, value: &str) -> bool {
    select_all_in(form, "input[type=\"submit\"]")
        .into_iter()
        .any(|input| attribute(input, "value").as_deref() == Some(value))
}
