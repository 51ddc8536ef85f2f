//! Read-only page access
//!
//! The core only ever needs two capabilities from a loaded page: look up one
//! element by an attribute predicate, and enumerate inline script text.
//! `HtmlSnapshot` provides both over a parsed document via the scraper crate.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::SnapshotError;

/// Attribute predicate used to locate a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementQuery {
    /// `<input name="...">`
    InputNamed(&'static str),
    /// Any element carrying the attribute.
    HasAttribute(&'static str),
    /// Any element whose attribute equals the value.
    AttributeEquals(&'static str, &'static str),
}

impl ElementQuery {
    /// CSS selector equivalent of the predicate.
    pub fn to_css(&self) -> String {
        match self {
            Self::InputNamed(name) => format!(r#"input[name="{}"]"#, escape_css_value(name)),
            Self::HasAttribute(attr) => format!("[{attr}]"),
            Self::AttributeEquals(attr, value) => {
                format!(r#"[{attr}="{}"]"#, escape_css_value(value))
            }
        }
    }
}

fn escape_css_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Owned copy of one located element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementView {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
}

impl ElementView {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Form value of an input element.
    pub fn value(&self) -> Option<&str> {
        self.attr("value")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn from_element(el: ElementRef<'_>) -> Self {
        Self {
            tag: el.value().name().to_string(),
            attributes: el
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: el.text().collect::<String>().trim().to_string(),
        }
    }
}

/// A page borrowed for the duration of one extraction call.
pub trait PageSnapshot {
    /// First element matching the query in document order.
    fn find(&self, query: &ElementQuery) -> Result<Option<ElementView>, SnapshotError>;

    /// Text of every inline script, in document order.
    fn inline_scripts(&self) -> Vec<String>;
}

/// Snapshot over a parsed HTML document.
pub struct HtmlSnapshot {
    document: Html,
}

impl HtmlSnapshot {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl PageSnapshot for HtmlSnapshot {
    fn find(&self, query: &ElementQuery) -> Result<Option<ElementView>, SnapshotError> {
        let css = query.to_css();
        let selector = Selector::parse(&css).map_err(|e| SnapshotError::InvalidSelector {
            selector: css.clone(),
            reason: e.to_string(),
        })?;

        Ok(self
            .document
            .select(&selector)
            .next()
            .map(ElementView::from_element))
    }

    fn inline_scripts(&self) -> Vec<String> {
        let selector = match Selector::parse("script:not([src])") {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        self.document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .filter(|content| !content.trim().is_empty())
            .collect()
    }
}
