//! Wraps a diff fragment into a complete, self-contained HTML document.

use crate::dom::{Element, Node};
use crate::favicon::favicon_data_uri;
use crate::stylesheet::stylesheet;
use diffmark_core::{DiffmarkConfig, Error as CoreError};

pub const DOCTYPE: &str = "<!DOCTYPE html>";

const VIEWPORT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, minimum-scale=1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    pub lang: String,
    pub favicon_glyph: String,
    pub container_id: String,
    pub width: String,
    pub font_family: String,
    pub font_size: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            lang: "ja".to_string(),
            favicon_glyph: "\u{1F4DD}".to_string(),
            container_id: "diff-container".to_string(),
            width: "600px".to_string(),
            font_family: "\"HackGen\"".to_string(),
            font_size: "16px".to_string(),
        }
    }
}

impl DocumentOptions {
    /// Reads the `document.*` keys. Missing keys keep their defaults.
    pub fn from_config(config: &DiffmarkConfig) -> Result<Self, CoreError> {
        let mut options = Self::default();
        if let Some(v) = config.require_str("document.lang")? {
            options.lang = v.to_string();
        }
        if let Some(v) = config.require_str("document.faviconGlyph")? {
            if v.is_empty() {
                return Err(CoreError::InvalidConfig {
                    key: "document.faviconGlyph".to_string(),
                    message: "glyph must not be empty".to_string(),
                });
            }
            options.favicon_glyph = v.to_string();
        }
        if let Some(v) = config.require_str("document.containerId")? {
            let plain = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
            if v.is_empty() || !v.chars().all(plain) {
                return Err(CoreError::InvalidConfig {
                    key: "document.containerId".to_string(),
                    message: format!("`{v}` is not a plain identifier"),
                });
            }
            options.container_id = v.to_string();
        }
        for (key, slot) in [
            ("document.width", &mut options.width),
            ("document.fontFamily", &mut options.font_family),
            ("document.fontSize", &mut options.font_size),
        ] {
            if let Some(v) = config.require_str(key)? {
                *slot = css_value(key, v)?;
            }
        }
        Ok(options)
    }
}

/// CSS values are embedded verbatim in the stylesheet.
fn css_value(key: &str, value: &str) -> Result<String, CoreError> {
    if let Some(bad) = value.chars().find(|c| matches!(c, '<' | '>' | '{' | '}' | ';')) {
        return Err(CoreError::InvalidConfig {
            key: key.to_string(),
            message: format!("character `{bad}` is not allowed in a CSS value"),
        });
    }
    Ok(value.trim().to_string())
}

fn build_head(title: &str, options: &DocumentOptions) -> Element {
    Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", VIEWPORT),
        )
        .child(
            Element::new("link")
                .attr("rel", "icon")
                .attr("href", favicon_data_uri(&options.favicon_glyph)),
        )
        .child(Element::new("title").text(title))
        .child(Element::new("style").child(Node::raw(stylesheet(options))))
}

/// Builds the `<html>` element. `fragment` becomes the content of the container after the
/// `<h1>` heading.
pub fn build_document(title: &str, fragment: Vec<Node>, options: &DocumentOptions) -> Element {
    let container = Element::new("div")
        .attr("id", options.container_id.clone())
        .child(Element::new("h1").text(title))
        .children(fragment);

    Element::new("html")
        .attr("lang", options.lang.clone())
        .child(build_head(title, options))
        .child(Element::new("body").child(container))
}

/// Serializes the full document, doctype first.
pub fn assemble(title: &str, fragment: Vec<Node>, options: &DocumentOptions) -> String {
    let root = build_document(title, fragment, options);
    let mut out = String::from(DOCTYPE);
    root.write_html(&mut out);
    tracing::debug!(bytes = out.len(), "assembled document");
    out
}

/// Like [`assemble`], for a fragment that is already serialized markup.
pub fn assemble_markup(title: &str, fragment: &str, options: &DocumentOptions) -> String {
    assemble(title, vec![Node::raw(fragment)], options)
}
