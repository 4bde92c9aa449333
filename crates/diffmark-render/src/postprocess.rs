//! Normalization of documents whose fragment came from an external renderer.
//!
//! The markup passes run in the fixed order of [`POST_PROCESS_PASSES`]; placeholder
//! normalization works on the final string and always runs last.

use crate::{Error, Result};
use lol_html::{RewriteStrSettings, element, rewrite_str};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::cell::Cell;
use std::sync::OnceLock;

/// Newline placeholder emitted by diff-match-patch style pretty printers.
pub const PILCROW: &str = "\u{B6}";
/// Glyph that replaces [`PILCROW`] in the final document.
pub const RETURN_ARROW: &str = "\u{21B5}";

#[derive(Debug, Clone, Copy)]
pub struct PostProcessPass {
    pub name: &'static str,
    pub run: fn(&str) -> Result<String>,
}

pub const POST_PROCESS_PASSES: [PostProcessPass; 3] = [
    PostProcessPass {
        name: "strip-inline-style",
        run: strip_inline_style,
    },
    PostProcessPass {
        name: "assign-nav-index",
        run: assign_nav_index,
    },
    PostProcessPass {
        name: "mark-deleted-inert",
        run: mark_deleted_inert,
    },
];

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"{}|&para;|&#0*182;|&#[xX]0*[bB]6;", regex::escape(PILCROW));
        Regex::new(&pattern).expect("valid regex")
    })
}

fn rewrite_error(pass: &'static str, err: impl std::fmt::Display) -> Error {
    Error::Rewrite {
        pass,
        message: err.to_string(),
    }
}

/// Removes inline `style` attributes from every `ins` and `del`. Idempotent.
pub fn strip_inline_style(document: &str) -> Result<String> {
    rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("ins[style]", |el| {
                    el.remove_attribute("style");
                    Ok(())
                }),
                element!("del[style]", |el| {
                    el.remove_attribute("style");
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| rewrite_error("strip-inline-style", err))
}

fn take_index(next: &Cell<u32>) -> String {
    let index = next.get();
    next.set(index + 1);
    index.to_string()
}

/// Sets `tabindex` to 1..=k on every `ins`/`del` in document order, replacing existing values.
pub fn assign_nav_index(document: &str) -> Result<String> {
    let next = Cell::new(1u32);
    rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("ins", |el| {
                    el.set_attribute("tabindex", &take_index(&next))?;
                    Ok(())
                }),
                element!("del", |el| {
                    el.set_attribute("tabindex", &take_index(&next))?;
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| rewrite_error("assign-nav-index", err))
}

/// Marks every `del` inert. `ins` elements are left interactive.
pub fn mark_deleted_inert(document: &str) -> Result<String> {
    rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![element!("del", |el| {
                el.set_attribute("inert", "")?;
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| rewrite_error("mark-deleted-inert", err))
}

/// Replaces each pilcrow placeholder, raw or as a character reference, with [`RETURN_ARROW`].
pub fn normalize_placeholders(document: &str) -> Cow<'_, str> {
    placeholder_regex().replace_all(document, NoExpand(RETURN_ARROW))
}

/// Runs every markup pass in order, then placeholder normalization.
pub fn post_process(document: &str) -> Result<String> {
    let mut out = document.to_string();
    for pass in POST_PROCESS_PASSES {
        out = (pass.run)(&out)?;
        tracing::trace!(pass = pass.name, bytes = out.len(), "post-process pass");
    }
    Ok(normalize_placeholders(&out).into_owned())
}
