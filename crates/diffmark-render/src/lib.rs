#![forbid(unsafe_code)]

//! HTML rendering for diffmark edit scripts.
//!
//! Pipeline:
//! - [`markup`] turns `DiffOp`s into `<span>`/`<ins>`/`<del>` nodes with shared navigation
//!   indices and inert deletions
//! - [`document`] wraps the fragment into a standalone document (metadata, favicon, stylesheet)
//! - [`postprocess`] brings externally rendered `<ins>`/`<del>` markup to the same shape

pub mod document;
pub mod dom;
pub mod favicon;
pub mod markup;
pub mod postprocess;
pub mod stylesheet;

mod timing;

use crate::timing::{RenderTimer, Stage};
use diffmark_core::DiffOp;

pub use document::{DocumentOptions, assemble, assemble_markup, build_document};
pub use markup::{AnnotatedSpan, SpanRole, annotate, render};
pub use postprocess::{POST_PROCESS_PASSES, normalize_placeholders, post_process};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("markup rewrite failed in pass `{pass}`: {message}")]
    Rewrite { pass: &'static str, message: String },
    #[error(transparent)]
    Config(#[from] diffmark_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where the diff fragment of a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentSource {
    /// An edit script, rendered by [`markup`].
    FromOperations(Vec<DiffOp>),
    /// Markup from an external renderer. The assembled document is normalized by
    /// [`post_process`].
    FromPrerendered(String),
}

/// Renders a complete document for `source`.
///
/// The operations path cannot fail; only the rewrite passes of the pre-rendered path can.
pub fn render_document(
    title: &str,
    source: &FragmentSource,
    options: &DocumentOptions,
) -> Result<String> {
    let mut timer = RenderTimer::from_env();

    let out = match source {
        FragmentSource::FromOperations(ops) => {
            let fragment = timer.time(Stage::Fragment, || markup::fragment_nodes(ops));
            timer.time(Stage::Assemble, || assemble(title, fragment, options))
        }
        FragmentSource::FromPrerendered(fragment) => {
            let out = timer.time(Stage::Assemble, || {
                assemble_markup(title, fragment, options)
            });
            timer.time(Stage::PostProcess, || post_process(&out))?
        }
    };

    timer.finish(out.len());
    Ok(out)
}
