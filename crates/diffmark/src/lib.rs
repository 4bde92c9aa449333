#![forbid(unsafe_code)]

//! `diffmark` turns a pair of text documents into a self-contained HTML review page.
//!
//! # Features
//!
//! - `render`: enable HTML rendering (`diffmark::render`)

pub use diffmark_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use diffmark_render::dom::{Element, Node};
    pub use diffmark_render::{
        AnnotatedSpan, DocumentOptions, FragmentSource, SpanRole, annotate, post_process,
        render_document,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Diff(#[from] diffmark_core::Error),
        #[error(transparent)]
        Render(#[from] diffmark_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Review page title for two file names: `'<original>'→'<revised>'`.
    pub fn comparison_title(original_name: &str, revised_name: &str) -> String {
        format!("'{original_name}'\u{2192}'{revised_name}'")
    }

    /// Diffs `original` against `revised` and renders the full document.
    pub fn render_diff_html_sync(
        engine: &diffmark_core::Engine,
        title: &str,
        original: &str,
        revised: &str,
        document: &DocumentOptions,
    ) -> Result<String> {
        let ops = engine.diff(original, revised)?;
        Ok(render_document(
            title,
            &FragmentSource::FromOperations(ops),
            document,
        )?)
    }

    /// Wraps markup from an external `<ins>`/`<del>` renderer and normalizes it.
    pub fn render_prerendered_html_sync(
        title: &str,
        fragment: &str,
        document: &DocumentOptions,
    ) -> Result<String> {
        Ok(render_document(
            title,
            &FragmentSource::FromPrerendered(fragment.to_string()),
            document,
        )?)
    }

    /// Bundles an [`Engine`](diffmark_core::Engine) with document options.
    ///
    /// All work is CPU-bound and performs no I/O.
    #[derive(Debug, Clone)]
    pub struct HeadlessRenderer {
        pub engine: diffmark_core::Engine,
        pub document: DocumentOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                engine: diffmark_core::Engine::new(),
                document: DocumentOptions::default(),
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Merges `site_config` over the defaults and re-reads the document options from it.
        pub fn with_site_config(
            mut self,
            site_config: diffmark_core::DiffmarkConfig,
        ) -> Result<Self> {
            self.engine = self.engine.with_site_config(site_config);
            self.document = DocumentOptions::from_config(self.engine.site_config())?;
            // Surface diff option errors here rather than on the first render.
            self.engine.diff_options()?;
            Ok(self)
        }

        pub fn diff(&self, original: &str, revised: &str) -> Result<Vec<diffmark_core::DiffOp>> {
            Ok(self.engine.diff(original, revised)?)
        }

        pub fn render_diff_html_sync(
            &self,
            title: &str,
            original: &str,
            revised: &str,
        ) -> Result<String> {
            render_diff_html_sync(&self.engine, title, original, revised, &self.document)
        }

        pub fn render_prerendered_html_sync(&self, title: &str, fragment: &str) -> Result<String> {
            render_prerendered_html_sync(title, fragment, &self.document)
        }
    }
}
