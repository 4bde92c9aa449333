#![forbid(unsafe_code)]

//! Character diff engine + edit-script model for diffmark (headless).
//!
//! Design goals:
//! - the edit script always reconstructs both inputs (`Equal`+`Delete` / `Equal`+`Insert`)
//! - human-readable change boundaries (merge + semantic-lossless cleanup)
//! - deterministic, synchronous APIs (no I/O, no executor)

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod text;

pub use config::DiffmarkConfig;
pub use diff::{DiffAlgorithm, DiffCleanup, DiffOptions, compute_diff};
pub use error::{Error, Result};
pub use model::{DiffKind, DiffOp, original_text, revised_text};

#[derive(Debug, Clone)]
pub struct Engine {
    site_config: DiffmarkConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            site_config: config::default_site_config(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site_config(mut self, site_config: DiffmarkConfig) -> Self {
        // Merge overrides onto the defaults so unrelated keys keep working.
        self.site_config.deep_merge(site_config.as_value());
        self
    }

    pub fn site_config(&self) -> &DiffmarkConfig {
        &self.site_config
    }

    pub fn diff_options(&self) -> Result<DiffOptions> {
        DiffOptions::from_config(&self.site_config)
    }

    /// Computes the edit script between two raw documents.
    ///
    /// Line endings are normalized to `\n` on both sides before diffing, so `\r\n` vs `\n`
    /// differences never show up as edits.
    pub fn diff(&self, original: &str, revised: &str) -> Result<Vec<DiffOp>> {
        let options = self.diff_options()?;
        let original = text::normalize_line_endings(original);
        let revised = text::normalize_line_endings(revised);
        Ok(compute_diff(&original, &revised, &options))
    }
}

#[cfg(test)]
mod tests;
