//! Character-level edit scripts.
//!
//! The raw diff comes from `similar`; two cleanup passes then shape it for human review:
//! - [`cleanup::cleanup_merge`] groups every run of edits between two equalities into one
//!   deletion followed by one insertion, factoring shared prefixes/suffixes back out.
//! - [`cleanup::cleanup_semantic_lossless`] slides single edits sideways so they start and end
//!   on word, line or paragraph boundaries where possible.

pub mod cleanup;

use crate::config::DiffmarkConfig;
use crate::model::{DiffKind, DiffOp};
use crate::{Error, Result};
use similar::{ChangeTag, TextDiff};
use std::time::Duration;

pub use cleanup::{cleanup_merge, cleanup_semantic_lossless};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
}

impl DiffAlgorithm {
    fn parse(key: &str, value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "myers" => Ok(Self::Myers),
            "patience" => Ok(Self::Patience),
            other => Err(Error::InvalidConfig {
                key: key.to_string(),
                message: format!("unknown diff algorithm `{other}` (expected myers|patience)"),
            }),
        }
    }
}

impl From<DiffAlgorithm> for similar::Algorithm {
    fn from(value: DiffAlgorithm) -> Self {
        match value {
            DiffAlgorithm::Myers => similar::Algorithm::Myers,
            DiffAlgorithm::Patience => similar::Algorithm::Patience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffCleanup {
    /// Only the merge pass runs.
    None,
    #[default]
    SemanticLossless,
}

impl DiffCleanup {
    fn parse(key: &str, value: &str) -> Result<Self> {
        match value.trim() {
            "none" => Ok(Self::None),
            "semanticLossless" | "semantic-lossless" => Ok(Self::SemanticLossless),
            other => Err(Error::InvalidConfig {
                key: key.to_string(),
                message: format!("unknown cleanup `{other}` (expected none|semanticLossless)"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    pub algorithm: DiffAlgorithm,
    pub cleanup: DiffCleanup,
    /// Deadline for the diff algorithm. `None` runs to completion (minimal script).
    pub timeout: Option<Duration>,
}

impl DiffOptions {
    pub fn from_config(config: &DiffmarkConfig) -> Result<Self> {
        let mut options = Self::default();
        if let Some(v) = config.require_str("diff.algorithm")? {
            options.algorithm = DiffAlgorithm::parse("diff.algorithm", v)?;
        }
        if let Some(v) = config.require_str("diff.cleanup")? {
            options.cleanup = DiffCleanup::parse("diff.cleanup", v)?;
        }
        match config.get("diff.timeoutMs") {
            None | Some(serde_json::Value::Null) => {}
            Some(v) => {
                let Some(ms) = v.as_u64() else {
                    return Err(Error::InvalidConfig {
                        key: "diff.timeoutMs".to_string(),
                        message: format!("expected a non-negative integer, got {v}"),
                    });
                };
                options.timeout = (ms > 0).then(|| Duration::from_millis(ms));
            }
        }
        Ok(options)
    }
}

/// Computes the character-level edit script turning `original` into `revised`.
pub fn compute_diff(original: &str, revised: &str, options: &DiffOptions) -> Vec<DiffOp> {
    let mut config = TextDiff::configure();
    config.algorithm(options.algorithm.into());
    if let Some(timeout) = options.timeout {
        config.timeout(timeout);
    }
    let diff = config.diff_chars(original, revised);

    let mut raw: Vec<DiffOp> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => DiffKind::Equal,
            ChangeTag::Insert => DiffKind::Insert,
            ChangeTag::Delete => DiffKind::Delete,
        };
        match raw.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => raw.push(DiffOp::new(kind, change.value())),
        }
    }

    let mut ops = cleanup_merge(raw);
    if options.cleanup == DiffCleanup::SemanticLossless {
        cleanup_semantic_lossless(&mut ops);
    }

    tracing::debug!(
        original_len = original.len(),
        revised_len = revised.len(),
        ops = ops.len(),
        edits = ops.iter().filter(|op| op.kind.is_edit()).count(),
        "computed diff"
    );
    ops
}
