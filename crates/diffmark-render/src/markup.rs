//! Edit script -> annotated HTML fragment.

use crate::dom::{Element, Node, nodes_to_html};
use diffmark_core::{DiffKind, DiffOp};

/// Class of the zero-width marker placed before every `<br>` produced from a newline. The
/// stylesheet draws a return arrow after it.
pub const BREAK_CLASS: &str = "break";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanRole {
    Equal,
    Inserted,
    Deleted,
}

impl From<DiffKind> for SpanRole {
    fn from(value: DiffKind) -> Self {
        match value {
            DiffKind::Equal => SpanRole::Equal,
            DiffKind::Insert => SpanRole::Inserted,
            DiffKind::Delete => SpanRole::Deleted,
        }
    }
}

/// One rendered unit of the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSpan<'a> {
    pub role: SpanRole,
    /// 1-based keyboard navigation index; `None` for [`SpanRole::Equal`].
    pub nav_index: Option<u32>,
    pub text: &'a str,
}

impl AnnotatedSpan<'_> {
    /// Only insertions can be focused and activated. Deletions stay visible but inert.
    pub fn interactive(&self) -> bool {
        self.role == SpanRole::Inserted
    }

    pub fn to_element(&self) -> Element {
        let el = match (self.role, self.nav_index) {
            (SpanRole::Inserted, Some(index)) => {
                Element::new("ins").attr("tabindex", index.to_string())
            }
            (SpanRole::Deleted, Some(index)) => Element::new("del")
                .attr("tabindex", index.to_string())
                .flag("inert"),
            (SpanRole::Inserted, None) => Element::new("ins"),
            (SpanRole::Deleted, None) => Element::new("del").flag("inert"),
            (SpanRole::Equal, _) => Element::new("span"),
        };
        el.children(text_with_breaks(self.text))
    }
}

/// Assigns roles and navigation indices. Inserts and deletes share one counter starting at 1;
/// equalities never consume an index.
pub fn annotate(ops: &[DiffOp]) -> Vec<AnnotatedSpan<'_>> {
    let mut next_index = 1u32;
    ops.iter()
        .map(|op| {
            let role = SpanRole::from(op.kind);
            let nav_index = op.kind.is_edit().then(|| {
                let index = next_index;
                next_index += 1;
                index
            });
            AnnotatedSpan {
                role,
                nav_index,
                text: &op.text,
            }
        })
        .collect()
}

fn break_marker() -> [Node; 2] {
    [
        Element::new("span").attr("class", BREAK_CLASS).into(),
        Element::new("br").into(),
    ]
}

/// Splits `text` on `\n`, replacing every newline with a visible break marker followed by a
/// structural `<br>`. HTML collapses literal newlines, so they never reach the output.
pub fn text_with_breaks(text: &str) -> Vec<Node> {
    let mut out = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.extend(break_marker());
        }
        if !line.is_empty() {
            out.push(Node::text(line));
        }
    }
    out
}

pub fn fragment_nodes(ops: &[DiffOp]) -> Vec<Node> {
    let spans = annotate(ops);
    tracing::debug!(
        spans = spans.len(),
        indexed = spans.iter().filter(|s| s.nav_index.is_some()).count(),
        "annotated diff spans"
    );
    spans.iter().map(|span| span.to_element().into()).collect()
}

/// Renders the edit script as a fragment: one element per operation, in order, with no
/// wrapping element.
pub fn render(ops: &[DiffOp]) -> String {
    nodes_to_html(&fragment_nodes(ops))
}
