use crate::model::{DiffKind, DiffOp};
use regex::Regex;
use std::sync::OnceLock;

fn blank_line_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\r?\n\z").expect("valid regex"))
}

fn blank_line_start_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A\r?\n\r?\n").expect("valid regex"))
}

/// Byte length of the shared prefix (always on a char boundary of both strings).
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Byte length of the shared suffix (always on a char boundary of both strings).
fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

fn push_equal(out: &mut Vec<DiffOp>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.kind == DiffKind::Equal => last.text.push_str(text),
        _ => out.push(DiffOp::equal(text)),
    }
}

/// Emits the buffered edits and returns the common suffix that belongs to the next equality.
fn flush_edits(out: &mut Vec<DiffOp>, deleted: &mut String, inserted: &mut String) -> String {
    let mut carried = String::new();
    if !deleted.is_empty() && !inserted.is_empty() {
        let prefix = common_prefix_len(deleted, inserted);
        if prefix > 0 {
            push_equal(out, &inserted[..prefix]);
            deleted.drain(..prefix);
            inserted.drain(..prefix);
        }
        let suffix = common_suffix_len(deleted, inserted);
        if suffix > 0 {
            carried = inserted[inserted.len() - suffix..].to_string();
            deleted.truncate(deleted.len() - suffix);
            inserted.truncate(inserted.len() - suffix);
        }
    }
    if !deleted.is_empty() {
        out.push(DiffOp::delete(std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        out.push(DiffOp::insert(std::mem::take(inserted)));
    }
    carried
}

/// Normalizes an edit script: adjacent equalities are joined, every run of edits between two
/// equalities becomes at most one `Delete` followed by one `Insert`, shared prefixes and
/// suffixes of such pairs move into the neighbouring equalities, and empty spans are dropped.
///
/// Afterwards, single edits that are surrounded by equalities are shifted sideways when that
/// eliminates one of the equalities (`A<ins>BA</ins>C` -> `<ins>AB</ins>AC`).
pub fn cleanup_merge(ops: Vec<DiffOp>) -> Vec<DiffOp> {
    let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    for op in ops {
        match op.kind {
            DiffKind::Delete => deleted.push_str(&op.text),
            DiffKind::Insert => inserted.push_str(&op.text),
            DiffKind::Equal => {
                let carried = flush_edits(&mut out, &mut deleted, &mut inserted);
                push_equal(&mut out, &carried);
                push_equal(&mut out, &op.text);
            }
        }
    }
    let carried = flush_edits(&mut out, &mut deleted, &mut inserted);
    push_equal(&mut out, &carried);

    if shift_single_edits(&mut out) {
        return cleanup_merge(out);
    }
    out
}

fn shift_single_edits(ops: &mut Vec<DiffOp>) -> bool {
    let mut changed = false;
    let mut i = 1;
    while i + 1 < ops.len() {
        let surrounded = ops[i - 1].kind == DiffKind::Equal
            && ops[i + 1].kind == DiffKind::Equal
            && ops[i].kind.is_edit();
        if !surrounded {
            i += 1;
            continue;
        }

        let prev = ops[i - 1].text.clone();
        let next = ops[i + 1].text.clone();
        if ops[i].text.ends_with(prev.as_str()) {
            // Shift the edit over the previous equality.
            let keep = ops[i].text.len() - prev.len();
            ops[i].text = format!("{prev}{}", &ops[i].text[..keep]);
            ops[i + 1].text = format!("{prev}{next}");
            ops.remove(i - 1);
            changed = true;
        } else if ops[i].text.starts_with(next.as_str()) {
            // Shift the edit over the next equality.
            ops[i - 1].text.push_str(&next);
            ops[i].text = format!("{}{next}", &ops[i].text[next.len()..]);
            ops.remove(i + 1);
            changed = true;
        }
        i += 1;
    }
    changed
}

/// Scores how well the boundary between `one` and `two` sits on a logical break.
///
/// 6 = one side empty, 5 = blank line, 4 = line break, 3 = end of sentence,
/// 2 = whitespace, 1 = non-alphanumeric, 0 = inside a word.
fn boundary_score(one: &str, two: &str) -> u8 {
    let (Some(char1), Some(char2)) = (one.chars().next_back(), two.chars().next()) else {
        return 6;
    };

    let non_alnum1 = !char1.is_ascii_alphanumeric();
    let non_alnum2 = !char2.is_ascii_alphanumeric();
    let whitespace1 = non_alnum1 && char1.is_whitespace();
    let whitespace2 = non_alnum2 && char2.is_whitespace();
    let line_break1 = whitespace1 && matches!(char1, '\r' | '\n');
    let line_break2 = whitespace2 && matches!(char2, '\r' | '\n');
    let blank_line1 = line_break1 && blank_line_end_regex().is_match(one);
    let blank_line2 = line_break2 && blank_line_start_regex().is_match(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alnum1 && !whitespace1 && whitespace2 {
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

/// Slides every single edit that sits between two equalities to the most readable boundary,
/// e.g. `The c<ins>at c</ins>ame.` -> `The <ins>cat </ins>came.`
///
/// Both reconstructed documents are unchanged by this pass.
pub fn cleanup_semantic_lossless(ops: &mut Vec<DiffOp>) {
    let mut i = 1;
    while i + 1 < ops.len() {
        let surrounded = ops[i - 1].kind == DiffKind::Equal
            && ops[i + 1].kind == DiffKind::Equal
            && ops[i].kind.is_edit();
        if !surrounded {
            i += 1;
            continue;
        }

        let mut equality1 = ops[i - 1].text.clone();
        let mut edit = ops[i].text.clone();
        let mut equality2 = ops[i + 1].text.clone();

        // First, shift the edit as far left as possible.
        let common = common_suffix_len(&equality1, &edit);
        if common > 0 {
            let shared = edit[edit.len() - common..].to_string();
            equality1.truncate(equality1.len() - common);
            edit = format!("{shared}{}", &edit[..edit.len() - common]);
            equality2 = format!("{shared}{equality2}");
        }

        // Then step right one character at a time, keeping the best-scoring split.
        let mut best_score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
        let mut best = (equality1.clone(), edit.clone(), equality2.clone());
        while let (Some(head), Some(next)) = (edit.chars().next(), equality2.chars().next()) {
            if head != next {
                break;
            }
            equality1.push(head);
            edit.drain(..head.len_utf8());
            edit.push(next);
            equality2.drain(..next.len_utf8());

            let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
            // `>=` prefers the rightmost of equally good splits.
            if score >= best_score {
                best_score = score;
                best = (equality1.clone(), edit.clone(), equality2.clone());
            }
        }

        if ops[i - 1].text != best.0 {
            let (best_equality1, best_edit, best_equality2) = best;
            ops[i].text = best_edit;
            if best_equality2.is_empty() {
                ops.remove(i + 1);
            } else {
                ops[i + 1].text = best_equality2;
            }
            if best_equality1.is_empty() {
                ops.remove(i - 1);
                i -= 1;
            } else {
                ops[i - 1].text = best_equality1;
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_score_ranks_breaks() {
        assert_eq!(boundary_score("", "x"), 6);
        assert_eq!(boundary_score("a\n\n", "b"), 5);
        assert_eq!(boundary_score("a\n", "b"), 4);
        assert_eq!(boundary_score("end.", " next"), 3);
        assert_eq!(boundary_score("a ", "b"), 2);
        assert_eq!(boundary_score("a-", "b"), 1);
        assert_eq!(boundary_score("ab", "cd"), 0);
    }

    #[test]
    fn common_affixes_respect_char_boundaries() {
        assert_eq!(common_prefix_len("日本語", "日本人"), "日本".len());
        assert_eq!(common_suffix_len("東京都", "京都"), "京都".len());
        assert_eq!(common_prefix_len("abc", "xbc"), 0);
    }
}
