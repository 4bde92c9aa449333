use diffmark_core::{DiffOp, Engine};
use diffmark_render::{DocumentOptions, FragmentSource, render, render_document};
use regex::Regex;

fn tabindices(html: &str) -> Vec<u32> {
    let re = Regex::new(r#"<(?:ins|del)\b[^>]*\btabindex="(\d+)""#).unwrap();
    re.captures_iter(html)
        .map(|c| c[1].parse().unwrap())
        .collect()
}

fn start_tags<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let re = Regex::new(&format!(r"<{tag}\b[^>]*>")).unwrap();
    re.find_iter(html).map(|m| m.as_str()).collect()
}

fn render_ops(title: &str, ops: Vec<DiffOp>) -> String {
    render_document(
        title,
        &FragmentSource::FromOperations(ops),
        &DocumentOptions::default(),
    )
    .unwrap()
}

#[test]
fn scenario_single_character_replacement() {
    let ops = Engine::new().diff("cat\n", "car\n").unwrap();
    assert_eq!(
        ops,
        vec![
            DiffOp::equal("ca"),
            DiffOp::delete("t"),
            DiffOp::insert("r"),
            DiffOp::equal("\n"),
        ]
    );

    let html = render_ops("'a.txt'\u{2192}'b.txt'", ops);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<del tabindex="1" inert="">t</del>"#));
    assert!(html.contains(r#"<ins tabindex="2">r</ins>"#));
    assert!(html.contains("<title>'a.txt'\u{2192}'b.txt'</title>"));
    assert!(html.contains("<h1>'a.txt'\u{2192}'b.txt'</h1>"));
    assert_eq!(html.matches("<style>").count(), 1);
    assert_eq!(html.matches(r#"<link rel="icon""#).count(), 1);
    assert!(html.contains(r#"<span><span class="break"></span><br></span>"#));
}

#[test]
fn scenario_identical_inputs_have_no_edits() {
    let ops = Engine::new().diff("same\ntext", "same\ntext").unwrap();
    assert_eq!(ops.len(), 1);
    let html = render_ops("t", ops);
    assert!(tabindices(&html).is_empty());
    assert!(!html.contains("inert"));
    assert!(start_tags(&html, "ins").is_empty());
    assert!(start_tags(&html, "del").is_empty());
}

#[test]
fn scenario_multiline_insert_is_one_element() {
    let html = render(&[DiffOp::insert("line1\nline2")]);
    assert_eq!(start_tags(&html, "ins").len(), 1);
    assert_eq!(html.matches("<br>").count(), 1);
    assert_eq!(html.matches(r#"<span class="break"></span>"#).count(), 1);
}

#[test]
fn escaped_text_reparses_to_the_original() {
    let fragment = render(&[DiffOp::insert("<script>&</script>")]);
    assert_eq!(
        fragment,
        r#"<ins tabindex="1">&lt;script&gt;&amp;&lt;/script&gt;</ins>"#
    );
    let doc = roxmltree::Document::parse(&fragment).unwrap();
    assert_eq!(doc.root_element().tag_name().name(), "ins");
    assert_eq!(doc.root_element().text(), Some("<script>&</script>"));

    let html = render_ops("a < b && c > d", Vec::new());
    let title_re = Regex::new(r"<title>.*?</title>").unwrap();
    let title = title_re.find(&html).unwrap().as_str();
    let doc = roxmltree::Document::parse(title).unwrap();
    assert_eq!(doc.root_element().text(), Some("a < b && c > d"));
    assert_eq!(
        htmlize::unescape(title.trim_start_matches("<title>").trim_end_matches("</title>")),
        "a < b && c > d"
    );
}

#[test]
fn nav_indices_are_dense_and_inert_only_on_deletions() {
    let ops = Engine::new()
        .diff(
            "The quick brown fox\njumps over\nthe lazy dog.",
            "The quick red fox\nleaps over\nthe dog!",
        )
        .unwrap();
    let k = ops.iter().filter(|op| op.kind.is_edit()).count() as u32;
    assert!(k > 0);

    let html = render_ops("t", ops);
    assert_eq!(tabindices(&html), (1..=k).collect::<Vec<_>>());
    assert!(start_tags(&html, "del").iter().all(|t| t.contains("inert")));
    assert!(start_tags(&html, "ins").iter().all(|t| !t.contains("inert")));
    assert!(
        start_tags(&html, "span")
            .iter()
            .all(|t| !t.contains("tabindex"))
    );
}

#[test]
fn rendering_is_deterministic() {
    let engine = Engine::new();
    let a = render_ops("t", engine.diff("alpha\nbeta", "alpha\ngamma").unwrap());
    let b = render_ops("t", engine.diff("alpha\nbeta", "alpha\ngamma").unwrap());
    assert_eq!(a, b);
}

#[test]
fn prerendered_fragment_is_normalized() {
    let fragment = concat!(
        r#"<span>ca</span>"#,
        r#"<del style="background:#ffe6e6;">t</del>"#,
        r#"<ins style="background:#e6ffe6;">r</ins>"#,
        r#"<span>&para;<br></span>"#,
    );
    let html = render_document(
        "t",
        &FragmentSource::FromPrerendered(fragment.to_string()),
        &DocumentOptions::default(),
    )
    .unwrap();

    assert!(html.contains(r#"<del tabindex="1" inert="">t</del>"#));
    assert!(html.contains(r#"<ins tabindex="2">r</ins>"#));
    assert!(html.contains("<span>\u{21B5}<br></span>"));
    assert!(!html.contains("style=\""));
    assert!(!html.contains("&para;"));
    // Document-level parts survive the rewrite.
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("<style>").count(), 1);
}

#[test]
fn post_process_is_idempotent_on_rendered_documents() {
    let html = render_ops(
        "t",
        vec![DiffOp::delete("a"), DiffOp::equal("b"), DiffOp::insert("c")],
    );
    let once = diffmark_render::post_process(&html).unwrap();
    let twice = diffmark_render::post_process(&once).unwrap();
    assert_eq!(once, twice);
    assert_eq!(tabindices(&once), vec![1, 2]);
}

#[test]
fn empty_script_renders_heading_only() {
    let html = render_ops("t", Vec::new());
    assert!(html.ends_with(r#"<div id="diff-container"><h1>t</h1></div></body></html>"#));
}
