use crate::document::DocumentOptions;
use std::fmt::Write as _;

const DIFF_RULES: &str = r#"
ins {
  border-radius: 4px;
  background: #ffbebe;
  border: 1px solid tomato;
  text-decoration: none;
}

ins:focus {
  outline: 2px solid tomato;
}

del {
  background: #a4e5ff;
  border: 1px solid #05374b;
  color: #929292;
}

.break::after {
  content: "\21B5";
  color: #929292;
}
"#;

/// Builds the embedded stylesheet. Values come from [`DocumentOptions::from_config`], which
/// rejects characters that could close the rule or the `<style>` element.
pub fn stylesheet(options: &DocumentOptions) -> String {
    let mut out = String::with_capacity(512);
    let _ = write!(
        &mut out,
        r#"
#{id} {{
  width: {width};
  margin: auto;
  font-family: {font_family};
  font-size: {font_size};
  line-height: 1.25;
  word-break: break-all;
}}
"#,
        id = options.container_id,
        width = options.width,
        font_family = options.font_family,
        font_size = options.font_size,
    );
    out.push_str(DIFF_RULES);
    out
}
