use std::borrow::Cow;

/// Rewrites `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    // Fast path: nothing to rewrite.
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Drops one leading U+FEFF byte order mark, as UTF-8 decoders do.
pub fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{FEFF}').unwrap_or(input)
}
