/// Escapes text for insertion into HTML element content or a quoted
/// attribute value. Only `& < > " '` are replaced; nothing is trimmed.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Same as [`escape_html`], with absent input rendered as the empty string.
pub fn escape_opt(input: Option<&str>) -> String {
    input.map(escape_html).unwrap_or_default()
}
