//! HTML-to-text conversion for terminal display.

/// Convert HTML to plain text.
///
/// - Preserves line breaks from `<br>`, `<p>`, `<div>`
/// - Replaces `<img>` tags with a visible `[image: src]` marker
/// - Converts `<li>` rows to their own lines
/// - Removes scripts and styles
/// - Decodes common HTML entities
pub fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();

    // Remove script and style blocks
    text = remove_tag_block(&text, "script");
    text = remove_tag_block(&text, "style");

    // Keep inline images discoverable in a text terminal
    text = replace_images(&text);

    // Convert block elements to newlines
    for tag in &["br", "BR", "br/", "br /"] {
        text = text.replace(&format!("<{tag}>"), "\n");
    }
    for tag in &["p", "div", "tr", "li", "h1", "h2", "h3", "h4", "h5", "h6"] {
        text = text.replace(&format!("<{tag}>"), "\n");
        text = text.replace(&format!("<{tag} "), "\n<");
        let upper = tag.to_uppercase();
        text = text.replace(&format!("<{upper}>"), "\n");
        text = text.replace(&format!("</{tag}>"), "\n");
        text = text.replace(&format!("</{upper}>"), "\n");
    }

    // Strip all remaining HTML tags
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }

    // Decode HTML entities
    result = result.replace("&amp;", "&");
    result = result.replace("&lt;", "<");
    result = result.replace("&gt;", ">");
    result = result.replace("&quot;", "\"");
    result = result.replace("&#39;", "'");
    result = result.replace("&apos;", "'");
    result = result.replace("&nbsp;", " ");
    result = result.replace("&#160;", " ");

    // Collapse multiple blank lines into at most two
    let mut prev_was_blank = false;
    let mut cleaned = String::with_capacity(result.len());
    for line in result.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !prev_was_blank {
                cleaned.push('\n');
                prev_was_blank = true;
            }
        } else {
            cleaned.push_str(trimmed);
            cleaned.push('\n');
            prev_was_blank = false;
        }
    }

    cleaned.trim().to_string()
}

/// Replace `<img ...>` tags with `[image: src]` markers. Tags without
/// a readable `src` become a bare `[image]` marker.
fn replace_images(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut remaining = html;

    while let Some(start) = remaining.to_ascii_lowercase().find("<img") {
        result.push_str(&remaining[..start]);
        let after = &remaining[start..];
        let Some(end) = after.find('>') else {
            // Unterminated tag: drop the rest
            remaining = "";
            break;
        };
        match img_src(&after[..=end]) {
            Some(src) => {
                result.push_str("\n[image: ");
                result.push_str(src);
                result.push_str("]\n");
            }
            None => result.push_str("\n[image]\n"),
        }
        remaining = &after[end + 1..];
    }
    result.push_str(remaining);
    result
}

/// Extract the `src` attribute value from a single `<img ...>` tag.
fn img_src(tag: &str) -> Option<&str> {
    let at = tag.to_ascii_lowercase().find("src")?;
    let rest = tag[at + 3..].trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote == '"' || quote == '\'' {
        let inner = &rest[1..];
        inner.find(quote).map(|end| &inner[..end])
    } else {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>')
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

/// Remove an entire tag block (e.g. `<script>…</script>`).
fn remove_tag_block(html: &str, tag: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut remaining = html;
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    while let Some(start) = remaining.to_ascii_lowercase().find(&open) {
        result.push_str(&remaining[..start]);
        let after = &remaining[start..];
        if let Some(end) = after.to_ascii_lowercase().find(&close) {
            remaining = &after[end + close.len()..];
        } else {
            // No closing tag: remove rest
            remaining = "";
            break;
        }
    }
    result.push_str(remaining);
    result
}
