//! Text predicates used by the field completeness checks.
//!
//! Rich-text fields arrive as HTML strings from the WYSIWYG editor, which
//! produces `<p><br></p>` for an "empty" document. Emptiness is therefore
//! judged on the visible text after markup is stripped, not on the raw
//! string. All functions here are total: they never panic on any input.

/// True when a plain text field is absent, empty, or whitespace-only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Extract the visible text of an HTML fragment.
///
/// Complete `<...>` tags are removed; an unterminated `<` is kept as literal
/// text. Non-breaking-space entities count as whitespace. The result is
/// trimmed.
pub fn visible_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                // No closing '>' — the '<' is content, not markup.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .trim()
        .to_string()
}

/// True when a rich text field has no visible content.
///
/// `None`, `""`, and `"<p><br></p>"` are all blank.
pub fn rich_text_is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| visible_text(v).is_empty())
}

/// True when a task title is still the builder's default, `New Task <n>`.
///
/// Case-sensitive and exact after trimming, mirroring the default names the
/// builder generates.
pub fn is_placeholder_title(title: &str) -> bool {
    match title.trim().strip_prefix("New Task ") {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   \t\n")));
        assert!(!is_blank(Some("Data Analyst")));
        assert!(!is_blank(Some("  x  ")));
    }

    #[test]
    fn test_visible_text_strips_markup() {
        assert_eq!(visible_text("<p><br></p>"), "");
        assert_eq!(visible_text("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(visible_text("<p>&nbsp;</p>"), "");
        assert_eq!(visible_text("plain"), "plain");
    }

    #[test]
    fn test_visible_text_keeps_unterminated_bracket() {
        // A '<' with no '>' after it is content, not markup.
        assert_eq!(visible_text("a < b"), "a < b");
        // A stray '<' before real markup swallows through the next '>'.
        assert_eq!(visible_text("<p>a < b</p>"), "a");
    }

    #[test]
    fn test_rich_text_blankness() {
        assert!(rich_text_is_blank(None));
        assert!(rich_text_is_blank(Some("")));
        assert!(rich_text_is_blank(Some("<p><br></p>")));
        assert!(rich_text_is_blank(Some("<p>&nbsp;&nbsp;</p>")));
        assert!(!rich_text_is_blank(Some("<p>Grading rubric</p>")));
    }

    #[test]
    fn test_placeholder_titles() {
        assert!(is_placeholder_title("New Task 1"));
        assert!(is_placeholder_title("New Task 42"));
        assert!(is_placeholder_title("  New Task 7  "));
        assert!(!is_placeholder_title("New Task"));
        assert!(!is_placeholder_title("New Task A"));
        assert!(!is_placeholder_title("new task 1"));
        assert!(!is_placeholder_title("Quarterly forecast"));
        assert!(!is_placeholder_title(""));
    }
}
