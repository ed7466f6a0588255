//! Prompt construction and output cleanup for schedule edits.

/// CSS classes the schedule page styles depend on.
const PRESERVED_CLASSES: &[&str] = &[
    "day",
    "day-header",
    "event",
    "time",
    "activity",
    "location",
    "note",
    "highlight",
    "tag",
];

/// Entities that must stay encoded rather than be turned into raw characters.
const PRESERVED_ENTITIES: &[&str] = &[
    "&amp;", "&mdash;", "&ndash;", "&rarr;", "&nbsp;", "&middot;",
];

const WRAPPER_OPEN: &str = "<schedule>";
const WRAPPER_CLOSE: &str = "</schedule>";

/// Build the single user message for an edit.
pub fn build_edit_prompt(instruction: &str, current_html: &str) -> String {
    let classes = PRESERVED_CLASSES
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let entities = PRESERVED_ENTITIES.join(" ");

    format!(
        "You are editing the HTML of a trip schedule. Apply the requested change and return the complete updated HTML.\n\
         \n\
         Requested change:\n\
         {instruction}\n\
         \n\
         Current HTML:\n\
         {WRAPPER_OPEN}\n{current_html}\n{WRAPPER_CLOSE}\n\
         \n\
         Rules:\n\
         - Keep the existing structure and only change what the request asks for.\n\
         - Preserve every CSS class exactly as written, in particular {classes}.\n\
         - Reuse the existing class names for any new elements; do not invent new classes or inline styles.\n\
         - Keep HTML entities encoded ({entities}); do not replace them with literal characters.\n\
         - Do not add <html>, <head>, <body>, <style> or <script> elements.\n\
         - Reply with the updated HTML only, wrapped in {WRAPPER_OPEN}...{WRAPPER_CLOSE}, with no explanation and no code fences."
    )
}

/// Strip a surrounding code fence and `<schedule>` wrapper from a reply.
pub fn clean_completion(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (e.g. "html") up to the end of the fence line.
        text = match rest.find('\n') {
            Some(idx) if !rest[..idx].contains('<') => &rest[idx + 1..],
            _ => strip_html_tag(rest),
        };
    }
    text = text.trim_end();
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text = text.trim();

    if let Some(rest) = text.strip_prefix(WRAPPER_OPEN) {
        text = rest;
    }
    if let Some(rest) = text.trim_end().strip_suffix(WRAPPER_CLOSE) {
        text = rest;
    }

    text.trim().to_string()
}

/// Strip an `html` info string that runs straight into the markup.
fn strip_html_tag(text: &str) -> &str {
    match text.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("html") => text[4..].trim_start(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs_and_rules() {
        let prompt = build_edit_prompt("Move dinner to 8pm", "<div class=\"day\">Mon</div>");
        assert!(prompt.contains("Move dinner to 8pm"));
        assert!(prompt.contains("<div class=\"day\">Mon</div>"));
        assert!(prompt.contains("\"event\""));
        assert!(prompt.contains("&mdash;"));
    }

    #[test]
    fn test_clean_strips_fence_and_wrapper() {
        let raw = "```html\n<schedule>\n  <div class=\"day\">Tue</div>\n</schedule>\n```\n";
        assert_eq!(clean_completion(raw), "<div class=\"day\">Tue</div>");
    }

    #[test]
    fn test_clean_strips_bare_fence() {
        let raw = "```\n<p>x</p>\n```";
        assert_eq!(clean_completion(raw), "<p>x</p>");
    }

    #[test]
    fn test_clean_handles_wrapper_only() {
        assert_eq!(clean_completion("  <schedule><p>a</p></schedule>  "), "<p>a</p>");
    }

    #[test]
    fn test_clean_leaves_plain_html() {
        assert_eq!(clean_completion("\n<p>plain</p>\n"), "<p>plain</p>");
    }

    #[test]
    fn test_clean_fence_on_same_line_as_html() {
        assert_eq!(clean_completion("```<p>a</p>```"), "<p>a</p>");
    }

    #[test]
    fn test_clean_html_tag_without_newline() {
        assert_eq!(
            clean_completion("```html<schedule><p>a</p></schedule>```"),
            "<p>a</p>"
        );
        assert_eq!(clean_completion("```HTML <p>b</p>```"), "<p>b</p>");
    }
}
