//! Tag extraction for model output.

use regex::RegexBuilder;
use tracing::warn;

use crate::errors::AppError;

/// Returns the trimmed text inside the first `<tag>...</tag>` pair of `source`.
///
/// Matching is case-insensitive, spans newlines and is non-greedy.
///
/// Permissive policy: when no pair is found the whole `source` comes back
/// unchanged. A truncated or malformed reply therefore passes through as if it
/// were the intended content; a warning is logged so that case stays visible.
pub fn between(source: &str, tag: &str) -> Result<String, AppError> {
    let tag = regex::escape(tag);
    let pattern = RegexBuilder::new(&format!("<{tag}>(.*?)</{tag}>"))
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()?;

    match pattern.captures(source).and_then(|c| c.get(1)) {
        Some(inner) => Ok(inner.as_str().trim().to_string()),
        None => {
            warn!("No <{tag}> tags found in model output; using the full text");
            Ok(source.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_and_trims_inner_text() {
        assert_eq!(between("<response>Hello</response>", "response").unwrap(), "Hello");
        assert_eq!(
            between("Sure! <response>  Hello  </response> Bye", "response").unwrap(),
            "Hello"
        );
    }

    #[test]
    fn test_no_tags_returns_source_unchanged() {
        let source = "  # Resume\nNo tags here  ";
        assert_eq!(between(source, "response").unwrap(), source);
    }

    #[test]
    fn test_case_insensitive_across_newlines() {
        assert_eq!(
            between("<RESPONSE>\nHello\n</RESPONSE>", "response").unwrap(),
            "Hello"
        );
        assert_eq!(
            between("<Response>\n# Title\n\nBody\n</response>", "response").unwrap(),
            "# Title\n\nBody"
        );
    }

    #[test]
    fn test_first_match_is_non_greedy() {
        let source = "<response>one</response> and <response>two</response>";
        assert_eq!(between(source, "response").unwrap(), "one");
    }

    #[test]
    fn test_unclosed_tag_falls_back_to_source() {
        let source = "<response>truncated output";
        assert_eq!(between(source, "response").unwrap(), source);
    }

    #[test]
    fn test_tag_name_is_matched_literally() {
        assert_eq!(between("<a.b>x</a.b>", "a.b").unwrap(), "x");
        let source = "<axb>x</axb>";
        assert_eq!(between(source, "a.b").unwrap(), source);
    }
}
