use pulldown_cmark::{html, Parser};

/// Renders CommonMark to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}
