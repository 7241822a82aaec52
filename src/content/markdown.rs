use std::borrow::Cow;
use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::Options;
use regex::Regex;

/// An unterminated comment is not an error, the text passes through as is.
pub fn strip_html_comments(text: &str) -> Cow<'_, str> {
    lazy_static! {
        static ref COMMENT_RE: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    }
    COMMENT_RE.replace_all(text, "")
}

pub fn render_markdown(md_text: &str) -> io::Result<String> {
    let buf = strip_html_comments(md_text);
    match markdown::to_html_with_options(buf.as_ref(), &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_comments() {
        let content = "Some text.<!-- more -->Wo<!-- xyz -->rd";
        assert_eq!(strip_html_comments(content), "Some text.Word");

        assert_eq!(strip_html_comments(""), "");
        assert_eq!(strip_html_comments("<!-- more --><!-- xyz -->"), "");
        assert_eq!(strip_html_comments("No comment here."), "No comment here.");
    }

    #[test]
    fn test_strip_html_comments_spanning_lines() {
        let content = "Before.\n<!-- a note\nover two lines -->\nAfter.";
        assert_eq!(strip_html_comments(content), "Before.\n\nAfter.");
    }

    #[test]
    fn test_strip_html_comments_unterminated() {
        let content = "Text with an open <!-- comment";
        assert_eq!(strip_html_comments(content), content);
    }

    #[test]
    fn test_render_markdown() {
        let content = "Intro.\n\n## Section\n\nSome **bold** text.";
        let html = render_markdown(content).unwrap();
        assert!(html.contains("<p>Intro.</p>"));
        assert!(html.contains("<h2>Section</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_markdown_drops_comments() {
        let content = "Visible.\n\n<!-- hidden note -->\n";
        let html = render_markdown(content).unwrap();
        assert!(html.contains("Visible."));
        assert!(!html.contains("hidden note"));
    }

    #[test]
    fn test_render_markdown_gfm_table() {
        let content = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let html = render_markdown(content).unwrap();
        assert!(html.contains("<table>"));
    }
}
