use lazy_static::lazy_static;
use regex::Regex;

use crate::content::markdown::strip_html_comments;

const TRY_MARKER: &str = "## Try";

/// `prompt` is always present, possibly empty; the other two are absent
/// when their section is missing or blank.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSections {
    pub context: Option<String>,
    pub prompt: String,
    pub try_example: Option<String>,
}

/// Splits a prompt body into its sections. A malformed document degrades
/// to empty sections, this never fails.
pub fn parse_prompt_content(content: &str) -> PromptSections {
    PromptSections {
        context: extract_context(content),
        prompt: extract_prompt(content),
        try_example: extract_try_example(content),
    }
}

fn extract_context(content: &str) -> Option<String> {
    // The capture stops at the first of `## Prompt`, a fence or the end of
    // input. A fence has to end an unmarked context section.
    lazy_static! {
        static ref CONTEXT_RE: Regex =
            Regex::new(r"(?s)## Context\s*\n(.*?)(?:\n## Prompt|\n```|$)").unwrap();
    }

    let captured = CONTEXT_RE
        .captures(content)
        .and_then(|cap| cap.get(1))?
        .as_str()
        .trim();
    if captured.is_empty() {
        return None;
    }

    let cleaned = strip_html_comments(captured);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

fn extract_prompt(content: &str) -> String {
    let section = before_try_marker(content);
    match first_md_fence(section) {
        Some(block) => block.trim().to_string(),
        None => String::new(),
    }
}

fn extract_try_example(content: &str) -> Option<String> {
    let idx = content.find(TRY_MARKER)?;
    let section = &content[idx + TRY_MARKER.len()..];
    let block = first_md_fence(section)?.trim();
    if block.is_empty() {
        None
    } else {
        Some(block.to_string())
    }
}

fn before_try_marker(content: &str) -> &str {
    // A document with no marker, or one that opens with it, is searched whole
    match content.find(TRY_MARKER) {
        Some(0) | None => content,
        Some(idx) => &content[..idx],
    }
}

fn first_md_fence(section: &str) -> Option<&str> {
    lazy_static! {
        static ref MD_FENCE_RE: Regex = Regex::new(r"(?s)```md\s*\n(.*?)```").unwrap();
    }
    MD_FENCE_RE
        .captures(section)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}
