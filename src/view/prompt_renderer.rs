use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::PromptRecord;
use crate::text_utils::format_date_time;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ArgItem<'a> {
    name: &'a str,
    meaning: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    title: &'a str,
    date: &'a str,
    tags: Vec<ViewTag<'a>>,
    description: &'a str,
    has_description: bool,
    keyword: &'a str,
    has_keyword: bool,
    context_html: &'a str,
    has_context: bool,
    prompt: &'a str,
    has_prompt: bool,
    try_example: &'a str,
    has_try: bool,
    arguments: Vec<ArgItem<'a>>,
    has_arguments: bool,
}

pub struct PromptRenderer<'a> {
    pub template: Template<'a>,
}

impl PromptRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PromptRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing prompt view template: {}", e),
                ));
            }
        };

        Ok(PromptRenderer { template })
    }

    /// `context_html` is the rendered context section, empty when there is none.
    pub fn render(&self, prompt: &PromptRecord, context_html: &str) -> String {
        let meta = &prompt.meta;
        let tags: Vec<ViewTag> = meta
            .tags
            .iter()
            .map(|t| ViewTag { tag: t.as_str() })
            .collect();
        let (date, _time) = format_date_time(&meta.created_at);
        let description = meta.description.as_deref().unwrap_or("");
        let keyword = prompt.keyword.as_deref().unwrap_or("");
        let try_example = prompt.try_example.as_deref().unwrap_or("");

        let mut arguments: Vec<ArgItem> = prompt
            .arguments
            .iter()
            .flatten()
            .map(|(name, meaning)| ArgItem {
                name: name.as_str(),
                meaning: meaning.as_str(),
            })
            .collect();
        arguments.sort_by(|a, b| a.name.cmp(b.name));

        self.template.render(&ViewItem {
            title: meta.title.as_str(),
            date: date.as_str(),
            tags,
            description,
            has_description: !description.is_empty(),
            keyword,
            has_keyword: !keyword.is_empty(),
            context_html,
            has_context: !context_html.is_empty(),
            prompt: prompt.prompt.as_str(),
            has_prompt: !prompt.prompt.is_empty(),
            try_example,
            has_try: !try_example.is_empty(),
            has_arguments: !arguments.is_empty(),
            arguments,
        })
    }
}
