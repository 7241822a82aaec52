use std::io;
use std::path::Path;

use crate::content::files::{read_content_file, scan_content_files, UniqueKeys};
use crate::content::front_matter::{parse_front_matter, PromptFrontMatter};
use crate::content::prompt_parser::parse_prompt_content;
use crate::content::PromptRecord;

pub const PROMPT_EXTENSIONS: &[&str] = &[".md"];

/// Front-matter problems fail the load; missing body sections do not.
pub fn load_prompts(prompts_dir: &Path) -> io::Result<Vec<PromptRecord>> {
    let files = scan_content_files(prompts_dir, PROMPT_EXTENSIONS)?;

    let mut prompts = Vec::with_capacity(files.len());
    let mut keys = UniqueKeys::new();
    for path in files {
        let raw = read_content_file(&path)?;
        let (front_matter, body) = parse_front_matter::<PromptFrontMatter>(&path, &raw)?;
        let (meta, keyword, arguments) = front_matter.into_parts(&path)?;
        keys.register(&meta, &path)?;

        let sections = parse_prompt_content(&body);
        prompts.push(PromptRecord {
            meta,
            keyword,
            arguments,
            content: body,
            context: sections.context,
            prompt: sections.prompt,
            try_example: sections.try_example,
        });
    }

    Ok(prompts)
}
