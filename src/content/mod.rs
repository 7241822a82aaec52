use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod files;
pub mod front_matter;
pub mod markdown;
pub mod posts;
pub mod programs;
pub mod prompt_parser;
pub mod prompts;

/// An unknown tag in front-matter fails that file's load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Startups,
    Business,
    Writing,
    Reading,
    Ai,
    Learning,
    Education,
    Philosophy,
    Software,
    Economics,
    Personal,
    Health,
    Thinking,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Startups => "startups",
            Tag::Business => "business",
            Tag::Writing => "writing",
            Tag::Reading => "reading",
            Tag::Ai => "ai",
            Tag::Learning => "learning",
            Tag::Education => "education",
            Tag::Philosophy => "philosophy",
            Tag::Software => "software",
            Tag::Economics => "economics",
            Tag::Personal => "personal",
            Tag::Health => "health",
            Tag::Thinking => "thinking",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentMeta {
    pub id: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub title: String,
    pub short_title: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub meta: ContentMeta,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptRecord {
    pub meta: ContentMeta,
    pub keyword: Option<String>,
    pub arguments: Option<HashMap<String, String>>,
    /// Raw body; the three fields below are derived from it at load time.
    pub content: String,
    pub context: Option<String>,
    pub prompt: String,
    pub try_example: Option<String>,
}

pub type ProgramPage = fn() -> String;

#[derive(Debug, Clone)]
pub struct ProgramRecord {
    pub meta: ContentMeta,
    pub page: ProgramPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Post,
    Prompt,
    Program,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Prompt => "prompt",
            ContentType::Program => "program",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContentItem {
    Post(PostRecord),
    Prompt(PromptRecord),
    Program(ProgramRecord),
}

impl ContentItem {
    pub fn meta(&self) -> &ContentMeta {
        match self {
            ContentItem::Post(post) => &post.meta,
            ContentItem::Prompt(prompt) => &prompt.meta,
            ContentItem::Program(program) => &program.meta,
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ContentItem::Post(_) => ContentType::Post,
            ContentItem::Prompt(_) => ContentType::Prompt,
            ContentItem::Program(_) => ContentType::Program,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.meta().tags.iter().any(|t| t.as_str() == tag)
    }
}
