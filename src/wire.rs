use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::content::{ContentItem, ContentMeta, Tag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMeta {
    pub id: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    pub tags: Vec<Tag>,
}

impl From<&ContentMeta> for WireMeta {
    fn from(meta: &ContentMeta) -> Self {
        WireMeta {
            id: meta.id.clone(),
            slug: meta.slug.clone(),
            created_at: meta.created_at,
            updated_at: meta.updated_at,
            title: meta.title.clone(),
            short_title: meta.short_title.clone(),
            description: meta.description.clone(),
            hero_image: meta.hero_image.clone(),
            tags: meta.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePost {
    #[serde(flatten)]
    pub meta: WireMeta,
    /// Always blanked, full bodies are fetched per slug.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePrompt {
    #[serde(flatten)]
    pub meta: WireMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<HashMap<String, String>>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub try_example: Option<String>,
}

/// No field for the page function, so it cannot leak into a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProgram {
    #[serde(flatten)]
    pub meta: WireMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireContent {
    #[serde(rename = "post")]
    Post(WirePost),
    #[serde(rename = "prompt")]
    Prompt(WirePrompt),
    #[serde(rename = "program")]
    Program(WireProgram),
}

impl WireContent {
    pub fn from_item(item: &ContentItem) -> WireContent {
        match item {
            ContentItem::Post(post) => WireContent::Post(WirePost {
                meta: WireMeta::from(&post.meta),
                content: String::new(),
            }),
            ContentItem::Prompt(prompt) => WireContent::Prompt(WirePrompt {
                meta: WireMeta::from(&prompt.meta),
                keyword: prompt.keyword.clone(),
                arguments: prompt.arguments.clone(),
                content: prompt.content.clone(),
                context: prompt.context.clone(),
                prompt: prompt.prompt.clone(),
                try_example: prompt.try_example.clone(),
            }),
            ContentItem::Program(program) => WireContent::Program(WireProgram {
                meta: WireMeta::from(&program.meta),
            }),
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            WireContent::Post(post) => &post.meta.slug,
            WireContent::Prompt(prompt) => &prompt.meta.slug,
            WireContent::Program(program) => &program.meta.slug,
        }
    }
}

pub fn serialize_feed(feed: &[ContentItem]) -> Vec<WireContent> {
    feed.iter().map(WireContent::from_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PostRecord, ProgramRecord, PromptRecord};
    use crate::text_utils::parse_date_time;

    fn meta(slug: &str) -> ContentMeta {
        ContentMeta {
            id: format!("id-{}", slug),
            slug: slug.to_string(),
            created_at: parse_date_time("2024-06-01").unwrap(),
            updated_at: parse_date_time("2024-06-02").unwrap(),
            title: format!("Title {}", slug),
            short_title: None,
            description: Some("A description.".to_string()),
            hero_image: None,
            tags: vec![Tag::Software],
        }
    }

    #[test]
    fn test_post_content_is_blanked() {
        let item = ContentItem::Post(PostRecord {
            meta: meta("a-post"),
            content: "A very long body.".to_string(),
        });

        let wire = WireContent::from_item(&item);
        let WireContent::Post(post) = &wire else {
            panic!("expected a post");
        };
        assert_eq!(post.content, "");
        assert_eq!(post.meta.slug, "a-post");
        assert_eq!(post.meta.title, "Title a-post");
    }

    #[test]
    fn test_prompt_travels_whole() {
        let item = ContentItem::Prompt(PromptRecord {
            meta: meta("a-prompt"),
            keyword: Some(";ap".to_string()),
            arguments: None,
            content: "## Prompt\n\n```md\nBody\n```\n".to_string(),
            context: Some("The context.".to_string()),
            prompt: "Body".to_string(),
            try_example: None,
        });

        let wire = WireContent::from_item(&item);
        let WireContent::Prompt(prompt) = &wire else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.content, "## Prompt\n\n```md\nBody\n```\n");
        assert_eq!(prompt.prompt, "Body");
        assert_eq!(prompt.context.as_deref(), Some("The context."));
    }

    #[test]
    fn test_program_serializes_without_page() {
        let item = ContentItem::Program(ProgramRecord {
            meta: meta("a-program"),
            page: || "<section></section>".to_string(),
        });

        let wire = WireContent::from_item(&item);
        let value = serde_json::to_value(&wire).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("type").unwrap(), "program");
        assert!(obj.get("page").is_none());
        assert!(obj.get("component").is_none());
        assert_eq!(obj.get("slug").unwrap(), "a-program");
    }

    #[test]
    fn test_wire_json_shape() {
        let item = ContentItem::Post(PostRecord {
            meta: meta("shape"),
            content: "Body.".to_string(),
        });

        let value = serde_json::to_value(WireContent::from_item(&item)).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("type").unwrap(), "post");
        assert_eq!(obj.get("createdAt").unwrap(), "2024-06-01T00:00:00");
        assert_eq!(obj.get("tags").unwrap()[0], "software");
        // Absent optionals are dropped, not serialized as null
        assert!(obj.get("shortTitle").is_none());
        assert!(obj.get("heroImage").is_none());
    }

    #[test]
    fn test_wire_round_trip() {
        let item = ContentItem::Prompt(PromptRecord {
            meta: meta("round-trip"),
            keyword: None,
            arguments: Some(HashMap::from([(
                "focus".to_string(),
                "What to review".to_string(),
            )])),
            content: "## Prompt\n".to_string(),
            context: None,
            prompt: "".to_string(),
            try_example: Some("An example.".to_string()),
        });

        let wire = WireContent::from_item(&item);
        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"tryExample\":\"An example.\""));

        let back: WireContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wire);
    }

    #[test]
    fn test_serialize_feed_keeps_order() {
        let feed = vec![
            ContentItem::Post(PostRecord {
                meta: meta("newest"),
                content: "x".to_string(),
            }),
            ContentItem::Post(PostRecord {
                meta: meta("oldest"),
                content: "y".to_string(),
            }),
        ];

        let wire = serialize_feed(&feed);
        let slugs: Vec<_> = wire.iter().map(|w| w.slug()).collect();
        assert_eq!(slugs, ["newest", "oldest"]);
    }
}
