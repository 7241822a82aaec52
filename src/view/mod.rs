use crate::content::ContentItem;

pub mod home_renderer;
pub mod list_renderer;
pub mod page_renderer;
pub mod post_renderer;
pub mod prompt_renderer;

pub fn content_link(item: &ContentItem) -> String {
    let slug = &item.meta().slug;
    match item {
        ContentItem::Post(_) => format!("/blog/{}", slug),
        ContentItem::Prompt(_) => format!("/prompts/{}", slug),
        ContentItem::Program(_) => format!("/programs/{}", slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentMeta, PostRecord, ProgramRecord, PromptRecord, Tag};
    use crate::text_utils::parse_date_time;

    pub fn test_meta(slug: &str) -> ContentMeta {
        ContentMeta {
            id: format!("id-{}", slug),
            slug: slug.to_string(),
            created_at: parse_date_time("2024-06-01 10:30:00").unwrap(),
            updated_at: parse_date_time("2024-06-02 08:00:00").unwrap(),
            title: format!("Title of {}", slug),
            short_title: None,
            description: Some(format!("Description of {}.", slug)),
            hero_image: None,
            tags: vec![Tag::Software],
        }
    }

    #[test]
    fn test_content_link() {
        let post = ContentItem::Post(PostRecord {
            meta: test_meta("a-post"),
            content: String::new(),
        });
        assert_eq!(content_link(&post), "/blog/a-post");

        let prompt = ContentItem::Prompt(PromptRecord {
            meta: test_meta("a-prompt"),
            keyword: None,
            arguments: None,
            content: String::new(),
            context: None,
            prompt: String::new(),
            try_example: None,
        });
        assert_eq!(content_link(&prompt), "/prompts/a-prompt");

        let program = ContentItem::Program(ProgramRecord {
            meta: test_meta("a-program"),
            page: String::new,
        });
        assert_eq!(content_link(&program), "/programs/a-program");
    }
}
