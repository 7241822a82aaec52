use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::ContentItem;
use crate::text_utils::format_date_time;
use crate::view::content_link;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    heading: &'a str,
    intro: &'a str,
    items: Vec<ListItem>,
    has_items: bool,
    tags: Vec<TagItem>,
    has_tags: bool,
}

#[derive(ramhorns::Content)]
struct ListItem {
    date: String,
    kind: &'static str,
    link: String,
    title: String,
    description: String,
}

#[derive(ramhorns::Content)]
struct TagItem {
    tag: String,
    count: u32,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing list template: {}", e),
                ));
            }
        };

        Ok(ListRenderer { template })
    }

    pub fn render(
        &self,
        heading: &str,
        intro: &str,
        contents: &[&ContentItem],
        tags: &[(String, u32)],
    ) -> String {
        let items: Vec<ListItem> = contents.iter().map(|item| list_item(item)).collect();
        let tags: Vec<TagItem> = tags
            .iter()
            .map(|(tag, count)| TagItem {
                tag: tag.clone(),
                count: *count,
            })
            .collect();

        self.template.render(&ListPage {
            heading,
            intro,
            has_items: !items.is_empty(),
            has_tags: !tags.is_empty(),
            items,
            tags,
        })
    }
}

fn list_item(item: &ContentItem) -> ListItem {
    let meta = item.meta();
    let (date, _time) = format_date_time(&meta.created_at);
    ListItem {
        date,
        kind: item.content_type().as_str(),
        link: content_link(item),
        title: meta.title.clone(),
        description: meta.description.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PostRecord, PromptRecord};
    use crate::view::tests::test_meta;

    #[test]
    fn render_list() {
        let template_src = r##"HEADING=[{{heading}}]
INTRO=[{{intro}}]
ITEMS=[{{#items}}({{date}} {{kind}} {{link}} {{title}}){{/items}}]
TAGS=[{{#tags}}({{tag}}:{{count}}){{/tags}}]"##;
        let renderer = ListRenderer::new(template_src).unwrap();

        let post = ContentItem::Post(PostRecord {
            meta: test_meta("a-post"),
            content: String::new(),
        });
        let prompt = ContentItem::Prompt(PromptRecord {
            meta: test_meta("a-prompt"),
            keyword: None,
            arguments: None,
            content: String::new(),
            context: None,
            prompt: String::new(),
            try_example: None,
        });
        let contents = vec![&post, &prompt];
        let tags = vec![("software".to_string(), 2)];

        let res = renderer.render("Posts", "Everything written here.", &contents, &tags);
        assert_eq!(
            res,
            r##"HEADING=[Posts]
INTRO=[Everything written here.]
ITEMS=[(2024-06-01 post /blog/a-post Title of a-post)(2024-06-01 prompt /prompts/a-prompt Title of a-prompt)]
TAGS=[(software:2)]"##
        );
    }

    #[test]
    fn render_empty_list() {
        let template_src =
            "{{#has_items}}SOME{{/has_items}}{{^has_items}}NOTHING YET{{/has_items}}";
        let renderer = ListRenderer::new(template_src).unwrap();
        let res = renderer.render("Posts", "", &[], &[]);
        assert_eq!(res, "NOTHING YET");
    }
}
