use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::PostRecord;
use crate::text_utils::format_date_time;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    title: &'a str,
    date: &'a str,
    time: &'a str,
    tags: Vec<ViewTag<'a>>,
    description: &'a str,
    has_description: bool,
    hero_image: &'a str,
    has_hero_image: bool,
    post_content: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing post view template: {}", e),
                ));
            }
        };

        Ok(PostRenderer { template })
    }

    /// `content_html` goes into the template unescaped.
    pub fn render(&self, post: &PostRecord, content_html: &str) -> String {
        let meta = &post.meta;
        let tags: Vec<ViewTag> = meta
            .tags
            .iter()
            .map(|t| ViewTag { tag: t.as_str() })
            .collect();
        let (date, time) = format_date_time(&meta.created_at);
        let description = meta.description.as_deref().unwrap_or("");
        let hero_image = meta.hero_image.as_deref().unwrap_or("");

        self.template.render(&ViewItem {
            title: meta.title.as_str(),
            date: date.as_str(),
            time: time.as_str(),
            tags,
            description,
            has_description: !description.is_empty(),
            hero_image,
            has_hero_image: !hero_image.is_empty(),
            post_content: content_html,
        })
    }
}
