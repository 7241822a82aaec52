use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::ContentItem;
use crate::text_utils::format_date_time;
use crate::view::content_link;

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    site_title: &'a str,
    author: &'a str,
    week_of_life: i64,
    has_week: bool,
    post_count: u32,
    prompt_count: u32,
    program_count: u32,
    recent: Vec<FeedItem>,
    programs: Vec<FeedItem>,
}

#[derive(ramhorns::Content)]
struct FeedItem {
    date: String,
    kind: &'static str,
    link: String,
    title: String,
}

pub struct HomeRenderer<'a> {
    pub template: Template<'a>,
}

pub struct HomeView<'a> {
    pub site_title: &'a str,
    pub author: &'a str,
    /// `None` hides the week counter.
    pub week_of_life: Option<i64>,
    pub post_count: u32,
    pub prompt_count: u32,
    pub program_count: u32,
    pub recent: Vec<&'a ContentItem>,
    pub programs: Vec<&'a ContentItem>,
}

impl HomeRenderer<'_> {
    pub fn new(home_tpl_src: &str) -> io::Result<HomeRenderer> {
        let template = match Template::new(home_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing home template: {}", e),
                ));
            }
        };

        Ok(HomeRenderer { template })
    }

    pub fn render(&self, view: &HomeView) -> String {
        self.template.render(&HomePage {
            site_title: view.site_title,
            author: view.author,
            week_of_life: view.week_of_life.unwrap_or(0),
            has_week: view.week_of_life.is_some(),
            post_count: view.post_count,
            prompt_count: view.prompt_count,
            program_count: view.program_count,
            recent: view.recent.iter().map(|item| feed_item(item)).collect(),
            programs: view.programs.iter().map(|item| feed_item(item)).collect(),
        })
    }
}

fn feed_item(item: &ContentItem) -> FeedItem {
    let meta = item.meta();
    let (date, _time) = format_date_time(&meta.created_at);
    FeedItem {
        date,
        kind: item.content_type().as_str(),
        link: content_link(item),
        title: meta.title.clone(),
    }
}
