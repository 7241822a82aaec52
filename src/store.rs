use std::io;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tokio::task::JoinError;

use crate::content::posts::load_posts;
use crate::content::prompts::load_prompts;
use crate::content::{ContentItem, ContentType, PostRecord, PromptRecord};

pub struct ContentStore {
    posts_dir: PathBuf,
    prompts_dir: PathBuf,
    caching: bool,
    feed: RwLock<Option<Arc<Vec<ContentItem>>>>,
}

impl ContentStore {
    pub fn new(posts_dir: PathBuf, prompts_dir: PathBuf) -> Self {
        ContentStore {
            posts_dir,
            prompts_dir,
            caching: true,
            feed: RwLock::new(None),
        }
    }

    /// Re-reads the collections on every call, for local writing sessions.
    pub fn non_caching(posts_dir: PathBuf, prompts_dir: PathBuf) -> Self {
        ContentStore {
            posts_dir,
            prompts_dir,
            caching: false,
            feed: RwLock::new(None),
        }
    }

    pub async fn all_content(&self) -> io::Result<Arc<Vec<ContentItem>>> {
        if self.caching {
            let feed = self.feed.read().unwrap();
            if let Some(ref feed) = *feed {
                return Ok(feed.clone());
            }
        }

        let feed = Arc::new(self.load_feed().await?);
        if self.caching {
            *self.feed.write().unwrap() = Some(feed.clone());
        }
        Ok(feed)
    }

    async fn load_feed(&self) -> io::Result<Vec<ContentItem>> {
        let posts_dir = self.posts_dir.clone();
        let prompts_dir = self.prompts_dir.clone();

        let (posts, prompts) = tokio::join!(
            tokio::task::spawn_blocking(move || load_posts(&posts_dir)),
            tokio::task::spawn_blocking(move || load_prompts(&prompts_dir)),
        );
        let posts = flatten_load(posts)?;
        let prompts = flatten_load(prompts)?;

        let mut feed: Vec<ContentItem> = Vec::with_capacity(posts.len() + prompts.len());
        feed.extend(posts.into_iter().map(ContentItem::Post));
        feed.extend(prompts.into_iter().map(ContentItem::Prompt));

        // Newest first. The sort is stable, so items sharing a timestamp
        // keep posts-then-prompts, file-name order.
        feed.sort_by(|a, b| b.meta().created_at.cmp(&a.meta().created_at));

        Ok(feed)
    }

    pub async fn post_by_slug(&self, slug: &str) -> io::Result<Option<PostRecord>> {
        let feed = self.all_content().await?;
        Ok(feed.iter().find_map(|item| match item {
            ContentItem::Post(post) if post.meta.slug == slug => Some(post.clone()),
            _ => None,
        }))
    }

    pub async fn prompt_by_slug(&self, slug: &str) -> io::Result<Option<PromptRecord>> {
        let feed = self.all_content().await?;
        Ok(feed.iter().find_map(|item| match item {
            ContentItem::Prompt(prompt) if prompt.meta.slug == slug => Some(prompt.clone()),
            _ => None,
        }))
    }
}

fn flatten_load<T>(res: Result<io::Result<T>, JoinError>) -> io::Result<T> {
    match res {
        Ok(inner) => inner,
        Err(e) => Err(io::Error::new(
            ErrorKind::Other,
            format!("Collection load task failed: {}", e),
        )),
    }
}

pub fn filter_by_type(feed: &[ContentItem], content_type: ContentType) -> Vec<&ContentItem> {
    feed.iter()
        .filter(|item| item.content_type() == content_type)
        .collect()
}

pub fn filter_by_tag<'a>(feed: &'a [ContentItem], tag: &str) -> Vec<&'a ContentItem> {
    feed.iter().filter(|item| item.has_tag(tag)).collect()
}

pub fn tag_frequencies(items: &[&ContentItem]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = vec![];
    for item in items {
        for tag in &item.meta().tags {
            match counts.iter_mut().find(|(name, _)| name == tag.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.as_str().to_string(), 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}
