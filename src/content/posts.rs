use std::io;
use std::path::Path;

use crate::content::files::{read_content_file, scan_content_files, UniqueKeys};
use crate::content::front_matter::{parse_front_matter, PostFrontMatter};
use crate::content::PostRecord;

pub const POST_EXTENSIONS: &[&str] = &[".md", ".mdx"];

pub fn load_posts(posts_dir: &Path) -> io::Result<Vec<PostRecord>> {
    let files = scan_content_files(posts_dir, POST_EXTENSIONS)?;

    let mut posts = Vec::with_capacity(files.len());
    let mut keys = UniqueKeys::new();
    for path in files {
        let raw = read_content_file(&path)?;
        let (front_matter, body) = parse_front_matter::<PostFrontMatter>(&path, &raw)?;
        let meta = front_matter.into_meta(&path)?;
        keys.register(&meta, &path)?;
        posts.push(PostRecord {
            meta,
            content: body,
        });
    }

    Ok(posts)
}
