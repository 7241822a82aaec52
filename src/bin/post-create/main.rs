use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Post title
    #[arg(short, long)]
    title: String,

    /// Slug override. Derived from the title when omitted
    #[arg(short, long)]
    slug: Option<String>,

    /// Comma separated tags
    #[arg(long, default_value = "personal")]
    tags: String,

    /// Directory the post file is created in
    #[arg(short, long, default_value = "res/content/posts")]
    dir: PathBuf,

    /// Print the file instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);

    let mut slug = String::new();
    let mut prev_dash = true;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn yaml_str(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_front_matter(id: &str, slug: &str, date: &str, title: &str, tags: &[&str]) -> String {
    let mut buf = String::new();

    let quoted_tags: Vec<String> = tags.iter().map(|t| yaml_str(t)).collect();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "id: {}", yaml_str(id));
    let _ = writeln!(&mut buf, "slug: {}", yaml_str(slug));
    let _ = writeln!(&mut buf, "createdAt: {}", yaml_str(date));
    let _ = writeln!(&mut buf, "updatedAt: {}", yaml_str(date));
    let _ = writeln!(&mut buf, "title: {}", yaml_str(title));
    let _ = writeln!(&mut buf, "shortTitle: \"\"");
    let _ = writeln!(&mut buf, "description: \"\"");
    let _ = writeln!(&mut buf, "tags: [{}]", quoted_tags.join(", "));
    let _ = writeln!(&mut buf, "---");

    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Write the opening here.");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "<!-- notes to self can stay in comments -->");

    buf
}

fn main() -> Result<()> {
    let args = Args::parse();

    let slug = match args.slug {
        Some(ref slug) => slug.clone(),
        None => slug_from_title(&args.title),
    };
    if !is_valid_slug(&slug) {
        bail!(
            "Invalid slug '{}'. Use lowercase words separated by single dashes",
            slug
        );
    }

    let tags: Vec<&str> = args
        .tags
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let id = Uuid::new_v4().to_string();
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let content = render_front_matter(&id, &slug, &date, &args.title, &tags) + &render_body();

    if args.dry_run {
        println!("{}", content);
        return Ok(());
    }

    let file_path = args.dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("Post already exists: {}", file_path.display());
    }

    fs::create_dir_all(&args.dir)?;
    fs::write(&file_path, content)?;
    println!("Created {}", file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use noted::content::front_matter::{parse_front_matter, PostFrontMatter};
    use std::path::Path;

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slug_from_title("My first post"), "my-first-post");
        assert_eq!(slug_from_title("  Spaces,  punctuation!  "), "spaces-punctuation");
        assert_eq!(slug_from_title("Époque d'été"), "epoque-d-ete");
        assert_eq!(slug_from_title("Rust 2024"), "rust-2024");
        assert_eq!(slug_from_title("!!!"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("my-first-post"));
        assert!(is_valid_slug("rust-2024"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Has-Caps"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
    }

    #[test]
    fn test_yaml_str_escapes_quotes() {
        assert_eq!(yaml_str(r#"A "quoted" word"#), r#""A \"quoted\" word""#);
        assert_eq!(yaml_str(r"back\slash"), r#""back\\slash""#);
    }

    #[test]
    fn test_scaffold_parses_as_a_post() {
        let front = render_front_matter(
            "0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9",
            "my-first-post",
            "2024-06-01",
            "My first post",
            &["reading", "ai"],
        );
        let raw = front + &render_body();

        let file = Path::new("my-first-post.md");
        let (fm, body) = parse_front_matter::<PostFrontMatter>(file, &raw).unwrap();
        assert_eq!(fm.slug, "my-first-post");
        assert_eq!(fm.title, "My first post");

        let meta = fm.into_meta(file).unwrap();
        assert_eq!(meta.tags.len(), 2);
        assert!(body.contains("Write the opening here."));
    }
}
