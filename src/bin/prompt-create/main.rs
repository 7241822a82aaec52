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
    /// Prompt title
    #[arg(short, long)]
    title: String,

    /// Slug override. Derived from the title when omitted
    #[arg(short, long)]
    slug: Option<String>,

    /// Trigger keyword. Defaults to the slug with dashes removed
    #[arg(short, long)]
    keyword: Option<String>,

    /// Comma separated tags
    #[arg(long, default_value = "ai")]
    tags: String,

    /// Directory the prompt file is created in
    #[arg(short, long, default_value = "res/content/prompts")]
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

fn keyword_from_slug(slug: &str) -> String {
    format!(";{}", slug.replace('-', ""))
}

fn yaml_str(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_front_matter(
    id: &str,
    slug: &str,
    date: &str,
    title: &str,
    keyword: &str,
    tags: &[&str],
) -> String {
    let mut buf = String::new();

    let quoted_tags: Vec<String> = tags.iter().map(|t| yaml_str(t)).collect();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "id: {}", yaml_str(id));
    let _ = writeln!(&mut buf, "slug: {}", yaml_str(slug));
    let _ = writeln!(&mut buf, "createdAt: {}", yaml_str(date));
    let _ = writeln!(&mut buf, "updatedAt: {}", yaml_str(date));
    let _ = writeln!(&mut buf, "title: {}", yaml_str(title));
    let _ = writeln!(&mut buf, "description: \"\"");
    let _ = writeln!(&mut buf, "keyword: {}", yaml_str(keyword));
    let _ = writeln!(&mut buf, "# arguments:");
    let _ = writeln!(&mut buf, "#   audience: \"Who the output is written for\"");
    let _ = writeln!(&mut buf, "tags: [{}]", quoted_tags.join(", "));
    let _ = writeln!(&mut buf, "---");

    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Context");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "<!-- When would you reach for this prompt? -->");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Prompt");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "```md");
    let _ = writeln!(&mut buf, "Write the prompt here.");
    let _ = writeln!(&mut buf, "```");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Try");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "```md");
    let _ = writeln!(&mut buf, "Write a worked example here.");
    let _ = writeln!(&mut buf, "```");

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

    let keyword = match args.keyword {
        Some(ref keyword) => keyword.clone(),
        None => keyword_from_slug(&slug),
    };

    let tags: Vec<&str> = args
        .tags
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let id = Uuid::new_v4().to_string();
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let content =
        render_front_matter(&id, &slug, &date, &args.title, &keyword, &tags) + &render_body();

    if args.dry_run {
        println!("{}", content);
        return Ok(());
    }

    let file_path = args.dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("Prompt already exists: {}", file_path.display());
    }

    fs::create_dir_all(&args.dir)?;
    fs::write(&file_path, content)?;
    println!("Created {}", file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use noted::content::front_matter::{parse_front_matter, PromptFrontMatter};
    use noted::content::prompt_parser::parse_prompt_content;
    use std::path::Path;

    #[test]
    fn test_keyword_from_slug() {
        assert_eq!(keyword_from_slug("weekly-review"), ";weeklyreview");
        assert_eq!(keyword_from_slug("solo"), ";solo");
    }

    #[test]
    fn test_scaffold_parses_as_a_prompt() {
        let front = render_front_matter(
            "0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9",
            "weekly-review",
            "2024-03-01",
            "Weekly review",
            ";weeklyreview",
            &["ai"],
        );
        let raw = front + &render_body();

        let file = Path::new("weekly-review.md");
        let (fm, body) = parse_front_matter::<PromptFrontMatter>(file, &raw).unwrap();
        let (meta, keyword, arguments) = fm.into_parts(file).unwrap();
        assert_eq!(meta.slug, "weekly-review");
        assert_eq!(keyword.as_deref(), Some(";weeklyreview"));
        assert_eq!(arguments, None);

        let sections = parse_prompt_content(&body);
        assert_eq!(sections.context, None);
        assert_eq!(sections.prompt, "Write the prompt here.");
        assert_eq!(
            sections.try_example.as_deref(),
            Some("Write a worked example here.")
        );
    }
}
