use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::content::{ContentMeta, Tag};
use crate::text_utils::parse_date_time;

/// Splits a raw markdown document into its YAML front-matter and body.
pub fn split_front_matter(raw: &str) -> io::Result<(&str, &str)> {
    let Some(after_open) = raw.strip_prefix("---") else {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            "Document does not start with a front-matter block",
        ));
    };
    let after_open = after_open.strip_prefix('\n').unwrap_or(after_open);

    let Some(closing_pos) = after_open.find("\n---") else {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            "Front-matter block is never closed",
        ));
    };

    let yaml = &after_open[..closing_pos];
    let body = after_open[closing_pos + 4..].trim_start_matches('\n');

    Ok((yaml, body))
}

pub fn parse_front_matter<T: DeserializeOwned>(file: &Path, raw: &str) -> io::Result<(T, String)> {
    let (yaml, body) = split_front_matter(raw)
        .map_err(|e| io::Error::new(e.kind(), format!("{} - file={}", e, file.display())))?;

    let front_matter: T = serde_yaml_ng::from_str(yaml).map_err(|e| {
        io::Error::new(
            ErrorKind::InvalidData,
            format!("Invalid front-matter: {} - file={}", e, file.display()),
        )
    })?;

    Ok((front_matter, body.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontMatter {
    pub id: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
    pub title: String,
    pub short_title: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub tags: Vec<Tag>,
}

impl PostFrontMatter {
    pub fn into_meta(self, file: &Path) -> io::Result<ContentMeta> {
        Ok(ContentMeta {
            created_at: parse_content_date(&self.created_at, "createdAt", file)?,
            updated_at: parse_content_date(&self.updated_at, "updatedAt", file)?,
            id: self.id,
            slug: self.slug,
            title: self.title,
            short_title: self.short_title,
            description: self.description,
            hero_image: self.hero_image,
            tags: self.tags,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFrontMatter {
    pub id: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
    pub title: String,
    pub short_title: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub tags: Vec<Tag>,
    pub keyword: Option<String>,
    pub arguments: Option<HashMap<String, String>>,
}

impl PromptFrontMatter {
    pub fn into_parts(
        self,
        file: &Path,
    ) -> io::Result<(ContentMeta, Option<String>, Option<HashMap<String, String>>)> {
        let meta = ContentMeta {
            created_at: parse_content_date(&self.created_at, "createdAt", file)?,
            updated_at: parse_content_date(&self.updated_at, "updatedAt", file)?,
            id: self.id,
            slug: self.slug,
            title: self.title,
            short_title: self.short_title,
            description: self.description,
            hero_image: self.hero_image,
            tags: self.tags,
        };
        Ok((meta, self.keyword, self.arguments))
    }
}

fn parse_content_date(value: &str, field: &str, file: &Path) -> io::Result<NaiveDateTime> {
    parse_date_time(value).map_err(|e| {
        io::Error::new(
            ErrorKind::InvalidData,
            format!("{} in {} - file={}", e, field, file.display()),
        )
    })
}
