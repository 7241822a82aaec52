use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs, io};

use chrono::{NaiveDate, ParseError};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub author: String,
    /// Drives the home page week-of-life counter when set.
    pub birth_date: Option<TomlDate>,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub posts_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub pages_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub feed_preview_count: usize,
    pub content_cache_enabled: bool,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
}

// Code adapted from https://www.seachess.net/notes/toml-dates/
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TomlDate(pub NaiveDate);

impl<'de> Deserialize<'de> for TomlDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = toml::value::Datetime::deserialize(deserializer)?;
        let date = TomlDate::from_str(&value.to_string()).map_err(Error::custom)?;
        Ok(date)
    }
}

impl FromStr for TomlDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDate::from_str(s)?;
        Ok(Self(naive))
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!(
                    "Error opening configuration file {}: {}",
                    cfg_path.display(),
                    e
                ),
            ))
        }
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Error parsing configuration file: {}", e),
            ))
        }
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        posts_dir: parse_path(cfg.paths.posts_dir),
        prompts_dir: parse_path(cfg.paths.prompts_dir),
        pages_dir: parse_path(cfg.paths.pages_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_TOML: &str = r##"
[site]
title = "My notes"
author = "Sam"
birth_date = 1990-03-14

[paths]
template_dir = "res/templates"
public_dir = "res/public"
posts_dir = "res/content/posts"
prompts_dir = "res/content/prompts"
pages_dir = "res/pages"

[defaults]
feed_preview_count = 5
content_cache_enabled = true

[server]
address = "127.0.0.1"
port = 8001

[log]
level = "Info"
log_to_console = true
"##;

    #[test]
    fn test_parse_config() {
        let cfg: Config = toml::from_str::<Config>(CONFIG_TOML).unwrap();
        assert_eq!(cfg.site.title, "My notes");
        assert_eq!(
            cfg.site.birth_date,
            Some(TomlDate(NaiveDate::from_ymd_opt(1990, 3, 14).unwrap()))
        );
        assert_eq!(cfg.paths.prompts_dir, PathBuf::from("res/content/prompts"));
        assert_eq!(cfg.defaults.feed_preview_count, 5);
        assert!(cfg.defaults.content_cache_enabled);
        assert_eq!(cfg.server.port, 8001);
        assert!(cfg.log.is_some());
    }

    #[test]
    fn test_parse_config_without_optional_sections() {
        let toml_str = r##"
[site]
title = "My notes"
author = "Sam"

[paths]
template_dir = "res/templates"
public_dir = "res/public"
posts_dir = "res/content/posts"
prompts_dir = "res/content/prompts"
pages_dir = "res/pages"

[defaults]
feed_preview_count = 5
content_cache_enabled = false

[server]
address = "0.0.0.0"
port = 8080
"##;
        let cfg: Config = toml::from_str::<Config>(toml_str).unwrap();
        assert!(cfg.site.birth_date.is_none());
        assert!(cfg.log.is_none());
        assert!(!cfg.defaults.content_cache_enabled);
    }

    #[test]
    fn test_parse_path_leaves_plain_paths_alone() {
        let path = PathBuf::from("res/content/posts");
        assert_eq!(parse_path(path.clone()), path);
    }

    #[test]
    fn test_parse_path_substitutes_exe_dir() {
        let parsed = parse_path(PathBuf::from("${exe_dir}/res/templates"));
        assert!(!parsed.starts_with("${exe_dir}"));
        assert!(parsed.ends_with("res/templates"));
    }
}
