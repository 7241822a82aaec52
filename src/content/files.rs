use std::collections::HashMap;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::ContentMeta;

pub fn scan_content_files(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if extensions.iter().any(|ext| file_name.ends_with(ext)) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn read_content_file(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(raw),
        Err(e) => Err(io::Error::new(
            e.kind(),
            format!("Error reading content file {}: {}", path.display(), e),
        )),
    }
}

pub struct UniqueKeys {
    slugs: HashMap<String, PathBuf>,
    ids: HashMap<String, PathBuf>,
}

impl UniqueKeys {
    pub fn new() -> UniqueKeys {
        UniqueKeys {
            slugs: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    pub fn register(&mut self, meta: &ContentMeta, file: &Path) -> io::Result<()> {
        if let Some(first) = self.slugs.insert(meta.slug.clone(), file.to_path_buf()) {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!(
                    "Duplicate slug '{}' in {} and {}",
                    meta.slug,
                    first.display(),
                    file.display()
                ),
            ));
        }
        if let Some(first) = self.ids.insert(meta.id.clone(), file.to_path_buf()) {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!(
                    "Duplicate id '{}' in {} and {}",
                    meta.id,
                    first.display(),
                    file.display()
                ),
            ));
        }
        Ok(())
    }
}

impl Default for UniqueKeys {
    fn default() -> Self {
        UniqueKeys::new()
    }
}
