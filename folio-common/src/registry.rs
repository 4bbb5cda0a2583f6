//! Content body registry
//!
//! Maps `(type, category, slug)` keys to body files discovered once at
//! startup. Request input is only ever used as a map key; it is never
//! interpolated into a filesystem path.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::canonical::slugify;
use crate::content::ContentType;
use crate::{Error, Result};

const BODY_EXTENSIONS: [&str; 2] = ["mdx", "md"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentKey {
    pub content_type: ContentType,
    /// Slugified category; always `None` for flat types
    pub category: Option<String>,
    pub slug: String,
}

impl ContentKey {
    pub fn new(content_type: ContentType, category: Option<&str>, slug: &str) -> Self {
        let category = if content_type.has_category() {
            category.map(slugify).filter(|c| !c.is_empty())
        } else {
            None
        };
        Self {
            content_type,
            category,
            slug: slug.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderableContent {
    pub key: ContentKey,
    /// Raw MDX/Markdown source
    pub body: String,
}

/// Capability: fetch the renderable body of one content item
#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(
        &self,
        content_type: ContentType,
        category: Option<&str>,
        slug: &str,
    ) -> Result<RenderableContent>;
}

#[derive(Debug, Default)]
pub struct ContentRegistry {
    entries: BTreeMap<ContentKey, PathBuf>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ContentKey, path: PathBuf) {
        self.entries.insert(key, path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index `{root}/{type}/{category}/{slug}.mdx` (and `{root}/{type}/{slug}.mdx`
    /// for flat types). Files in unknown type directories are ignored.
    pub fn scan(root: &Path) -> Self {
        let mut registry = Self::new();

        for entry in WalkDir::new(root).min_depth(2).max_depth(3) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable content entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(key) = key_for(root, entry.path()) {
                registry.insert(key, entry.path().to_path_buf());
            } else {
                debug!(path = %entry.path().display(), "Ignoring file outside content layout");
            }
        }

        info!("Indexed {} content bodies under {}", registry.len(), root.display());
        registry
    }
}

fn key_for(root: &Path, path: &Path) -> Option<ContentKey> {
    let extension = path.extension()?.to_str()?;
    if !BODY_EXTENSIONS.contains(&extension) {
        return None;
    }
    let slug = path.file_stem()?.to_str()?;

    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .parent()?
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    match parts.as_slice() {
        [type_name] => {
            let content_type = ContentType::parse(type_name)?;
            (!content_type.has_category()).then(|| ContentKey::new(content_type, None, slug))
        }
        [type_name, category] => {
            let content_type = ContentType::parse(type_name)?;
            content_type
                .has_category()
                .then(|| ContentKey::new(content_type, Some(category), slug))
        }
        _ => None,
    }
}

#[async_trait]
impl ContentLoader for ContentRegistry {
    async fn load(
        &self,
        content_type: ContentType,
        category: Option<&str>,
        slug: &str,
    ) -> Result<RenderableContent> {
        let key = ContentKey::new(content_type, category, slug);
        let not_found = || Error::ContentNotFound {
            content_type,
            category: category.map(str::to_string),
            slug: slug.to_string(),
        };

        let path = self.entries.get(&key).ok_or_else(not_found)?;
        match tokio::fs::read_to_string(path).await {
            Ok(body) => Ok(RenderableContent { key, body }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
