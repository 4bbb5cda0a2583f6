//! JSON file content source
//!
//! One file per content type, `{root}/{type}.json`, holding an array of
//! camelCase records.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::{visible_records, ContentSource};
use crate::content::{ContentRecord, ContentType, RawRecord};
use crate::Result;

pub struct JsonSource {
    root: PathBuf,
}

impl JsonSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn file_for(&self, content_type: ContentType) -> PathBuf {
        self.root.join(format!("{}.json", content_type))
    }

    async fn load(&self, content_type: ContentType) -> Result<Vec<RawRecord>> {
        let bytes = tokio::fs::read(self.file_for(content_type)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ContentSource for JsonSource {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn records(&self, content_type: ContentType) -> Vec<ContentRecord> {
        match self.load(content_type).await {
            Ok(raw) => visible_records(content_type, raw),
            Err(e) => {
                warn!(
                    content_type = %content_type,
                    path = %self.file_for(content_type).display(),
                    error = %e,
                    "Content file unavailable, serving empty listing"
                );
                Vec::new()
            }
        }
    }
}
