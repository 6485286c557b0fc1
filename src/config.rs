use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::BuilderError;
use crate::Result;

/// Document type used when a model does not name one
pub const DEFAULT_DOC_TYPE: &str = "_doc";

/// Page size used when a model does not set one
pub const DEFAULT_PER_PAGE: i64 = 15;

/// Query parameter carrying the page number
pub const DEFAULT_PAGE_NAME: &str = "page";

/// Index (and optional document type) a search runs against
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexTarget {
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

impl IndexTarget {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: None,
        }
    }

    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// URL-style path, e.g. `posts/_doc`
    pub fn path(&self) -> String {
        match &self.doc_type {
            Some(doc_type) => format!("{}/{}", self.index, doc_type),
            None => self.index.clone(),
        }
    }
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Search settings for one searchable model
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub index: String,
    pub doc_type: Option<String>,
    pub per_page: i64,
    pub page_name: String,
    pub columns: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            index: "default".to_string(),
            doc_type: Some(DEFAULT_DOC_TYPE.to_string()),
            per_page: DEFAULT_PER_PAGE,
            page_name: DEFAULT_PAGE_NAME.to_string(),
            columns: vec!["*".to_string()],
        }
    }
}

impl SearchSettings {
    /// Settings for an index, everything else defaulted
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }

    /// Parse settings from a JSON document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: SearchSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BuilderError::InvalidArgument(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_doc_type(mut self, doc_type: Option<String>) -> Self {
        self.doc_type = doc_type;
        self
    }

    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = page_name.into();
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Index target described by these settings
    pub fn target(&self) -> IndexTarget {
        IndexTarget {
            index: self.index.clone(),
            doc_type: self.doc_type.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.index.trim().is_empty() {
            return Err(BuilderError::InvalidArgument(
                "index name must not be empty".to_string(),
            ));
        }
        if self.per_page <= 0 {
            return Err(BuilderError::InvalidArgument(format!(
                "per_page must be positive, got {}",
                self.per_page
            )));
        }
        Ok(())
    }
}
