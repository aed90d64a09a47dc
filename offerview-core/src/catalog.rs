//! Offer catalog files.
//!
//! A catalog is a JSON file of [`ConfigurationRecord`]s, either a bare
//! array or the `{"configurations": [...]}` object returned by the
//! configuration API's list endpoint. Loading never touches a previously
//! loaded catalog, so callers can keep showing the last good data when a
//! reload fails.

use crate::error::{Error, Result};
use crate::types::{ConfigurationRecord, Offer};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Deserialize)]
struct WrappedCatalog {
    configurations: Vec<ConfigurationRecord>,
}

#[derive(Serialize)]
struct WrappedCatalogOut<'a> {
    configurations: &'a [ConfigurationRecord],
}

/// Configuration records loaded from a file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    path: Option<PathBuf>,
    records: Vec<ConfigurationRecord>,
}

impl Catalog {
    /// Build an in-memory catalog with no backing file.
    pub fn from_records(records: Vec<ConfigurationRecord>) -> Self {
        Self {
            path: None,
            records,
        }
    }

    /// Parse catalog JSON.
    ///
    /// The shape is detected first, then the text is parsed again as that
    /// shape so errors carry the line and column of the bad record.
    pub fn parse(content: &str) -> Result<Self> {
        let records = match serde_json::from_str::<serde_json::Value>(content)? {
            serde_json::Value::Array(_) => serde_json::from_str(content)?,
            serde_json::Value::Object(map) if map.contains_key("configurations") => {
                serde_json::from_str::<WrappedCatalog>(content)?.configurations
            }
            _ => {
                return Err(<serde_json::Error as serde::de::Error>::custom(
                    "expected a list of configurations or an object with a \"configurations\" list",
                )
                .into())
            }
        };
        Ok(Self::from_records(records))
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Catalog {
            path: path.to_path_buf(),
            message: format!("failed to read: {}", e),
        })?;

        let mut catalog = Self::parse(&content).map_err(|e| Error::Catalog {
            path: path.to_path_buf(),
            message: format!("failed to parse: {}", e),
        })?;
        catalog.path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            records = catalog.records.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Write the catalog to `path` in the wrapped list shape.
    ///
    /// The JSON goes to a temporary file in the target directory that is
    /// renamed into place; on failure the temporary file is removed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&WrappedCatalogOut {
            configurations: &self.records,
        })?;

        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(path).map_err(|e| Error::Catalog {
            path: path.to_path_buf(),
            message: format!("failed to replace file: {}", e.error),
        })?;

        tracing::info!(path = %path.display(), records = self.records.len(), "Saved catalog");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &[ConfigurationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records as offers, in file order.
    pub fn offers(&self) -> Vec<Offer> {
        self.records.iter().map(ConfigurationRecord::to_offer).collect()
    }

    /// Find a record by config name (case-insensitive), numeric id, or
    /// zero-based position.
    pub fn find(&self, key: &str) -> Result<&ConfigurationRecord> {
        let key = key.trim();

        if let Some(record) = self
            .records
            .iter()
            .find(|r| r.config_name.eq_ignore_ascii_case(key))
        {
            return Ok(record);
        }

        if let Ok(n) = key.parse::<u64>() {
            if let Some(record) = self.records.iter().find(|r| r.id == Some(n)) {
                return Ok(record);
            }
            if let Some(record) = usize::try_from(n).ok().and_then(|i| self.records.get(i)) {
                return Ok(record);
            }
        }

        Err(Error::OfferNotFound(key.to_string()))
    }
}
