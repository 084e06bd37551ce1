// Column catalog: the ordered descriptor seed list plus TOML overrides.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use trellis_core::{ColumnSpec, DataType};

/// The reference ten-column catalog.
///
/// The identity and name columns are permanently visible and cannot be
/// unpinned; identity starts pinned left.
pub fn default_catalog() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "Id", DataType::Number)
            .with_width(70)
            .fixed_left()
            .protected(),
        ColumnSpec::new("name", "Name", DataType::Text)
            .with_width(150)
            .protected(),
        ColumnSpec::new("country", "Country", DataType::Text).with_width(150),
        ColumnSpec::new("company", "Company", DataType::Text).with_width(150),
        ColumnSpec::new("date", "Date", DataType::Date).with_width(150),
        ColumnSpec::new("activity", "Activity", DataType::Number).with_width(100),
        ColumnSpec::new("status", "Status", DataType::Select).with_width(120),
        ColumnSpec::new("representative", "Representative", DataType::Select).with_width(150),
        ColumnSpec::new("verified", "Verified", DataType::Bool).with_width(100),
        ColumnSpec::new("balance", "Balance", DataType::Number).with_width(100),
    ]
}

// ---------------------------------------------------------------------------
// TOML override format
// ---------------------------------------------------------------------------

/// Catalog file: a sequence of `[[column]]` tables in display order.
///
/// ```toml
/// [[column]]
/// field = "id"
/// label = "Id"
/// type = "number"
/// width = 70
/// fixed = "left"
/// disable_visibility_toggle = true
/// reject_when_unfixed = true
///
/// [[column]]
/// field = "name"
/// label = "Name"
/// ```
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub column: Vec<ColumnSpec>,
}

impl CatalogFile {
    /// Parse and validate a catalog from TOML text.
    pub fn from_toml(text: &str) -> Result<Vec<ColumnSpec>, CatalogError> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;
        file.validate()
    }

    /// Read and parse a catalog file from disk.
    pub fn load(path: &Path) -> Result<Vec<ColumnSpec>, CatalogError> {
        let text = fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    fn validate(self) -> Result<Vec<ColumnSpec>, CatalogError> {
        if self.column.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut seen = std::collections::HashSet::new();
        for col in &self.column {
            if !seen.insert(col.field.as_str()) {
                return Err(CatalogError::DuplicateField(col.field.clone()));
            }
        }
        Ok(self.column)
    }
}

/// Load a catalog override when a path is given, otherwise the default.
pub fn load_or_default(path: Option<&Path>) -> Result<Vec<ColumnSpec>, CatalogError> {
    match path {
        Some(path) => CatalogFile::load(path),
        None => Ok(default_catalog()),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum CatalogError {
    /// TOML parse / deserialization error.
    Parse(String),
    /// File read error.
    Io(String),
    /// Two descriptors share a field name.
    DuplicateField(String),
    /// The file parsed but declares no columns.
    EmptyCatalog,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            Self::Io(msg) => write!(f, "catalog read error: {msg}"),
            Self::DuplicateField(field) => {
                write!(f, "catalog declares field '{field}' more than once")
            }
            Self::EmptyCatalog => write!(f, "catalog declares no columns"),
        }
    }
}

impl std::error::Error for CatalogError {}
