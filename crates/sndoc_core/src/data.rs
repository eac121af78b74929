//! Loading of document data bags from JSON or YAML files.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Untyped key-value data describing one document. Key order follows the
/// source file.
pub type DocumentData = Map<String, Value>;

/// Serialization format of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick the format from a file extension; anything but `.yml`/`.yaml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                DataFormat::Yaml
            }
            _ => DataFormat::Json,
        }
    }
}

/// Parse a data bag. The top level must be a mapping.
pub fn parse_data(text: &str, format: DataFormat) -> CoreResult<DocumentData> {
    let value: Value = match format {
        DataFormat::Json => serde_json::from_str(text)?,
        DataFormat::Yaml => serde_yaml::from_str(text)?,
    };

    match value {
        Value::Object(map) => Ok(map),
        // An empty YAML document parses as null.
        Value::Null => Ok(DocumentData::new()),
        other => Err(CoreError::InvalidData {
            path: Default::default(),
            message: format!("expected a mapping at the top level, found {}", kind_name(&other)),
        }),
    }
}

/// Read and parse a data file.
pub fn load_data_file(path: impl AsRef<Path>) -> CoreResult<DocumentData> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CoreError::DataNotFound(path.to_path_buf()));
    }

    let format = DataFormat::from_path(path);
    debug!("Loading document data from {} as {:?}", path.display(), format);

    let text = std::fs::read_to_string(path)?;
    parse_data(&text, format).map_err(|e| match e {
        CoreError::InvalidData { message, .. } => CoreError::InvalidData {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Name of a JSON value kind, as shown in messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
