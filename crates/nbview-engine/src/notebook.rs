//! Jupyter notebook (.ipynb) model.
//!
//! Covers the nbformat v4 schema. Fields the engine does not interpret are
//! kept in `extra` maps so a parsed notebook serializes back with them intact.

use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// The only nbformat major version the engine reads.
pub const NBFORMAT_MAJOR: u64 = 4;

/// A Jupyter notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Notebook metadata (kernelspec, language_info, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Format version (always 4)
    pub nbformat: u32,

    /// Minor format version
    #[serde(default)]
    pub nbformat_minor: u32,

    /// Notebook cells
    pub cells: Vec<Cell>,

    /// Top-level keys outside the schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Type of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

/// A Jupyter cell.
///
/// Serialization writes `execution_count` and `outputs` for code cells only,
/// as nbformat v4 requires them there and forbids them elsewhere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cell {
    /// Cell type
    pub cell_type: CellType,

    /// Cell metadata
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Cell source, joined into one string
    #[serde(default, deserialize_with = "multiline::deserialize")]
    pub source: String,

    /// Execution count (code cells only)
    #[serde(default)]
    pub execution_count: Option<u32>,

    /// Cell outputs (code cells only)
    #[serde(default)]
    pub outputs: Vec<Output>,

    /// Everything else (`id`, `attachments`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("cell_type", &self.cell_type)?;
        map.serialize_entry("metadata", &self.metadata)?;
        map.serialize_entry("source", &self.source)?;
        if self.cell_type == CellType::Code {
            map.serialize_entry("execution_count", &self.execution_count)?;
            map.serialize_entry("outputs", &self.outputs)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Cell output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output_type")]
pub enum Output {
    /// Standard output/error
    #[serde(rename = "stream")]
    Stream {
        name: String,
        #[serde(deserialize_with = "multiline::deserialize")]
        text: String,
    },

    /// Rich display data
    #[serde(rename = "execute_result")]
    ExecuteResult {
        #[serde(default)]
        execution_count: Option<u32>,
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        metadata: Value,
    },

    /// Display data
    #[serde(rename = "display_data")]
    DisplayData {
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        metadata: Value,
    },

    /// Error output
    #[serde(rename = "error")]
    Error {
        ename: String,
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
}

/// Output data with multiple representations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MimeBundle {
    /// Plain text
    #[serde(
        rename = "text/plain",
        default,
        deserialize_with = "multiline::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_plain: Option<String>,

    /// HTML
    #[serde(
        rename = "text/html",
        default,
        deserialize_with = "multiline::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_html: Option<String>,

    /// Markdown
    #[serde(
        rename = "text/markdown",
        default,
        deserialize_with = "multiline::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_markdown: Option<String>,

    /// SVG image
    #[serde(
        rename = "image/svg+xml",
        default,
        deserialize_with = "multiline::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_svg: Option<String>,

    /// PNG image (base64)
    #[serde(
        rename = "image/png",
        default,
        deserialize_with = "multiline::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_png: Option<String>,

    /// JPEG image (base64)
    #[serde(
        rename = "image/jpeg",
        default,
        deserialize_with = "multiline::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_jpeg: Option<String>,

    /// Other MIME types, passed through untouched
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// nbformat "multiline strings": either one string or a list of lines that
/// already carry their own newlines.
mod multiline {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Multiline {
        Text(String),
        Lines(Vec<String>),
    }

    impl From<Multiline> for String {
        fn from(value: Multiline) -> Self {
            match value {
                Multiline::Text(text) => text,
                Multiline::Lines(lines) => lines.concat(),
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Multiline::deserialize(deserializer).map(String::from)
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Multiline>::deserialize(deserializer).map(|value| value.map(String::from))
    }
}

/// Parse notebook JSON into a [`Notebook`].
///
/// Only nbformat 4 documents are accepted; there is no upgrade path for
/// older versions.
pub fn parse(raw: &str) -> EngineResult<Notebook> {
    let value: Value = serde_json::from_str(raw)?;

    let version = value
        .get("nbformat")
        .and_then(Value::as_u64)
        .ok_or_else(|| EngineError::ParseError("missing nbformat version".to_string()))?;
    if version != NBFORMAT_MAJOR {
        return Err(EngineError::UnsupportedVersion(version));
    }

    if !value.get("cells").is_some_and(Value::is_array) {
        return Err(EngineError::ParseError(
            "notebook has no cells array".to_string(),
        ));
    }

    let notebook: Notebook = serde_json::from_value(value)?;
    tracing::trace!(cells = notebook.cells.len(), "parsed notebook");
    Ok(notebook)
}

impl Notebook {
    /// Create a new empty notebook.
    pub fn new() -> Self {
        Self {
            metadata: Map::new(),
            nbformat: 4,
            nbformat_minor: 5,
            cells: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Create a notebook holding the given cells.
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Self::new()
        }
    }

    /// Read and parse a notebook from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EngineError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        parse(&content)
    }

    /// Serialize the notebook back to JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Kernel language, from `language_info` or the kernelspec.
    pub fn language(&self) -> Option<&str> {
        self.metadata
            .get("language_info")
            .and_then(|info| info.get("name"))
            .or_else(|| {
                self.metadata
                    .get("kernelspec")
                    .and_then(|spec| spec.get("language"))
            })
            .and_then(Value::as_str)
    }

    /// Kernel name from the kernelspec.
    pub fn kernel_name(&self) -> Option<&str> {
        self.metadata
            .get("kernelspec")
            .and_then(|spec| spec.get("name"))
            .and_then(Value::as_str)
    }

    /// Notebook title from metadata, if any.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Create a cell with empty metadata and no outputs.
    pub fn new(cell_type: CellType, source: impl Into<String>) -> Self {
        Self {
            cell_type,
            metadata: Map::new(),
            source: source.into(),
            execution_count: None,
            outputs: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self::new(CellType::Markdown, source)
    }

    pub fn code(source: impl Into<String>) -> Self {
        Self::new(CellType::Code, source)
    }

    pub fn raw(source: impl Into<String>) -> Self {
        Self::new(CellType::Raw, source)
    }

    /// Attach outputs (builder style).
    pub fn with_outputs(mut self, outputs: Vec<Output>) -> Self {
        self.outputs = outputs;
        self
    }
}
