//! Notebook engine for nbview.
//!
//! Reads Jupyter notebooks (nbformat v4) and exports them to HTML.
//!
//! # Architecture
//!
//! ```text
//! notebook.ipynb ─────► parse ─────► Notebook ─────► HtmlExporter ─────► (html, Resources)
//! ```

mod error;
mod export;
mod notebook;

pub use error::{EngineError, EngineResult};
pub use export::{
    DEFAULT_CSS, ExportOptions, HtmlExporter, ResourceMetadata, Resources, escape_html,
    export_html,
};
pub use notebook::{Cell, CellType, MimeBundle, NBFORMAT_MAJOR, Notebook, Output, parse};
