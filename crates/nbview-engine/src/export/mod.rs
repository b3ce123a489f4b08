//! HTML export.
//!
//! Renders a [`Notebook`] to a standalone HTML page shaped like the classic
//! Jupyter "full" template: an inlined stylesheet, a `#notebook-container`
//! wrapper and one `div.cell` per cell.

mod outputs;

use std::fmt::Write as _;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::notebook::{Cell, CellType, Notebook};

/// Stylesheet inlined into every exported page.
pub const DEFAULT_CSS: &str = include_str!("notebook.css");

/// Exporter configuration.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Inline [`DEFAULT_CSS`] into the page head
    pub embed_css: bool,

    /// Drop code cell inputs, keeping their outputs
    pub exclude_input: bool,

    /// Drop code cell outputs
    pub exclude_output: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            embed_css: true,
            exclude_input: false,
            exclude_output: false,
        }
    }
}

/// Auxiliary output produced alongside the HTML.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resources {
    /// File extension for the rendered document
    pub output_extension: String,

    /// Facts about the exported notebook
    pub metadata: ResourceMetadata,

    /// Stylesheets inlined into the page
    pub inlined_css: Vec<String>,
}

/// Notebook facts recorded in [`Resources`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceMetadata {
    pub language: Option<String>,
    pub kernel: Option<String>,
    pub cell_count: usize,
}

/// HTML exporter for notebooks.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    options: ExportOptions,
}

impl HtmlExporter {
    /// Create an exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Render the notebook to an HTML page.
    pub fn export(&self, notebook: &Notebook) -> EngineResult<(String, Resources)> {
        let language = notebook.language().unwrap_or("python");
        let title = notebook.title().unwrap_or("Notebook");

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
        let _ = writeln!(html, "<title>{}</title>", escape_html(title));
        if self.options.embed_css {
            let _ = writeln!(html, "<style type=\"text/css\">\n{}</style>", DEFAULT_CSS);
        }
        html.push_str("</head>\n<body>\n");
        html.push_str("<div tabindex=\"-1\" id=\"notebook\" class=\"border-box-sizing\">\n");
        html.push_str("<div class=\"container\" id=\"notebook-container\">\n");

        for cell in &notebook.cells {
            self.render_cell(&mut html, cell, language)?;
        }

        html.push_str("</div>\n</div>\n</body>\n</html>\n");

        let resources = Resources {
            output_extension: ".html".to_string(),
            metadata: ResourceMetadata {
                language: notebook.language().map(String::from),
                kernel: notebook.kernel_name().map(String::from),
                cell_count: notebook.cells.len(),
            },
            inlined_css: if self.options.embed_css {
                vec![DEFAULT_CSS.to_string()]
            } else {
                Vec::new()
            },
        };

        tracing::debug!(
            cells = notebook.cells.len(),
            bytes = html.len(),
            "exported notebook to HTML"
        );

        Ok((html, resources))
    }

    fn render_cell(&self, html: &mut String, cell: &Cell, language: &str) -> EngineResult<()> {
        match cell.cell_type {
            CellType::Markdown => {
                let body = render_markdown(&cell.source)?;
                html.push_str("<div class=\"cell border-box-sizing text_cell rendered\">\n");
                html.push_str("<div class=\"inner_cell\">\n");
                html.push_str(
                    "<div class=\"text_cell_render border-box-sizing rendered_html\">\n",
                );
                html.push_str(&body);
                html.push_str("\n</div>\n</div>\n</div>\n");
            }
            CellType::Code => {
                html.push_str("<div class=\"cell border-box-sizing code_cell rendered\">\n");
                if !self.options.exclude_input {
                    let _ = writeln!(
                        html,
                        "<div class=\"input\">\n<div class=\"prompt input_prompt\">{}</div>",
                        prompt("In", cell.execution_count)
                    );
                    let _ = writeln!(
                        html,
                        "<div class=\"inner_cell\">\n<div class=\"input_area\">\n<pre><code class=\"language-{}\">{}</code></pre>\n</div>\n</div>\n</div>",
                        escape_html(language),
                        escape_html(&cell.source)
                    );
                }
                if !self.options.exclude_output && !cell.outputs.is_empty() {
                    html.push_str("<div class=\"output_wrapper\">\n<div class=\"output\">\n");
                    for output in &cell.outputs {
                        outputs::render_output(html, output)?;
                    }
                    html.push_str("</div>\n</div>\n");
                }
                html.push_str("</div>\n");
            }
            CellType::Raw => {
                html.push_str("<div class=\"cell border-box-sizing raw_cell\">\n");
                html.push_str(&cell.source);
                html.push_str("\n</div>\n");
            }
        }
        Ok(())
    }
}

/// Export a notebook with the default exporter configuration.
pub fn export_html(notebook: &Notebook) -> EngineResult<(String, Resources)> {
    HtmlExporter::new().export(notebook)
}

/// Render CommonMark + GFM to HTML. Raw HTML in the source is kept, since
/// notebook prose routinely embeds `<img>` and `<div>` tags.
pub(crate) fn render_markdown(source: &str) -> EngineResult<String> {
    let options = markdown::Options {
        compile: markdown::CompileOptions {
            allow_dangerous_html: true,
            allow_dangerous_protocol: true,
            gfm_tagfilter: false,
            ..markdown::CompileOptions::gfm()
        },
        ..markdown::Options::gfm()
    };
    markdown::to_html_with_options(source, &options)
        .map_err(|e| EngineError::RenderError(format!("markdown: {}", e)))
}

fn prompt(label: &str, count: Option<u32>) -> String {
    match count {
        Some(n) => format!("{}&nbsp;[{}]:", label, n),
        None => format!("{}&nbsp;[&nbsp;]:", label),
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
