//! Embeddable Jupyter notebook viewer.
//!
//! Fetches a notebook, trims it to a tagged range of cells, runs the cell
//! processors, exports HTML and applies the final markup rewrites.
//!
//! # Architecture
//!
//! ```text
//! url ─► fetch_notebook ─► parse ─► filter_start_end ─► preprocess ─► export_html ─► postprocess ─► html
//!                                                          │
//!                                             RemoveCustomCss, ImageReplacement
//! ```
//!
//! Every stage reports through an explicit [`Diagnostics`] sink.

mod diagnostics;
mod error;
mod fetch;
mod filter;
mod options;
mod postprocess;
mod preprocess;

pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use error::{Result, ViewerError};
pub use fetch::{HttpClient, HttpResponse, ReqwestClient, fetch_notebook};
pub use filter::filter_start_end;
pub use options::{FetchOptions, ViewerOptions};
pub use postprocess::{
    CONTAINER_PLACEHOLDER, NOTEBOOK_CONTAINER, TARGET_BLANK, insert_target_blank, postprocess,
    remove_box_shadow,
};
pub use preprocess::{
    CUSTOM_CSS_MARKER, CssSearch, ImageReplacement, Processor, RemoveCustomCss,
    default_processors, preprocess,
};

pub use nbview_engine as engine;

use nbview_engine::{HtmlExporter, Notebook};

/// Runs the whole pipeline against one HTTP client.
#[derive(Debug)]
pub struct Viewer<C = ReqwestClient> {
    client: C,
    exporter: HtmlExporter,
}

impl Viewer<ReqwestClient> {
    /// Create a viewer backed by a `reqwest` client.
    pub fn new(fetch: &FetchOptions) -> Result<Self> {
        Ok(Self::with_client(ReqwestClient::new(fetch)?))
    }
}

impl<C: HttpClient> Viewer<C> {
    /// Create a viewer around an existing client.
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            exporter: HtmlExporter::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch `options.url` and render it.
    pub fn process(&self, options: &ViewerOptions, diag: &mut Diagnostics) -> Result<String> {
        let raw = fetch_notebook(&self.client, &options.url, diag)?;
        self.render_source(&raw, options, diag)
    }

    /// Render notebook text that has already been fetched.
    pub fn render_source(
        &self,
        raw: &str,
        options: &ViewerOptions,
        diag: &mut Diagnostics,
    ) -> Result<String> {
        let mut notebook = nbview_engine::parse(raw).map_err(ViewerError::Parse)?;
        self.render_notebook(&mut notebook, options, diag)
    }

    /// Filter, preprocess, export and post-process a parsed notebook.
    pub fn render_notebook(
        &self,
        notebook: &mut Notebook,
        options: &ViewerOptions,
        diag: &mut Diagnostics,
    ) -> Result<String> {
        let notebook = filter_start_end(
            notebook,
            options.start_tag.as_deref(),
            options.end_tag.as_deref(),
            diag,
        );

        let mut processors = default_processors(options.images_url.as_deref());
        preprocess(notebook, &mut processors, diag)?;

        let (html, resources) = self.exporter.export(notebook).map_err(ViewerError::Render)?;
        diag.debug(format!(
            "Rendered {} cells ({} bytes)",
            resources.metadata.cell_count,
            html.len()
        ));

        Ok(postprocess(&html, diag))
    }
}

/// Fetch and render a notebook with a default HTTP client.
pub fn process(
    url: &str,
    images_url: Option<&str>,
    start_tag: Option<&str>,
    end_tag: Option<&str>,
    diag: &mut Diagnostics,
) -> Result<String> {
    let options = ViewerOptions {
        url: url.to_string(),
        images_url: images_url.map(String::from),
        start_tag: start_tag.map(String::from),
        end_tag: end_tag.map(String::from),
        fetch: FetchOptions::default(),
    };
    Viewer::new(&options.fetch)?.process(&options, diag)
}
