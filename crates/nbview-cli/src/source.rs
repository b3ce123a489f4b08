//! Notebook source selection shared by all commands.
//!
//! Options come from an optional JSON config file, then command-line flags
//! override individual values.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use nbview::engine::Notebook;
use nbview::{Diagnostics, Viewer, ViewerError, ViewerOptions, fetch_notebook};

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Notebook URL
    pub url: Option<String>,

    /// Read a local .ipynb file instead of fetching
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Base URL prepended to image file names
    #[arg(long)]
    pub images_url: Option<String>,

    /// Keep cells starting at the first one containing this text
    #[arg(long)]
    pub start: Option<String>,

    /// Drop cells from the first one containing this text
    #[arg(long)]
    pub end: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON file with viewer options
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Merge the config file (if any) with command-line flags.
    pub fn resolve(&self) -> anyhow::Result<ViewerOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                ViewerOptions::from_json(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => ViewerOptions::default(),
        };

        if let Some(url) = &self.url {
            options.url = url.clone();
        }
        if let Some(images_url) = &self.images_url {
            options.images_url = Some(images_url.clone());
        }
        if let Some(start) = &self.start {
            options.start_tag = Some(start.clone());
        }
        if let Some(end) = &self.end {
            options.end_tag = Some(end.clone());
        }
        if let Some(timeout) = self.timeout {
            options.fetch.timeout_secs = Some(timeout);
        }

        if self.file.is_none() && options.url.is_empty() {
            anyhow::bail!("No notebook given: pass a URL, --file, or a config with \"url\"");
        }

        Ok(options)
    }

    /// Load the notebook from the file or URL.
    pub fn load(
        &self,
        options: &ViewerOptions,
        viewer: &Viewer,
        diag: &mut Diagnostics,
    ) -> anyhow::Result<Notebook> {
        match &self.file {
            Some(path) => Ok(Notebook::read_from_file(path)?),
            None => {
                let raw = fetch_notebook(viewer.client(), &options.url, diag)?;
                Ok(nbview::engine::parse(&raw).map_err(ViewerError::Parse)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp.path().join("viewer.json");
        fs::write(
            &config,
            r#"{"url": "http://a/nb.ipynb", "images_url": "http://a/img/", "start_tag": "S",
                "fetch": {"user_agent": "host"}}"#,
        )
        .unwrap();

        let args = SourceArgs {
            config: Some(config),
            start: Some("Begin".to_string()),
            timeout: Some(9),
            ..Default::default()
        };
        let options = args.resolve().unwrap();

        assert_eq!(options.url, "http://a/nb.ipynb");
        assert_eq!(options.images_url.as_deref(), Some("http://a/img/"));
        assert_eq!(options.start_tag.as_deref(), Some("Begin"));
        assert_eq!(options.fetch.timeout_secs, Some(9));
        assert_eq!(options.fetch.user_agent.as_deref(), Some("host"));
    }

    #[test]
    fn test_requires_a_source() {
        assert!(SourceArgs::default().resolve().is_err());

        let args = SourceArgs {
            file: Some(PathBuf::from("nb.ipynb")),
            ..Default::default()
        };
        assert!(args.resolve().is_ok());
    }
}
