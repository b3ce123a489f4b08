//! Render command implementation for nbview CLI.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use nbview::{Diagnostics, Viewer};

use crate::source::SourceArgs;

/// Execute the render command.
pub fn execute(source: &SourceArgs, output: Option<&Path>) -> anyhow::Result<()> {
    let options = source.resolve()?;
    let viewer = Viewer::new(&options.fetch)?;
    let mut diag = Diagnostics::new();

    let mut notebook = source.load(&options, &viewer, &mut diag)?;
    let html = viewer.render_notebook(&mut notebook, &options, &mut diag)?;

    match output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} ({} bytes)", path.display(), html.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
