//! Cells command implementation for nbview CLI.
//!
//! Prints the cells that remain after range filtering, which helps when
//! picking start/end tags.

use nbview::engine::CellType;
use nbview::{CUSTOM_CSS_MARKER, Diagnostics, Viewer, filter_start_end};

use crate::source::SourceArgs;

/// Longest first-line preview printed per cell.
const PREVIEW_CHARS: usize = 60;

/// Execute the cells command.
pub fn execute(source: &SourceArgs) -> anyhow::Result<()> {
    let options = source.resolve()?;
    let viewer = Viewer::new(&options.fetch)?;
    let mut diag = Diagnostics::new();

    let mut notebook = source.load(&options, &viewer, &mut diag)?;
    let total = notebook.cells.len();
    let notebook = filter_start_end(
        &mut notebook,
        options.start_tag.as_deref(),
        options.end_tag.as_deref(),
        &mut diag,
    );

    println!("{} of {} cells in range", notebook.cells.len(), total);
    for (index, cell) in notebook.cells.iter().enumerate() {
        let kind = match cell.cell_type {
            CellType::Code => "code",
            CellType::Markdown => "markdown",
            CellType::Raw => "raw",
        };
        let first_line = cell.source.lines().next().unwrap_or("").trim();
        let marker = if cell.source.contains(CUSTOM_CSS_MARKER) {
            "  [custom css]"
        } else {
            ""
        };
        println!(
            "  [{:>3}] {:<8} {}{}",
            index,
            kind,
            preview(first_line),
            marker
        );
    }

    Ok(())
}

fn preview(line: &str) -> String {
    if line.chars().count() <= PREVIEW_CHARS {
        line.to_string()
    } else {
        let truncated: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", truncated)
    }
}
