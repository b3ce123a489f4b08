//! Removal of the cell that loads a notebook's custom stylesheet.

use nbview_engine::{Cell, Notebook};

use super::Processor;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, ViewerError};

/// Source text identifying the custom CSS loader cell.
pub const CUSTOM_CSS_MARKER: &str = "from IPython.core.display import HTML";

/// Search state for [`RemoveCustomCss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssSearch {
    /// No match yet; `seen` cells have been visited.
    Scanning { seen: usize },
    /// The loader cell sits at `index`.
    Found { index: usize },
}

impl CssSearch {
    /// Next state after visiting a cell with `source`. Once found, the state
    /// never changes again.
    pub fn advance(self, source: &str) -> Self {
        match self {
            CssSearch::Scanning { seen } if source.contains(CUSTOM_CSS_MARKER) => {
                CssSearch::Found { index: seen }
            }
            CssSearch::Scanning { seen } => CssSearch::Scanning { seen: seen + 1 },
            found @ CssSearch::Found { .. } => found,
        }
    }
}

/// Deletes the first cell whose source contains [`CUSTOM_CSS_MARKER`].
#[derive(Debug)]
pub struct RemoveCustomCss {
    state: CssSearch,
}

impl RemoveCustomCss {
    pub fn new() -> Self {
        Self {
            state: CssSearch::Scanning { seen: 0 },
        }
    }

    /// Where the search stands after the cells visited so far.
    pub fn state(&self) -> CssSearch {
        self.state
    }
}

impl Default for RemoveCustomCss {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for RemoveCustomCss {
    fn name(&self) -> &'static str {
        "remove-custom-css"
    }

    fn process_cell(&mut self, cell: &mut Cell, diag: &mut Diagnostics) -> Result<()> {
        let previous = self.state;
        self.state = previous.advance(&cell.source);

        if let (CssSearch::Scanning { .. }, CssSearch::Found { index }) = (previous, self.state) {
            diag.debug(format!("Found custom CSS cell @ cells[{}]", index));
        }
        Ok(())
    }

    fn finish(&mut self, notebook: &mut Notebook, diag: &mut Diagnostics) -> Result<()> {
        let CssSearch::Found { index } = self.state else {
            return Ok(());
        };

        if index >= notebook.cells.len() {
            return Err(ViewerError::Processor {
                name: self.name(),
                message: format!(
                    "recorded cell {} but notebook has {} cells",
                    index,
                    notebook.cells.len()
                ),
            });
        }

        notebook.cells.remove(index);
        diag.debug(format!("Removed cell #{} [custom css]", index));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;

    fn css_cell() -> Cell {
        Cell::code(format!(
            "{}\nHTML(open('custom.css').read())",
            CUSTOM_CSS_MARKER
        ))
    }

    fn run(notebook: &mut Notebook) -> Diagnostics {
        let mut diag = Diagnostics::new();
        let mut processors: Vec<Box<dyn Processor>> = vec![Box::new(RemoveCustomCss::new())];
        preprocess(notebook, &mut processors, &mut diag).unwrap();
        diag
    }

    #[test]
    fn test_state_transitions() {
        let state = CssSearch::Scanning { seen: 0 }
            .advance("a")
            .advance("b")
            .advance(CUSTOM_CSS_MARKER);
        assert_eq!(state, CssSearch::Found { index: 2 });
        assert_eq!(state.advance(CUSTOM_CSS_MARKER), state);
        assert_eq!(state.advance("c"), state);
    }

    #[test]
    fn test_removes_marker_cell() {
        let mut notebook = Notebook::with_cells(vec![
            Cell::markdown("zero"),
            Cell::markdown("one"),
            Cell::markdown("two"),
            css_cell(),
            Cell::markdown("four"),
        ]);
        let removed = notebook.cells[3].clone();

        let diag = run(&mut notebook);

        assert_eq!(notebook.cells.len(), 4);
        assert!(!notebook.cells.contains(&removed));
        assert_eq!(notebook.cells[3].source, "four");
        assert_eq!(diag.records().len(), 2);
    }

    #[test]
    fn test_only_first_marker_cell_removed() {
        let mut notebook = Notebook::with_cells(vec![
            Cell::markdown("zero"),
            css_cell(),
            Cell::markdown("two"),
            css_cell(),
        ]);

        run(&mut notebook);

        assert_eq!(notebook.cells.len(), 3);
        assert_eq!(notebook.cells[0].source, "zero");
        assert_eq!(notebook.cells[1].source, "two");
        assert!(notebook.cells[2].source.contains(CUSTOM_CSS_MARKER));
    }

    #[test]
    fn test_no_marker_leaves_notebook_alone() {
        let mut notebook =
            Notebook::with_cells(vec![Cell::markdown("zero"), Cell::code("print(1)")]);
        let before = notebook.clone();

        let diag = run(&mut notebook);

        assert_eq!(notebook, before);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_stale_index_is_an_error() {
        let mut processor = RemoveCustomCss::new();
        let mut diag = Diagnostics::new();
        let mut cell = css_cell();
        assert_eq!(processor.state(), CssSearch::Scanning { seen: 0 });
        processor.process_cell(&mut cell, &mut diag).unwrap();
        assert_eq!(processor.state(), CssSearch::Found { index: 0 });

        let mut empty = Notebook::new();
        let err = processor.finish(&mut empty, &mut diag).unwrap_err();

        assert!(matches!(
            err,
            ViewerError::Processor {
                name: "remove-custom-css",
                ..
            }
        ));
    }
}
