//! Range filter: trims a notebook to the cells between two marker strings.

use nbview_engine::Notebook;

use crate::diagnostics::Diagnostics;

/// Keep only the cells from the first one containing `start_tag` up to, but
/// not including, the first one containing `end_tag`.
///
/// Missing tags default to the start and end of the notebook, and empty tags
/// count as missing. With neither tag given the notebook is returned
/// untouched. A tag that matches no cell produces a warning, never an error.
///
/// A start match in cell 0 cannot be told apart from "no match": index 0 is
/// also the "not yet found" value. Such a match leaves the search open, so a
/// later matching cell wins, and the not-found warning is still emitted.
pub fn filter_start_end<'a>(
    notebook: &'a mut Notebook,
    start_tag: Option<&str>,
    end_tag: Option<&str>,
    diag: &mut Diagnostics,
) -> &'a mut Notebook {
    let start_tag = start_tag.filter(|tag| !tag.is_empty());
    let end_tag = end_tag.filter(|tag| !tag.is_empty());

    if start_tag.is_none() && end_tag.is_none() {
        return notebook;
    }

    let num_cells = notebook.cells.len();
    let mut start = 0;
    let mut end = num_cells;

    for (index, cell) in notebook.cells.iter().enumerate() {
        if let Some(tag) = start_tag
            && start == 0
            && cell.source.contains(tag)
        {
            start = index;
        }
        if let Some(tag) = end_tag
            && end == num_cells
            && cell.source.contains(tag)
        {
            end = index;
        }
    }

    if let Some(tag) = start_tag
        && start == 0
    {
        diag.warn(format!("No cell with start content: {} found", tag));
    }
    if let Some(tag) = end_tag
        && end == num_cells
    {
        diag.warn(format!("No cell with end content: {} found", tag));
    }

    if start >= end {
        notebook.cells.clear();
    } else {
        notebook.cells.truncate(end);
        notebook.cells.drain(..start);
    }

    notebook
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbview_engine::Cell;

    /// Seven cells; cell 2 holds "A" and cell 5 holds "B".
    fn tagged_notebook() -> Notebook {
        Notebook::with_cells(
            ["intro", "setup", "A begins", "work", "more work", "B ends", "appendix"]
                .into_iter()
                .map(Cell::markdown)
                .collect(),
        )
    }

    fn sources(notebook: &Notebook) -> Vec<&str> {
        notebook.cells.iter().map(|c| c.source.as_str()).collect()
    }

    #[test]
    fn test_no_tags_returns_same_notebook() {
        let mut notebook = tagged_notebook();
        let before = notebook.clone();
        let address = &notebook as *const Notebook;
        let mut diag = Diagnostics::new();

        let result = filter_start_end(&mut notebook, None, None, &mut diag);

        assert!(std::ptr::eq(result as *const Notebook, address));
        assert_eq!(*result, before);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_start_and_end_tags() {
        let mut notebook = tagged_notebook();
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("A"), Some("B"), &mut diag);

        assert_eq!(sources(&notebook), vec!["A begins", "work", "more work"]);
        assert_eq!(diag.warnings().count(), 0);
    }

    #[test]
    fn test_missing_start_keeps_everything_and_warns() {
        let mut notebook = tagged_notebook();
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("nowhere"), None, &mut diag);

        assert_eq!(notebook.cells.len(), 7);
        let warnings: Vec<_> = diag.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("nowhere"));
    }

    #[test]
    fn test_missing_end_runs_to_last_cell() {
        let mut notebook = tagged_notebook();
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("work"), Some("nowhere"), &mut diag);

        assert_eq!(
            sources(&notebook),
            vec!["work", "more work", "B ends", "appendix"]
        );
        assert_eq!(diag.warnings().count(), 1);
    }

    #[test]
    fn test_first_match_wins() {
        let mut notebook = Notebook::with_cells(vec![
            Cell::markdown("zero"),
            Cell::markdown("start 1"),
            Cell::markdown("start 2"),
            Cell::markdown("end 1"),
            Cell::markdown("end 2"),
        ]);
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("start"), Some("end"), &mut diag);

        assert_eq!(sources(&notebook), vec!["start 1", "start 2"]);
    }

    #[test]
    fn test_end_before_start_yields_empty() {
        let mut notebook = tagged_notebook();
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("B"), Some("A"), &mut diag);

        assert!(notebook.cells.is_empty());
        assert!(diag.is_empty());
    }

    #[test]
    fn test_same_cell_for_both_tags_yields_empty() {
        let mut notebook = tagged_notebook();
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("work"), Some("work"), &mut diag);

        assert!(notebook.cells.is_empty());
    }

    #[test]
    fn test_start_match_in_first_cell_looks_unmatched() {
        let mut notebook = Notebook::with_cells(vec![
            Cell::markdown("marker here"),
            Cell::markdown("body"),
            Cell::markdown("marker again"),
        ]);
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some("marker"), None, &mut diag);

        assert_eq!(sources(&notebook), vec!["marker again"]);
        assert_eq!(diag.warnings().count(), 0);

        let mut only_first = Notebook::with_cells(vec![
            Cell::markdown("marker here"),
            Cell::markdown("body"),
        ]);
        let mut diag = Diagnostics::new();

        filter_start_end(&mut only_first, Some("marker"), None, &mut diag);

        assert_eq!(only_first.cells.len(), 2);
        assert_eq!(diag.warnings().count(), 1);
    }

    #[test]
    fn test_empty_tags_count_as_missing() {
        let mut notebook = tagged_notebook();
        let mut diag = Diagnostics::new();

        filter_start_end(&mut notebook, Some(""), Some(""), &mut diag);

        assert_eq!(notebook.cells.len(), 7);
        assert!(diag.is_empty());
    }
}
