//! Cell transform pipeline.
//!
//! A [`Processor`] sees every cell of one notebook in order and may then
//! run a `finish` step over the whole notebook. Cell contents may change at
//! any point; the cell list only changes in `finish`, after the traversal.

mod custom_css;
mod images;

pub use custom_css::{CUSTOM_CSS_MARKER, CssSearch, RemoveCustomCss};
pub use images::ImageReplacement;

use nbview_engine::{Cell, Notebook};

use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// A stateful cell visitor, constructed fresh for each notebook.
pub trait Processor {
    /// Short name used in error messages.
    fn name(&self) -> &'static str;

    /// Visit one cell.
    fn process_cell(&mut self, cell: &mut Cell, diag: &mut Diagnostics) -> Result<()>;

    /// Called once after every cell has been visited.
    fn finish(&mut self, _notebook: &mut Notebook, _diag: &mut Diagnostics) -> Result<()> {
        Ok(())
    }
}

/// Run `processors` over `notebook`.
///
/// Each cell is handed to every processor, in list order, before moving to
/// the next cell. Then each processor's `finish` runs, again in list order.
/// The first error aborts the run.
pub fn preprocess(
    notebook: &mut Notebook,
    processors: &mut [Box<dyn Processor>],
    diag: &mut Diagnostics,
) -> Result<()> {
    for cell in notebook.cells.iter_mut() {
        for processor in processors.iter_mut() {
            processor.process_cell(cell, diag)?;
        }
    }

    for processor in processors.iter_mut() {
        processor.finish(notebook, diag)?;
    }

    Ok(())
}

/// The standard processor list: custom CSS removal, plus image path
/// rewriting when an images base URL is given.
pub fn default_processors(images_url: Option<&str>) -> Vec<Box<dyn Processor>> {
    let mut processors: Vec<Box<dyn Processor>> = vec![Box::new(RemoveCustomCss::new())];
    if let Some(images_url) = images_url.filter(|url| !url.is_empty()) {
        processors.push(Box::new(ImageReplacement::new(images_url)));
    }
    processors
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::error::ViewerError;

    /// Records `(processor, source)` for every call, into a shared log.
    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Processor for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn process_cell(&mut self, cell: &mut Cell, _diag: &mut Diagnostics) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("{}:{}", self.label, cell.source));
            cell.source.push_str(self.label);
            Ok(())
        }

        fn finish(&mut self, _notebook: &mut Notebook, _diag: &mut Diagnostics) -> Result<()> {
            self.log.borrow_mut().push(format!("{}:finish", self.label));
            Ok(())
        }
    }

    struct FailOn(&'static str);

    impl Processor for FailOn {
        fn name(&self) -> &'static str {
            "fail-on"
        }

        fn process_cell(&mut self, cell: &mut Cell, _diag: &mut Diagnostics) -> Result<()> {
            if cell.source.contains(self.0) {
                return Err(ViewerError::Processor {
                    name: self.name(),
                    message: format!("refusing {}", cell.source),
                });
            }
            Ok(())
        }
    }

    fn notebook(sources: &[&str]) -> Notebook {
        Notebook::with_cells(sources.iter().copied().map(Cell::code).collect())
    }

    #[test]
    fn test_cells_visited_by_all_processors_before_advancing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut processors: Vec<Box<dyn Processor>> = vec![
            Box::new(Recorder {
                label: "a",
                log: Rc::clone(&log),
            }),
            Box::new(Recorder {
                label: "b",
                log: Rc::clone(&log),
            }),
        ];
        let mut nb = notebook(&["0", "1"]);
        let mut diag = Diagnostics::new();

        preprocess(&mut nb, &mut processors, &mut diag).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["a:0", "b:0a", "a:1", "b:1a", "a:finish", "b:finish"]
        );
        assert_eq!(nb.cells[0].source, "0ab");
    }

    #[test]
    fn test_error_aborts_before_finish() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut processors: Vec<Box<dyn Processor>> = vec![
            Box::new(FailOn("bad")),
            Box::new(Recorder {
                label: "r",
                log: Rc::clone(&log),
            }),
        ];
        let mut nb = notebook(&["ok", "bad", "never"]);
        let mut diag = Diagnostics::new();

        let err = preprocess(&mut nb, &mut processors, &mut diag).unwrap_err();

        assert!(matches!(err, ViewerError::Processor { name: "fail-on", .. }));
        assert_eq!(*log.borrow(), vec!["r:ok"]);
    }

    #[test]
    fn test_default_processors() {
        assert_eq!(default_processors(None).len(), 1);
        assert_eq!(default_processors(Some("")).len(), 1);

        let names: Vec<_> = default_processors(Some("http://y/"))
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["remove-custom-css", "image-replacement"]);
    }
}
