//! Rewriting of `<img src>` paths to absolute URLs.

use std::sync::LazyLock;

use nbview_engine::Cell;
use regex::Regex;

use super::Processor;
use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// `src` attribute values of `<img>` tags (group 1).
static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\b[^>]*?\ssrc="([^"]+)""#).expect("Invalid regex pattern for img src")
});

/// Points every `<img src="...">` in cell sources at `images_url`, keeping
/// only the file name of the original path.
#[derive(Debug, Clone)]
pub struct ImageReplacement {
    images_url: String,
}

impl ImageReplacement {
    pub fn new(images_url: impl Into<String>) -> Self {
        Self {
            images_url: images_url.into(),
        }
    }

    /// Rewrite all image sources in `source`.
    ///
    /// Each distinct src value is replaced everywhere it occurs, so repeated
    /// references to one image need a single substitution.
    pub fn rewrite(&self, source: &str) -> String {
        let mut srcs: Vec<&str> = Vec::new();
        for captures in IMG_SRC.captures_iter(source) {
            if let Some(src) = captures.get(1).map(|m| m.as_str())
                && !srcs.contains(&src)
            {
                srcs.push(src);
            }
        }

        let mut rewritten = source.to_string();
        for src in srcs {
            let file_name = src.rsplit('/').next().unwrap_or(src);
            let target = format!("{}{}", self.images_url, file_name);
            if target != src {
                rewritten = rewritten.replace(src, &target);
            }
        }
        rewritten
    }
}

impl Processor for ImageReplacement {
    fn name(&self) -> &'static str {
        "image-replacement"
    }

    fn process_cell(&mut self, cell: &mut Cell, _diag: &mut Diagnostics) -> Result<()> {
        if cell.source.contains("<img") {
            cell.source = self.rewrite(&cell.source);
        }
        Ok(())
    }
}
