//! String rewrites applied to the exported HTML.
//!
//! Both are plain text substitutions over the whole page; neither parses
//! the markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::diagnostics::Diagnostics;

/// Selector of the notebook wrapper whose stylesheet rule draws the page
/// box shadow.
pub const NOTEBOOK_CONTAINER: &str = "#notebook-container";

/// Replacement selector that matches nothing.
pub const CONTAINER_PLACEHOLDER: &str = "#doesnotexisthere";

/// Attribute inserted into every anchor open tag.
pub const TARGET_BLANK: &str = r#" target="_blank""#;

/// `<a>` or `<a ...>`; stops at the first `>` so one match never spans two
/// tags, and does not match `<abbr>`, `<aside>` and friends.
static ANCHOR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a(?:\s[^>]*)?>").expect("Invalid regex pattern for anchors"));

/// Run the fixed rewrite sequence: container strip, then link targets.
pub fn postprocess(html: &str, diag: &mut Diagnostics) -> String {
    let html = remove_box_shadow(html, diag);
    insert_target_blank(&html)
}

/// Replace every literal [`NOTEBOOK_CONTAINER`] with [`CONTAINER_PLACEHOLDER`].
///
/// Occurrences inside prose are rewritten too.
pub fn remove_box_shadow(html: &str, diag: &mut Diagnostics) -> String {
    match html.find(NOTEBOOK_CONTAINER) {
        Some(position) => diag.debug(format!(
            "Found {} class at byte {}",
            NOTEBOOK_CONTAINER, position
        )),
        None => diag.debug(format!("No {} class found", NOTEBOOK_CONTAINER)),
    }
    html.replace(NOTEBOOK_CONTAINER, CONTAINER_PLACEHOLDER)
}

/// Insert [`TARGET_BLANK`] right after `<a` in every anchor open tag.
pub fn insert_target_blank(html: &str) -> String {
    ANCHOR_OPEN
        .replace_all(html, |captures: &Captures| {
            let tag = &captures[0];
            format!("{}{}{}", &tag[..2], TARGET_BLANK, &tag[2..])
        })
        .into_owned()
}
