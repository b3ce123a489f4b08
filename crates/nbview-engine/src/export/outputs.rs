//! Rendering of code cell outputs.
//!
//! Each output becomes one `div.output_area`. Rich outputs pick the first
//! available representation in [`MIME_PRIORITY`] order.

use std::fmt::Write as _;
use std::sync::LazyLock;

use base64::Engine;
use regex::Regex;

use super::{escape_html, prompt, render_markdown};
use crate::error::{EngineError, EngineResult};
use crate::notebook::{MimeBundle, Output};

/// Representations tried for rich outputs, richest first.
pub const MIME_PRIORITY: [&str; 6] = [
    "text/html",
    "image/svg+xml",
    "image/png",
    "image/jpeg",
    "text/markdown",
    "text/plain",
];

/// ANSI color/control sequences, as found in IPython tracebacks.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("Invalid regex pattern for ANSI escapes")
});

pub(super) fn render_output(html: &mut String, output: &Output) -> EngineResult<()> {
    match output {
        Output::Stream { name, text } => {
            let _ = writeln!(
                html,
                "<div class=\"output_area\">\n<div class=\"prompt\"></div>\n<div class=\"output_subarea output_stream output_{}\">\n<pre>{}</pre>\n</div>\n</div>",
                escape_html(name),
                escape_html(text)
            );
        }
        Output::ExecuteResult {
            execution_count,
            data,
            ..
        } => {
            let body = render_bundle(data)?;
            let _ = writeln!(
                html,
                "<div class=\"output_area\">\n<div class=\"prompt output_prompt\">{}</div>\n{}\n</div>",
                prompt("Out", *execution_count),
                body
            );
        }
        Output::DisplayData { data, .. } => {
            let body = render_bundle(data)?;
            let _ = writeln!(
                html,
                "<div class=\"output_area\">\n<div class=\"prompt\"></div>\n{}\n</div>",
                body
            );
        }
        Output::Error {
            ename,
            evalue,
            traceback,
        } => {
            let text = if traceback.is_empty() {
                format!("{}: {}", ename, evalue)
            } else {
                traceback.join("\n")
            };
            let _ = writeln!(
                html,
                "<div class=\"output_area\">\n<div class=\"prompt\"></div>\n<div class=\"output_subarea output_text output_error\">\n<pre>{}</pre>\n</div>\n</div>",
                escape_html(&strip_ansi(&text))
            );
        }
    }
    Ok(())
}

fn render_bundle(data: &MimeBundle) -> EngineResult<String> {
    for mime in MIME_PRIORITY {
        let rendered = match mime {
            "text/html" => data
                .text_html
                .as_ref()
                .map(|s| subarea("output_html rendered_html", s)),
            "image/svg+xml" => data.image_svg.as_ref().map(|s| subarea("output_svg", s)),
            "image/png" => data
                .image_png
                .as_deref()
                .map(|payload| image_tag("png", payload))
                .transpose()?,
            "image/jpeg" => data
                .image_jpeg
                .as_deref()
                .map(|payload| image_tag("jpeg", payload))
                .transpose()?,
            "text/markdown" => data
                .text_markdown
                .as_deref()
                .map(render_markdown)
                .transpose()?
                .map(|s| subarea("output_markdown rendered_html", &s)),
            "text/plain" => data.text_plain.as_ref().map(|s| {
                subarea(
                    "output_text",
                    &format!("<pre>{}</pre>", escape_html(&strip_ansi(s))),
                )
            }),
            _ => None,
        };
        if let Some(rendered) = rendered {
            return Ok(rendered);
        }
    }
    Ok(subarea("output_text", ""))
}

fn subarea(class: &str, body: &str) -> String {
    format!("<div class=\"output_subarea {}\">\n{}\n</div>", class, body)
}

/// Inline a base64 image, rejecting payloads that do not decode.
fn image_tag(kind: &str, payload: &str) -> EngineResult<String> {
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(&cleaned)
        .map_err(|e| EngineError::RenderError(format!("invalid image/{} payload: {}", kind, e)))?;
    Ok(subarea(
        &format!("output_{}", kind),
        &format!("<img src=\"data:image/{};base64,{}\">", kind, cleaned),
    ))
}

pub(crate) fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
