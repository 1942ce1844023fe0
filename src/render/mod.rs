//! Markdown rendering seam.
//!
//! Two interchangeable renderers implement one capability interface: the
//! pulldown-cmark engine and a simplified regex-based one. The engine is
//! selected once at startup; application logic never branches per call.
//! Front-matter extraction is the caller's responsibility and happens here,
//! before the renderer sees the body.

use anyhow::Result;

pub mod basic;

pub use basic::BasicRenderer;

/// Split content into front matter and body.
///
/// Front matter is the text between the first `---` delimiter line and the
/// next one. Malformed or absent front matter is treated as empty, never as
/// an error.
pub fn split_front_matter(content: &str) -> (Option<String>, &str) {
    let trimmed = content.trim_start();

    let Some(rest) = trimmed.strip_prefix("---") else {
        return (None, content);
    };
    // The opening delimiter must be a whole line.
    let Some(rest) = rest.strip_prefix('\n') else {
        return (None, content);
    };

    // The closing delimiter must be a whole `---` line too; a longer dash
    // run or trailing text does not close the block.
    let (end, after) = if let Some(i) = rest.find("\n---\n") {
        (i, i + 5)
    } else if rest.ends_with("\n---") {
        (rest.len() - 4, rest.len())
    } else {
        return (None, content);
    };

    let front_matter = rest[..end].to_string();
    let body = rest[after..].trim_start_matches('\n');
    (Some(front_matter), body)
}

/// Parse a front matter block as YAML for display. Returns None when the
/// block is not a mapping.
pub fn parse_front_matter(front_matter: &str) -> Option<serde_yaml::Mapping> {
    serde_yaml::from_str::<serde_yaml::Value>(front_matter)
        .ok()
        .and_then(|value| value.as_mapping().cloned())
}

/// Converts a markdown body (front matter already removed) to HTML.
pub trait MarkdownRenderer {
    fn render(&self, body: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Primary renderer backed by pulldown-cmark with all extensions enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, body: &str) -> Result<String> {
        use pulldown_cmark::{html, Options, Parser};

        let parser = Parser::new_ext(body, Options::all());
        let mut output = String::new();
        html::push_html(&mut output, parser);
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "cmark"
    }
}

/// A fully rendered document: extracted front matter plus body HTML.
#[derive(Debug, Clone)]
pub struct RenderedDoc {
    pub front_matter: Option<String>,
    pub html: String,
}

/// Split front matter and render the body. A failure of the configured
/// renderer falls back to the simplified renderer rather than surfacing an
/// error; render failures never take the preview down.
pub fn render_document(renderer: &dyn MarkdownRenderer, content: &str) -> RenderedDoc {
    let (front_matter, body) = split_front_matter(content);
    let html = match renderer.render(body) {
        Ok(html) => html,
        Err(_) => BasicRenderer::new().render(body).unwrap_or_default(),
    };
    RenderedDoc { front_matter, html }
}

/// Escape text for embedding in HTML.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
