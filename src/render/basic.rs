//! Simplified regex-based markdown renderer.
//!
//! Covers the subset of markdown that actually occurs in the corpus:
//! headings, fenced code, inline code, blockquotes, emphasis, lists, links,
//! and paragraphs. Used as the fallback when the primary engine is
//! unavailable or fails.

use anyhow::Result;
use regex::{Captures, Regex};

use super::{escape_html, MarkdownRenderer};

pub struct BasicRenderer {
    fence: Regex,
    heading: Regex,
    inline_code: Regex,
    blockquote: Regex,
    bold: Regex,
    italic: Regex,
    ordered_item: Regex,
    bullet_item: Regex,
    link: Regex,
    block_start: Regex,
}

impl Default for BasicRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicRenderer {
    pub fn new() -> Self {
        // Patterns are literals; compilation cannot fail.
        Self {
            fence: Regex::new(r"(?s)```(.*?)```").unwrap(),
            heading: Regex::new(r"(?m)^(#{1,6}) +(.*)$").unwrap(),
            inline_code: Regex::new(r"`([^`]+)`").unwrap(),
            blockquote: Regex::new(r"(?m)^&gt; (.+)$").unwrap(),
            bold: Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
            italic: Regex::new(r"\*([^*\n]+)\*").unwrap(),
            ordered_item: Regex::new(r"(?m)^\d+\. (.+)$").unwrap(),
            bullet_item: Regex::new(r"(?m)^[-*] (.+)$").unwrap(),
            link: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap(),
            block_start: Regex::new(r"^<(h[1-6]|pre|ul|ol|blockquote)").unwrap(),
        }
    }
}

impl MarkdownRenderer for BasicRenderer {
    fn render(&self, body: &str) -> Result<String> {
        // Everything is escaped first; markdown constructs are then rebuilt
        // from the escaped text, so raw HTML in the source displays as text.
        let mut text = escape_html(body);

        text = self
            .fence
            .replace_all(&text, |caps: &Captures| {
                format!("<pre><code>{}</code></pre>", caps[1].trim())
            })
            .into_owned();

        text = self
            .heading
            .replace_all(&text, |caps: &Captures| {
                let level = caps[1].len();
                format!("<h{level}>{}</h{level}>", &caps[2])
            })
            .into_owned();

        text = self
            .inline_code
            .replace_all(&text, "<code>$1</code>")
            .into_owned();
        text = self
            .blockquote
            .replace_all(&text, "<blockquote><p>$1</p></blockquote>")
            .into_owned();
        text = self.bold.replace_all(&text, "<strong>$1</strong>").into_owned();
        text = self.italic.replace_all(&text, "<em>$1</em>").into_owned();

        text = self
            .ordered_item
            .replace_all(&text, "<ol><li>$1</li></ol>")
            .into_owned();
        text = text.replace("</ol>\n<ol>", "");
        text = self
            .bullet_item
            .replace_all(&text, "<ul><li>$1</li></ul>")
            .into_owned();
        text = text.replace("</ul>\n<ul>", "");

        text = self
            .link
            .replace_all(&text, r#"<a href="$2" target="_blank" rel="noopener noreferrer">$1</a>"#)
            .into_owned();

        // Paragraphs: blank-line separated chunks, except block elements.
        let paragraphs: Vec<String> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                if self.block_start.is_match(chunk) {
                    chunk.to_string()
                } else {
                    format!("<p>{}</p>", chunk.replace('\n', "<br>"))
                }
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
