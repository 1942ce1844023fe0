//! Table-of-contents extraction and scroll-spy.
//!
//! Two independent extraction paths exist because the source view has no
//! rendered document to scan: one walks heading lines in raw markdown, the
//! other walks heading elements in rendered HTML. Both share [`slugify`], so
//! identical headings resolve to the same anchor id in either view.

use regex::{Captures, Regex};

/// One entry in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Slug rule shared by both extraction paths: lowercase, strip characters
/// that are not word characters, spaces, or hyphens, collapse whitespace to
/// hyphens, collapse repeated hyphens, trim leading and trailing hyphens.
/// Collisions between identical headings are not de-duplicated.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = !slug.is_empty();
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch);
        }
        // Anything else is stripped.
    }

    slug
}

/// Scan raw markdown for ATX headings (`#` x 1-6 followed by whitespace),
/// skipping fenced code blocks.
pub fn from_markdown(body: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if !(1..=6).contains(&hashes) {
            continue;
        }
        let rest = &trimmed[hashes..];
        if !rest.starts_with(' ') && !rest.starts_with('\t') {
            continue;
        }
        let text = rest.trim().to_string();
        if text.is_empty() {
            continue;
        }

        entries.push(TocEntry {
            id: slugify(&text),
            text,
            level: hashes as u8,
        });
    }

    entries
}

/// Scan rendered HTML for heading elements in document order and assign each
/// one a navigable anchor id derived from its text. Headings that already
/// carry an id keep it. Returns the annotated HTML alongside the entries.
pub fn annotate_html(html: &str) -> (String, Vec<TocEntry>) {
    // Closing tag level is not back-referenced; mismatched heading pairs do
    // not occur in renderer output.
    let heading = Regex::new(r"(?s)<h([1-6])((?:\s[^>]*)?)>(.*?)</h[1-6]>").unwrap();
    let existing_id = Regex::new(r#"id="([^"]*)""#).unwrap();
    let tag = Regex::new(r"<[^>]*>").unwrap();

    let mut entries = Vec::new();
    let annotated = heading.replace_all(html, |caps: &Captures| {
        let level: u8 = caps[1].parse().unwrap_or(1);
        let attrs = caps[2].to_string();
        let inner = &caps[3];

        let text = unescape(&tag.replace_all(inner, "")).trim().to_string();
        let slug = slugify(&text);

        let (id, attrs) = match existing_id.captures(&attrs) {
            Some(found) => (found[1].to_string(), attrs),
            None => (slug, format!("{} id=\"{}\"", attrs, slugify(&text))),
        };

        entries.push(TocEntry { id, text, level });
        format!("<h{level}{attrs}>{inner}</h{level}>")
    });

    (annotated.into_owned(), entries)
}

/// Entries only, for callers that do not need the annotated HTML.
pub fn from_html(html: &str) -> Vec<TocEntry> {
    annotate_html(html).1
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// A heading's vertical position within the scrollable content pane,
/// measured from the top of the content.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingOffset {
    pub id: String,
    pub offset: f64,
}

/// Active-section rule for scroll-spy: the closest heading within the top
/// third of the viewport wins; if none qualifies, the last heading above the
/// viewport top is active. Re-evaluated on every (throttled) scroll event.
pub fn active_section(headings: &[HeadingOffset], scroll_top: f64, viewport_height: f64) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for heading in headings {
        let relative_top = heading.offset - scroll_top;
        if relative_top >= 0.0 && relative_top <= viewport_height / 3.0 {
            match best {
                Some((_, current)) if current <= relative_top => {}
                _ => best = Some((&heading.id, relative_top)),
            }
        }
    }
    if let Some((id, _)) = best {
        return Some(id);
    }

    headings
        .iter()
        .rev()
        .find(|heading| heading.offset - scroll_top < 0.0)
        .map(|heading| heading.id.as_str())
}
