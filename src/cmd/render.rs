//! Terminal markdown rendering with ANSI formatting.

use colored::Colorize;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use promptdeck::ui;

/// Render markdown to stdout, mapping headings, emphasis, code, lists, and
/// blockquotes to terminal styling.
pub fn render_markdown(markdown: &str) {
    let parser = Parser::new(markdown);
    let mut renderer = TerminalRenderer::new();

    for event in parser {
        renderer.handle_event(event);
    }

    renderer.flush();
}

struct TerminalRenderer {
    buffer: String,
    in_bold: bool,
    in_italic: bool,
    heading_level: usize,
    list_depth: usize,
    ordered_counters: Vec<usize>,
    link_url: Option<String>,
}

impl TerminalRenderer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            in_bold: false,
            in_italic: false,
            heading_level: 0,
            list_depth: 0,
            ordered_counters: Vec::new(),
            link_url: None,
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.handle_start(tag),
            Event::End(tag_end) => self.handle_end(tag_end),
            Event::Text(text) => self.buffer.push_str(&text),
            Event::Code(text) => {
                self.buffer.push('`');
                self.buffer.push_str(&text);
                self.buffer.push('`');
            }
            Event::SoftBreak | Event::HardBreak => self.buffer.push('\n'),
            Event::Rule => {
                self.flush();
                println!("{}", ui::format::separator(40).dimmed());
            }
            _ => {}
        }
    }

    fn handle_start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading_level = match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                };
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.buffer.clear();
            }
            Tag::Emphasis => self.in_italic = true,
            Tag::Strong => self.in_bold = true,
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
            }
            Tag::List(start) => {
                self.flush();
                self.list_depth += 1;
                self.ordered_counters.push(start.map(|n| n as usize).unwrap_or(0));
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                if let Some(counter) = self.ordered_counters.last_mut() {
                    if *counter > 0 {
                        print!("{}{}. ", indent, counter);
                        *counter += 1;
                    } else {
                        print!("{}• ", indent);
                    }
                }
            }
            Tag::BlockQuote => {
                self.flush();
                print!("{}", "> ".dimmed());
            }
            _ => {}
        }
    }

    fn handle_end(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Heading(_) => {
                println!(
                    "{}",
                    ui::colors::markdown_heading(&self.buffer, self.heading_level)
                );
                println!();
                self.buffer.clear();
                self.heading_level = 0;
            }
            TagEnd::Paragraph => {
                if !self.buffer.is_empty() {
                    println!("{}", self.styled());
                    self.buffer.clear();
                }
                println!();
            }
            TagEnd::CodeBlock => {
                for line in self.buffer.lines() {
                    println!("{}", line.dimmed());
                }
                self.buffer.clear();
                println!();
            }
            TagEnd::Emphasis => self.in_italic = false,
            TagEnd::Strong => self.in_bold = false,
            TagEnd::Link => {
                if let Some(url) = self.link_url.take() {
                    // Keep the target visible: `text (url)`.
                    if url != self.buffer {
                        self.buffer.push_str(&format!(" ({})", url));
                    }
                }
            }
            TagEnd::List(_) => {
                if self.list_depth > 0 {
                    self.list_depth -= 1;
                    self.ordered_counters.pop();
                }
                println!();
            }
            TagEnd::Item => {
                if !self.buffer.is_empty() {
                    println!("{}", self.styled());
                    self.buffer.clear();
                }
            }
            _ => {}
        }
    }

    fn styled(&self) -> String {
        if self.in_bold && self.in_italic {
            self.buffer.bold().italic().to_string()
        } else if self.in_bold {
            self.buffer.bold().to_string()
        } else if self.in_italic {
            self.buffer.italic().to_string()
        } else {
            self.buffer.clone()
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            print!("{}", self.styled());
            self.buffer.clear();
        }
    }
}
