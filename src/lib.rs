//! # Promptdeck - curated prompt gallery browser
//!
//! Promptdeck is a browser for curated collections of reusable markdown
//! assets: prompts, instruction sets, and chat modes. It loads a combined
//! catalog, filters and paginates it, and drives a preview modal with
//! rendered markdown, a table of contents, and shareable deep links.
//!
//! ## Overview
//!
//! The library is the whole browser: every flow is a plain state transition
//! over injected seams (a [`content::ContentFetcher`] for IO, a
//! [`render::MarkdownRenderer`] for HTML, caller-supplied instants for
//! time). The CLI in `main.rs` is one thin driver over it.
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog payload parsing, lookup, filtering, and adjacency
//! - [`content`] - Content fetching, session cache, and fallback samples
//! - [`render`] - Markdown rendering with front matter splitting
//! - [`toc`] - Heading extraction, slugs, and scroll-spy
//! - [`preview`] - The preview modal state machine
//! - [`pagination`] - Paged and infinite-scroll list consumption
//! - [`urlstate`] - Deep-link fragment codec and navigable history
//! - [`keys`] - Keyboard dispatch
//! - [`app`] - The [`app::Browser`] context wiring everything together
//!
//! ## Example
//!
//! ```no_run
//! use promptdeck::app::Browser;
//! use promptdeck::catalog::Catalog;
//! use promptdeck::content::HttpFetcher;
//! use promptdeck::pagination::PaginationMode;
//! use promptdeck::render::CmarkRenderer;
//! use std::time::Duration;
//!
//! let catalog = Catalog::from_json(r#"{"prompts": []}"#).expect("catalog");
//! let mut browser = Browser::new(
//!     catalog,
//!     Box::new(HttpFetcher::new(Duration::from_secs(10))),
//!     Box::new(CmarkRenderer),
//!     PaginationMode::Paged,
//!     12,
//! );
//! browser.set_search("rust");
//! println!("{}", browser.stats());
//! ```

pub mod app;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod content;
pub mod keys;
pub mod pagination;
pub mod preview;
pub mod render;
pub mod timing;
pub mod toc;
pub mod ui;
pub mod urlstate;
