//! Common test helpers for integration tests

use promptdeck::app::Browser;
use promptdeck::catalog::Catalog;
use promptdeck::content::InMemoryFetcher;
use promptdeck::pagination::PaginationMode;
use promptdeck::render::CmarkRenderer;

/// Catalog payload covering all three item types.
pub fn sample_payload() -> &'static str {
    r#"{
        "prompts": [
            {
                "title": "Rust Review",
                "description": "Review Rust code for idiomatic style",
                "file": "rust-review.prompt.md",
                "link": "https://github.com/example/deck/blob/main/prompts/rust-review.prompt.md"
            },
            {
                "title": "API Design",
                "description": "Design a REST API",
                "file": "api-design.prompt.md",
                "link": "https://github.com/example/deck/blob/main/prompts/api-design.prompt.md"
            }
        ],
        "instructions": [
            {
                "title": "Angular",
                "description": "Angular project conventions",
                "file": "angular.instructions.md",
                "link": "https://github.com/example/deck/blob/main/instructions/angular.instructions.md"
            }
        ],
        "chatmodes": [
            {
                "title": "Planner",
                "description": "Planning-focused chat mode",
                "file": "planner.chatmode.md",
                "link": "https://github.com/example/deck/blob/main/chatmodes/planner.chatmode.md"
            }
        ]
    }"#
}

pub fn sample_catalog() -> Catalog {
    Catalog::from_json(sample_payload()).expect("sample payload parses")
}

/// Fetcher table keyed by the normalized raw URLs of the sample catalog.
pub fn sample_fetcher() -> InMemoryFetcher {
    InMemoryFetcher::with_documents(vec![
        (
            "https://raw.githubusercontent.com/example/deck/main/prompts/rust-review.prompt.md",
            "---\nmode: agent\ndescription: 'Review Rust code'\n---\n\n# Rust Review\n\n## Checklist\n\n- Ownership\n- Error handling\n\n## Output Format\n\nFindings as a list.\n",
        ),
        (
            "https://raw.githubusercontent.com/example/deck/main/prompts/api-design.prompt.md",
            "# API Design\n\nDesign the resource model first.\n",
        ),
        (
            "https://raw.githubusercontent.com/example/deck/main/instructions/angular.instructions.md",
            "# Angular\n\n## Components\n\nStandalone components only.\n",
        ),
    ])
}

/// Browser over the sample catalog with an in-memory fetcher.
pub fn browser(mode: PaginationMode, page_size: usize) -> Browser {
    Browser::new(
        sample_catalog(),
        Box::new(sample_fetcher()),
        Box::new(CmarkRenderer),
        mode,
        page_size,
    )
}
