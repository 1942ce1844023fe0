//! CLI entry point and command handlers for promptdeck.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use promptdeck::config::Config;

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(version)]
#[command(about = "Browse curated prompts, instructions, and chat modes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog items
    List {
        /// Case-insensitive search over title, description, and filename
        #[arg(default_value = "")]
        search: String,
        /// Filter by type (all, prompts, instructions, chatmodes)
        #[arg(long, value_name = "TYPE")]
        r#type: Option<String>,
        /// Page to display
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page (overrides config)
        #[arg(long, value_name = "N", conflicts_with = "all")]
        page_size: Option<usize>,
        /// Show every matching item on one page
        #[arg(long)]
        all: bool,
        /// Show only the count of matching items
        #[arg(long)]
        count: bool,
    },
    /// Show one item, rendered for the terminal
    Show {
        /// Item id (filename without its type suffix)
        id: String,
        /// Print the raw markdown source instead of rendering it
        #[arg(long)]
        source: bool,
        /// Jump to a section by its heading slug
        #[arg(long, value_name = "SLUG")]
        section: Option<String>,
        /// Include the YAML front matter block
        #[arg(long)]
        front_matter: bool,
        /// Include the table of contents
        #[arg(long)]
        toc: bool,
    },
    /// Print an item's table of contents
    Toc {
        /// Item id
        id: String,
        /// Extract headings from the raw markdown instead of the rendered view
        #[arg(long)]
        source: bool,
    },
    /// Diff two items' content
    Compare {
        /// First item id
        id_a: String,
        /// Second item id
        id_b: String,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Include commit and build date
        #[arg(long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            search,
            r#type,
            page,
            page_size,
            all,
            count,
        } => cmd::list::run(
            &Config::load()?,
            &cmd::list::ListArgs {
                search,
                item_type: r#type,
                page,
                page_size,
                all,
                count,
            },
        ),
        Commands::Show {
            id,
            source,
            section,
            front_matter,
            toc,
        } => cmd::show::run(
            &Config::load()?,
            &cmd::show::ShowArgs {
                id,
                source,
                section,
                front_matter,
                toc,
            },
        ),
        Commands::Toc { id, source } => cmd::toc::run(&Config::load()?, &id, source),
        Commands::Compare { id_a, id_b } => cmd::compare::run(&Config::load()?, &id_a, &id_b),
        Commands::Completion { shell } => cmd_completion(shell),
        Commands::Version { verbose } => cmd_version(verbose),
    }
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    generate(shell, &mut command, "promptdeck", &mut io::stdout());
    Ok(())
}

fn cmd_version(verbose: bool) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("promptdeck {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);
    }

    Ok(())
}
