//! Command-line interface for markdown-lens.
//!
//! Usage:
//!   mdlens summary <path> [--mdx]   - Document-wide counts as JSON
//!   mdlens tokens <path> [--mdx]    - Full block token stream as JSON
//!   mdlens headers <path>           - Header listing as JSON
//!   mdlens links <path>             - Link occurrence listing as JSON
//!   mdlens scan <dir>               - List markdown files under a directory

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use markdown_lens_engine::{Document, io};
use serde::Serialize;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let path_arg = Arg::new("path")
        .help("Path to the document")
        .required(true)
        .index(1);
    let mdx_arg = Arg::new("mdx")
        .long("mdx")
        .help("Parse as MDX (adds import and JSX component classification)")
        .action(ArgAction::SetTrue);

    let matches = Command::new("mdlens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect the block and inline structure of Markdown and MDX documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("summary")
                .about("Print document-wide counts")
                .arg(path_arg.clone())
                .arg(mdx_arg.clone()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the full block token stream")
                .arg(path_arg.clone())
                .arg(mdx_arg),
        )
        .subcommand(
            Command::new("headers")
                .about("Print every header with line and level")
                .arg(path_arg.clone()),
        )
        .subcommand(
            Command::new("links")
                .about("Print every text and image link occurrence")
                .arg(path_arg),
        )
        .subcommand(
            Command::new("scan")
                .about("List markdown files under a directory")
                .arg(
                    Arg::new("dir")
                        .help("Directory to scan recursively")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("summary", sub)) => {
            let doc = load_document(sub, sub.get_flag("mdx"))?;
            print_json(&doc.summary())
        }
        Some(("tokens", sub)) => {
            let doc = load_document(sub, sub.get_flag("mdx"))?;
            print_json(&doc.tokens())
        }
        Some(("headers", sub)) => {
            let doc = load_document(sub, false)?;
            print_json(&doc.analysis().headings())
        }
        Some(("links", sub)) => {
            let doc = load_document(sub, false)?;
            print_json(&doc.analysis().links())
        }
        Some(("scan", sub)) => {
            let dir = required_arg(sub, "dir");
            let files = io::scan_markdown_files(Path::new(dir))
                .with_context(|| format!("failed to scan {dir}"))?;
            for file in files {
                println!("{}", file.display());
            }
            Ok(())
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .expect("argument is declared required")
}

fn load_document(matches: &ArgMatches, mdx: bool) -> Result<Document> {
    let path = required_arg(matches, "path");
    let doc = if mdx {
        Document::from_file_mdx(path)
    } else {
        Document::from_file(path)
    };
    doc.with_context(|| format!("failed to load {path}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
