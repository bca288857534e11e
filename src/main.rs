//! Command-line front end: extract doc comments from PHP files and print
//! the parsed documents as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::error;

use phpapidoc::parser::{DocBlockParser, TagRegistry};
use phpapidoc::render::PlainRenderer;
use phpapidoc::source::doc_comments_from_file;
use phpapidoc::structure::DocBlock;

#[derive(Parser)]
#[command(name = "phpapidoc", version, about = "Parse PHPDoc blocks from PHP source files")]
struct Cli {
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// PHP files to scan for doc comments
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct FileReport {
    file: PathBuf,
    documents: Vec<DocBlock>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let parser = DocBlockParser::new(PlainRenderer, TagRegistry::with_builtins());
    let mut reports = Vec::with_capacity(cli.files.len());
    let mut failed = false;

    for file in cli.files {
        match doc_comments_from_file(&file) {
            Ok(comments) => {
                let documents = comments.iter().map(|c| parser.parse(c)).collect();
                reports.push(FileReport { file, documents });
            }
            Err(err) => {
                error!(file = %file.display(), %err, "failed to read file");
                failed = true;
            }
        }
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&reports)
    } else {
        serde_json::to_string(&reports)
    };
    match json {
        Ok(out) => println!("{out}"),
        Err(err) => {
            error!(%err, "failed to serialize output");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
