//! The `clex` batch lexer.
//!
//! Walks every path given on the command line, lexes each source file with
//! the configured extension and reports the first lexical error per file.
//!
//! Options:
//! - `--ext` - Extension of the files to lex (default `scala`)
//! - `--tokens` - Print every token as `(<kind> <text>)`
//! - `--verbose` - Debug logging, otherwise controlled by `RUST_LOG`

use std::{
    fs,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;
use scalex::{display_error, lexer::lexer::Lexer};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

lazy_static! {
    // temporary or hidden entries, skipped while walking
    static ref HIDDEN_ENTRY: Regex = Regex::new(r"^[.#~]|~$").unwrap();
}

#[derive(Parser)]
#[command(name = "clex", version, about = "Lex Scala sources and report lexical errors")]
struct Cli {
    /// Files or directories to lex
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Extension of the files to lex
    #[arg(long, default_value = "scala")]
    ext: String,

    /// Print every token of every file
    #[arg(long)]
    tokens: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[derive(Default)]
struct Summary {
    lexed: usize,
    failed: usize,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start = Instant::now();
    let mut summary = Summary::default();

    for arg in &cli.paths {
        match fs::canonicalize(arg) {
            Ok(path) => walk(&path, true, &cli, &mut summary),
            Err(err) => {
                println!("{}: {}", arg.display(), err);
                summary.failed += 1;
            }
        }
    }

    info!(
        lexed = summary.lexed,
        failed = summary.failed,
        elapsed = ?start.elapsed(),
        "done"
    );

    if summary.failed > 0 {
        process::exit(1);
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| HIDDEN_ENTRY.is_match(&name.to_string_lossy()))
        .unwrap_or(false)
}

// Paths named on the command line are never filtered, only what is found under them.
fn walk(path: &Path, is_root: bool, cli: &Cli, summary: &mut Summary) {
    if !is_root && is_hidden(path) {
        debug!(path = %path.display(), "skipping hidden entry");
        return;
    }

    if path.is_dir() {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                println!("{}: {}", path.display(), err);
                return;
            }
        };

        let mut children: Vec<PathBuf> = entries.filter_map(|entry| entry.ok().map(|e| e.path())).collect();
        children.sort();

        for child in children {
            walk(&child, false, cli, summary);
        }
        return;
    }

    if path.is_file() && path.extension().is_some_and(|ext| ext == cli.ext.as_str()) {
        summary.lexed += 1;
        if let Err(message) = lex_file(path, cli.tokens) {
            println!("Failed processing {} with error {}", path.display(), message);
            summary.failed += 1;
        }
    }
}

fn lex_file(path: &Path, print_tokens: bool) -> Result<(), String> {
    debug!(path = %path.display(), "lexing");

    let bytes = fs::read(path).map_err(|err| err.to_string())?;
    let file_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
    let mut lexer = Lexer::from_bytes(&bytes, file_name);

    let tokens = match lexer.lex_till_done() {
        Ok(tokens) => tokens,
        Err(error) => {
            warn!(path = %path.display(), %error, "undecodable input");
            display_error(&error, path, &String::from_utf8_lossy(&bytes));
            return Err(error.to_string());
        }
    };

    if print_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    match tokens.iter().find(|token| token.is_error()) {
        Some(token) => Err(token.to_string()),
        None => Ok(()),
    }
}
