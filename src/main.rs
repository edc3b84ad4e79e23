use std::{
    fs::{read_to_string, File},
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
    process,
    sync::Arc,
};

use clap::Parser;
use mgol_lexer::{
    fill_symbol_table, logging, symbols::symbols::parse_keywords, CharSource, Error, Scanner,
    ScannerConfig, SymbolTable, WriterReporter,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "mgol-lexer", about = "Lexical analyser for Mgol source files", version)]
struct Cli {
    /// Source file to scan
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Whitespace separated reserved words, replacing the built-in set
    #[arg(long, value_name = "FILE")]
    keywords: Option<PathBuf>,

    /// Do not insert new identifiers into the symbol table
    #[arg(long)]
    no_cache: bool,

    /// Print comment tokens instead of dropping them
    #[arg(long)]
    comments: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match run(&cli) {
        Ok(0) => {}
        Ok(errors) => {
            info!(target: "mgol::cli", "{} lexical error(s)", errors);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(2);
        }
    }
}

/// Scans the whole file, returning how many lexical errors were reported.
fn run(cli: &Cli) -> Result<usize, Error> {
    let table = Arc::new(load_symbol_table(cli.keywords.as_deref())?);
    let config = ScannerConfig {
        cache_identifiers: !cli.no_cache,
    };

    let reader = BufReader::new(File::open(&cli.file)?);
    let mut scanner = Scanner::with_config(
        CharSource::new(reader),
        Arc::clone(&table),
        WriterReporter::stderr(),
        config,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let (token, position) = scanner.scan();
        if token.is_eof() {
            break;
        }
        if token.is_comment() && !cli.comments {
            continue;
        }

        writeln!(out, "{}\t{}", position, token)?;
    }

    if let Some(err) = scanner.take_io_error() {
        return Err(err.into());
    }

    let errors = scanner.error_count();
    table.clear();

    Ok(errors)
}

fn load_symbol_table(keywords: Option<&Path>) -> Result<SymbolTable, Error> {
    let table = SymbolTable::new();

    match keywords {
        Some(path) => {
            let words = parse_keywords(&read_to_string(path)?)?;
            info!(target: "mgol::cli", "loaded {} reserved words from {}", words.len(), path.display());
            table.fill_with(words.iter().map(String::as_str));
        }
        None => fill_symbol_table(&table),
    }

    Ok(table)
}
