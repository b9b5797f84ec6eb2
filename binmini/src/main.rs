//! MINI command-line tool for checking and querying MINI configuration files.
//!
//! Usage: mini [OPTIONS] [FILE|DIR]
//!
//! Options:
//!       --check              Check if input is valid (exit 0 if valid, 1 if invalid)
//!   -s, --section <NAME>     List only the entries of one section
//!       --globals            List only the global entries
//!   -k, --get <KEY>          Print a single value (section.key, or key for globals)
//!   -v, --verbose            Log parser activity to stderr
//!   -h, --help               Print help
//!   -V, --version            Print version

use libmini::{parse_with_filename, Document};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// What to print once the document is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Query {
    /// Every entry, globals first.
    All,
    /// Only global entries.
    Globals,
    /// Only one named section.
    Section(String),
    /// A single value.
    Get(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    query: Query,
    check_only: bool,
    verbose: bool,
    input_path: Option<String>,
}

/// Result of reading the command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut query: Option<Query> = None;
    let mut check_only = false;
    let mut verbose = false;
    let mut input_path: Option<String> = None;

    let mut set_query = |q: Query| -> Result<(), String> {
        if query.is_some() {
            return Err("--section, --globals and --get are mutually exclusive".to_string());
        }
        query = Some(q);
        Ok(())
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--check" => {
                check_only = true;
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "--globals" => set_query(Query::Globals)?,
            "-s" | "--section" => {
                i += 1;
                let name = args.get(i).ok_or("--section requires a section name")?;
                set_query(Query::Section(name.clone()))?;
            }
            "-k" | "--get" => {
                i += 1;
                let key = args.get(i).ok_or("--get requires a key")?;
                set_query(Query::Get(key.clone()))?;
            }
            "-" => {
                // Explicit stdin
                // input_path stays None, which means stdin
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if input_path.is_some() {
                    return Err("Multiple input paths not supported".to_string());
                }
                input_path = Some(arg.to_string());
            }
        }
        i += 1;
    }

    let query = query.unwrap_or(Query::All);
    if check_only && query != Query::All {
        return Err("--check cannot be combined with a query".to_string());
    }

    Ok(Command::Run(Options {
        query,
        check_only,
        verbose,
        input_path,
    }))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Ok(Command::Version) => {
            println!("mini {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    init_logging(options.verbose);
    debug!(?options, "starting");

    // Check if input is a directory
    if let Some(path) = &options.input_path {
        if Path::new(path).is_dir() {
            if !options.check_only {
                eprintln!("Error: directory input requires --check");
                process::exit(1);
            }
            process::exit(check_directory(path));
        }
    }

    let parsed = match &options.input_path {
        Some(path) => match fs::File::open(path) {
            Ok(file) => parse_with_filename(file, Some(path.as_str())),
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => parse_with_filename(io::stdin().lock(), Some("stdin")),
    };

    let doc = match parsed {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if options.check_only {
        println!("ok");
        return;
    }

    let mut out = io::stdout().lock();
    let exit_code = match run_query(&doc, &options.query, &mut out) {
        Ok(code) => code,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => 0,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            1
        }
    };
    process::exit(exit_code);
}

/// Check every .ini file in a directory, reporting each failure.
fn check_directory(dir_path: &str) -> i32 {
    let entries = match fs::read_dir(dir_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path, e);
            return 1;
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "ini"))
        .collect();
    paths.sort();

    let mut had_errors = false;
    for path in paths {
        let path_str = path.to_string_lossy();
        let result = match fs::File::open(&path) {
            Ok(file) => parse_with_filename(file, Some(&*path_str)).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match result {
            Ok(_) => println!("{}: ok", path_str),
            Err(e) => {
                eprintln!("{}: {}", path_str, e);
                had_errors = true;
            }
        }
    }

    if had_errors {
        1
    } else {
        0
    }
}

/// Print the requested part of the document. Returns the process exit code.
fn run_query(doc: &Document, query: &Query, out: &mut impl Write) -> io::Result<i32> {
    match query {
        Query::All => {
            for (section, key, value) in doc.entries() {
                write_entry(out, section, key, value)?;
            }
        }
        Query::Globals => {
            for (_, key, value) in doc.entries().filter(|(s, _, _)| s.is_none()) {
                write_entry(out, None, key, value)?;
            }
        }
        Query::Section(name) => {
            if doc.section(name).is_none() {
                eprintln!("Error: no section [{}]", name);
                return Ok(1);
            }
            for (section, key, value) in doc.entries().filter(|(s, _, _)| *s == Some(name.as_str())) {
                write_entry(out, section, key, value)?;
            }
        }
        Query::Get(key) => match lookup(doc, key) {
            Some(value) => writeln!(out, "{}", value)?,
            None => {
                eprintln!("Error: no value for {}", key);
                return Ok(1);
            }
        },
    }
    out.flush()?;
    Ok(0)
}

fn write_entry(out: &mut impl Write, section: Option<&str>, key: &str, value: &str) -> io::Result<()> {
    match section {
        Some(name) => writeln!(out, "{}.{}={}", name, key, value),
        None => writeln!(out, "{}={}", key, value),
    }
}

/// Resolve `section.key` (split at the last dot) or a bare global `key`.
/// A dotted key whose prefix names no section is looked up in globals whole.
fn lookup<'a>(doc: &'a Document, query: &str) -> Option<&'a str> {
    if let Some((section, key)) = query.rsplit_once('.') {
        if let Some(section) = doc.section(section) {
            return section.get(key);
        }
    }
    doc.globals().get(query)
}

fn print_help() {
    println!(
        "mini - MINI configuration command-line tool

USAGE:
    mini [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    Input file or directory (reads from stdin if not provided)
                  A directory is only accepted with --check, which then
                  checks all .ini files in it

OPTIONS:
    --check                Check if input is valid (exit 0 if valid, 1 if invalid)

    -s, --section <NAME>   List only the entries of section NAME

    --globals              List only the entries before the first section

    -k, --get <KEY>        Print one value. KEY is section.key, or key for a
                           global entry. Keys are case-insensitive.

    -v, --verbose          Log parser activity to stderr (see also RUST_LOG)

    -h, --help             Print help

    -V, --version          Print version

OUTPUT:
    Entries are listed one per line as key=value for globals and
    section.key=value otherwise, sorted by section and key.

EXAMPLES:
    # List every entry
    mini app.ini

    # Validate all .ini files in a directory
    mini --check ./configs/

    # Read a single value
    mini --get server.port app.ini

    # Read from stdin
    cat app.ini | mini --globals
"
    );
}
