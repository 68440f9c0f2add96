//! `jsonast` CLI: validate, reformat, and inspect JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"]}' | jsonast format
//!
//! # Compact a file into another file
//! jsonast format --compact -i data.json -o data.min.json
//!
//! # Check a document, exiting non-zero on the first error
//! jsonast validate -i data.json
//!
//! # Count values by kind and report the nesting depth
//! jsonast stats -i data.json
//!
//! # Tighter nesting limit, with debug logging on stderr
//! jsonast --max-depth 32 -v validate -i data.json
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonast::{Number, ParseOptions, Value};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "jsonast", version, about = "Validate, format and inspect JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum nesting depth of arrays and objects
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back out (pretty-printed by default)
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact output with no whitespace
        #[arg(long)]
        compact: bool,
    },
    /// Check that a document parses
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show value counts by kind and the maximum nesting depth
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .try_init();
    }

    let options = match cli.max_depth {
        Some(max_depth) => ParseOptions::default().with_max_depth(max_depth),
        None => ParseOptions::default(),
    };
    debug!(?options, "parse options");

    match cli.command {
        Commands::Format {
            input,
            output,
            compact,
        } => {
            let value = read_document(input.as_deref(), options)?;
            write_output(output.as_deref(), &value, !compact)?;
        }
        Commands::Validate { input } => {
            let value = read_document(input.as_deref(), options)?;
            debug!(root = value.kind_name(), "document is valid");
            println!("valid");
        }
        Commands::Stats { input } => {
            let value = read_document(input.as_deref(), options)?;
            let stats = Stats::of(&value);
            println!("objects:    {}", stats.objects);
            println!("arrays:     {}", stats.arrays);
            println!("members:    {}", stats.members);
            println!("strings:    {}", stats.strings);
            println!("integers:   {}", stats.integers);
            println!("decimals:   {}", stats.decimals);
            println!("booleans:   {}", stats.booleans);
            println!("nulls:      {}", stats.nulls);
            println!("max depth:  {}", stats.max_depth);
        }
    }

    Ok(())
}

/// Parse the document at `path`, or on stdin, streaming the bytes through the
/// scanner.
fn read_document(path: Option<&str>, options: ParseOptions) -> Result<Value> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to read file: {}", path))?;
            debug!(path, "parsing file");
            parse_from(file, options).with_context(|| format!("Failed to parse {}", path))
        }
        None => {
            debug!("parsing stdin");
            parse_from(io::stdin().lock(), options).context("Failed to parse stdin")
        }
    }
}

fn parse_from<R: Read>(reader: R, options: ParseOptions) -> jsonast::Result<Value> {
    jsonast::Parser::from_reader(reader)
        .with_options(options)
        .parse_document()
}

fn write_output(path: Option<&str>, value: &Value, pretty: bool) -> Result<()> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to write file: {}", path))?;
            write_value(BufWriter::new(file), value, pretty)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            write_value(io::stdout().lock(), value, pretty).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn write_value<W: Write>(mut out: W, value: &Value, pretty: bool) -> io::Result<()> {
    value.write_to(&mut out, pretty)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Value counts for the `stats` subcommand.
#[derive(Debug, Default, PartialEq)]
struct Stats {
    objects: usize,
    arrays: usize,
    members: usize,
    strings: usize,
    integers: usize,
    decimals: usize,
    booleans: usize,
    nulls: usize,
    /// Deepest array/object nesting; the root collection is depth 1.
    max_depth: usize,
}

impl Stats {
    fn of(value: &Value) -> Self {
        let mut stats = Stats::default();
        stats.visit(value, 0);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        match value {
            Value::String(_) => self.strings += 1,
            Value::Number(Number::Integer(_)) => self.integers += 1,
            Value::Number(Number::Decimal(_)) => self.decimals += 1,
            Value::Boolean(_) => self.booleans += 1,
            Value::Null => self.nulls += 1,
            Value::Array(array) => {
                self.arrays += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for item in array {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(object) => {
                self.objects += 1;
                self.members += object.len();
                self.max_depth = self.max_depth.max(depth + 1);
                for member in object {
                    self.visit(member.value(), depth + 1);
                }
            }
        }
    }
}
