//! CLI for cnki-bibtex - Convert CNKI-style references into BibTeX.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cnki_bibtex::{
    load_references, parse_reference, refs::RefsError, render_bibtex, render_json,
    render_json_array, split_references,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Convert CNKI-style Chinese citations into BibTeX entries
#[derive(Parser)]
#[command(name = "cnki2bib")]
#[command(version)]
#[command(after_help = "\
Examples:
  cnki2bib convert '张三，李四. 文章标题[J]. 期刊名, 2023, 46(5): 100-115.'
  cnki2bib convert '王小明; 李华. 标题[J]. 科技导报, 2022, 40(10): 25-30.' --key wang2022ai
  cnki2bib batch refs.txt -o refs.bib
  pbpaste | cnki2bib batch -")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single reference given on the command line
    Convert {
        /// The reference text
        reference: String,

        /// Cite key to use instead of a derived one
        #[arg(short, long)]
        key: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Bibtex)]
        format: Format,
    },

    /// Convert a file with one reference per line
    #[command(after_help = "\
Examples:
  cnki2bib batch refs.txt
  cnki2bib batch refs.txt -o refs.bib
  cnki2bib batch refs.txt --format json

Blank lines are skipped. Entries are separated by an empty line.")]
    Batch {
        /// Input file (use '-' for stdin)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Bibtex)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Bibtex,
    Json,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable / empty
    InputFile(String),
    /// Exit 15 — cannot write output file
    OutputFile(String),
    /// Exit 16 — record could not be serialized
    Serialize(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::OutputFile(_) => 15,
            AppError::Serialize(_) => 16,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: the file must contain one reference per line",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
            AppError::Serialize(msg) => write!(f, "{}", msg),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert {
            reference,
            key,
            format,
        } => {
            let entry = render(&reference, key.as_deref(), format)?;
            write_output(None, &entry)?;
        }
        Commands::Batch {
            input,
            output,
            format,
        } => {
            batch_command(&input, output.as_deref(), format)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with the BibTeX on stdout.
/// `RUST_LOG` overrides the level chosen by `-v` / `-q`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = log_level(verbose, quiet);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("cnki_bibtex={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Convert every reference in a file (or stdin).
fn batch_command(input: &Path, output: Option<&Path>, format: Format) -> Result<(), AppError> {
    let references = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        let refs = split_references(&buf);
        if refs.is_empty() {
            return Err(AppError::InputFile(format!("stdin: {}", RefsError::Empty)));
        }
        refs
    } else {
        load_references(input)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?
    };

    let records: Vec<_> = references
        .iter()
        .map(|reference| parse_reference(reference, None))
        .collect();
    let content = match format {
        Format::Bibtex => records
            .iter()
            .map(render_bibtex)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Format::Json => render_json_array(&records)
            .map_err(|e| AppError::Serialize(format!("failed to serialize records: {}", e)))?,
    };

    write_output(output, &content)?;
    if let Some(output_path) = output {
        eprintln!(
            "converted {} reference(s), wrote {}",
            records.len(),
            output_path.display()
        );
    }

    Ok(())
}

fn render(reference: &str, key: Option<&str>, format: Format) -> Result<String, AppError> {
    let record = parse_reference(reference, key);
    match format {
        Format::Bibtex => Ok(render_bibtex(&record)),
        Format::Json => render_json(&record)
            .map_err(|e| AppError::Serialize(format!("failed to serialize record: {}", e))),
    }
}

/// Write to a file, or to stdout when no path is given. A trailing newline is
/// always added.
fn write_output(output: Option<&Path>, content: &str) -> Result<(), AppError> {
    if let Some(output_path) = output {
        fs::write(output_path, format!("{}\n", content)).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", content)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }
    Ok(())
}
