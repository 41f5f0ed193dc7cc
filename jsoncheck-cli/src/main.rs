//! jsoncheck command-line driver.
//!
//! Reads a document from a file or the terminal, runs it through the
//! checker and writes the token list, the tree, or the error list.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use jsoncheck_core::{
    Halt, Lexer, Location, ParseOptions, Parser as DocumentParser, Report, Scanned, Token,
    DEFAULT_MAX_DEPTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "jsoncheck", version, about = "Check a JSON document for structural and semantic errors", long_about = None)]
#[command(after_help = "EXIT STATUS:
    0  document parsed without errors
    1  errors were found
    2  the input or output could not be used

EXAMPLES:
    jsoncheck data.json                 # Check a file, print the tree
    jsoncheck data.json --tokens        # Print the token list only
    jsoncheck data.json --format json   # Machine-readable error list
    jsoncheck                           # Type a document, end with a blank line")]
struct Args {
    /// Document to check [default: read from the terminal]
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the token list instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Deepest allowed object/list nesting
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let outcome = run(&args);
    if let Err(err) = &outcome {
        eprintln!("error: {:#}", err);
    }
    ExitCode::from(exit_status(&outcome))
}

fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Returns whether the document was clean.
fn run(args: &Args) -> Result<bool> {
    let source = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => prompt()?,
    };
    debug!(bytes = source.len(), "input loaded");

    let scanned = Lexer::new(&source).scan();
    if let Some(halt) = scanned.halt {
        warn!(
            location = %Location::of(&source, halt.offset),
            reason = %halt.reason,
            "scanning stopped early; the rest of the input is ignored"
        );
    }

    let (rendered, clean) = if args.tokens {
        let clean = scanned.halt.is_none();
        (render_tokens(&source, &scanned, args.format)?, clean)
    } else {
        let options = ParseOptions::new().with_max_depth(args.max_depth);
        let report = DocumentParser::from_tokens(scanned.tokens, options).run();
        let clean = report.errors.is_empty();
        (render_report(&report, args.format)?, clean)
    };

    emit(args.output.as_ref(), &rendered)?;
    Ok(clean)
}

/// Collect lines from the terminal until a blank line or end of input.
fn prompt() -> Result<String> {
    eprintln!("Please input a valid JSON string:");

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn emit(output: Option<&PathBuf>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")
        }
    }
}

// ============================================================================
// Token list
// ============================================================================

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    literal: &'a str,
    line: usize,
    column: usize,
}

#[derive(Serialize)]
struct HaltRecord {
    reason: String,
    line: usize,
    column: usize,
}

#[derive(Serialize)]
struct TokenListing<'a> {
    tokens: Vec<TokenRecord<'a>>,
    halt: Option<HaltRecord>,
}

fn token_record<'a>(source: &str, token: &Token<'a>) -> TokenRecord<'a> {
    let at = token.span.location(source);
    TokenRecord {
        kind: token.kind.name(),
        literal: token.literal,
        line: at.line,
        column: at.column,
    }
}

fn halt_record(source: &str, halt: &Halt) -> HaltRecord {
    let at = Location::of(source, halt.offset);
    HaltRecord {
        reason: halt.reason.to_string(),
        line: at.line,
        column: at.column,
    }
}

fn render_tokens(source: &str, scanned: &Scanned<'_>, format: Format) -> Result<String> {
    match format {
        Format::Text => {
            let mut out = String::new();
            for token in &scanned.tokens {
                out.push_str(&format!("{}\t{}\n", token.span.location(source), token));
            }
            if let Some(halt) = &scanned.halt {
                out.push_str(&format!(
                    "{}\tscanning stopped: {}\n",
                    Location::of(source, halt.offset),
                    halt.reason
                ));
            }
            Ok(out)
        }
        Format::Json => {
            let listing = TokenListing {
                tokens: scanned.tokens.iter().map(|t| token_record(source, t)).collect(),
                halt: scanned.halt.as_ref().map(|h| halt_record(source, h)),
            };
            json_line(&listing)
        }
    }
}

// ============================================================================
// Parse result
// ============================================================================

#[derive(Serialize)]
struct ErrorRecord<'a> {
    kind: &'static str,
    category: Option<u8>,
    message: &'a str,
}

#[derive(Serialize)]
struct Outcome<'a> {
    ok: bool,
    errors: Vec<ErrorRecord<'a>>,
    /// The labeled tree dump, present on success.
    tree: Option<String>,
}

fn render_report(report: &Report<'_>, format: Format) -> Result<String> {
    match format {
        Format::Text => {
            let mut out = String::new();
            match &report.tree {
                Some(tree) if report.errors.is_empty() => {
                    out.push_str("JSON parsed successfully!\n");
                    out.push_str("Abstract Syntax Tree:\n");
                    out.push_str(&tree.to_string());
                }
                _ => {
                    out.push_str("Semantic Errors:\n");
                    for error in &report.errors {
                        out.push_str(&error.message);
                        out.push('\n');
                    }
                }
            }
            Ok(out)
        }
        Format::Json => {
            let outcome = Outcome {
                ok: report.errors.is_empty(),
                errors: report
                    .errors
                    .iter()
                    .map(|e| ErrorRecord {
                        kind: e.kind.name(),
                        category: e.kind.category(),
                        message: &e.message,
                    })
                    .collect(),
                tree: report.tree.as_ref().map(ToString::to_string),
            };
            json_line(&outcome)
        }
    }
}

fn json_line<T: Serialize>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("failed to encode JSON output")?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_text(input: &str) -> String {
        let report = DocumentParser::new(input).run();
        render_report(&report, Format::Text).unwrap()
    }

    #[test]
    fn test_success_text() {
        let out = report_text("[1]");
        assert_eq!(
            out,
            "JSON parsed successfully!\nAbstract Syntax Tree:\nlist\n\t[\n\tNUMBER: 1\n\t]\n"
        );
    }

    #[test]
    fn test_error_text() {
        let out = report_text(r#"{"a": 1, "a": 2}"#);
        assert_eq!(out, "Semantic Errors:\nType 5: Duplicate dictionary key: a\n");
    }

    #[test]
    fn test_error_json() {
        let report = DocumentParser::new("[+1]").run();
        let out = render_report(&report, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["errors"][0]["kind"], "number-format");
        assert_eq!(value["errors"][0]["category"], 3);
        assert!(value["tree"].is_null());
    }

    #[test]
    fn test_token_text_with_halt() {
        let source = "[1,\n @]";
        let scanned = Lexer::new(source).scan();
        let out = render_tokens(source, &scanned, Format::Text).unwrap();
        assert_eq!(
            out,
            "1:1\ttoken(SquareOpen, '[')\n\
             1:2\ttoken(Number, 1)\n\
             1:3\ttoken(Comma, ',')\n\
             2:2\tscanning stopped: unexpected character '@'\n"
        );
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        let output = dir.path().join("out.txt");
        let args = Args::parse_from([
            "jsoncheck",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        fs::write(&input, r#"{"a": 1, "a": 2}"#).unwrap();
        let outcome = run(&args);
        assert_eq!(exit_status(&outcome), 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Semantic Errors:\nType 5: Duplicate dictionary key: a\n"
        );

        fs::write(&input, "[true]").unwrap();
        let outcome = run(&args);
        assert_eq!(exit_status(&outcome), 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "JSON parsed successfully!\nAbstract Syntax Tree:\nlist\n\t[\n\tBOOLEAN: true\n\t]\n"
        );
    }

    #[test]
    fn test_run_tokens_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        let output = dir.path().join("tokens.json");
        fs::write(&input, "{\n  \"k\": null}").unwrap();
        let args = Args::parse_from([
            "jsoncheck",
            input.to_str().unwrap(),
            "--tokens",
            "--format",
            "json",
            "-o",
            output.to_str().unwrap(),
        ]);

        assert_eq!(exit_status(&run(&args)), 0);
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["tokens"][1]["kind"], "String");
        assert_eq!(value["tokens"][1]["literal"], "k");
        assert_eq!(value["tokens"][1]["line"], 2);
        assert_eq!(value["tokens"][1]["column"], 3);
        assert!(value["halt"].is_null());
    }

    #[test]
    fn test_run_missing_input_is_status_2() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let args = Args::parse_from(["jsoncheck", missing.to_str().unwrap()]);

        let outcome = run(&args);
        assert_eq!(exit_status(&outcome), 2);
        let message = format!("{:#}", outcome.unwrap_err());
        assert!(message.starts_with("failed to read"), "{}", message);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["jsoncheck", "in.json", "--format", "json", "-vv"]);
        assert_eq!(args.input, Some(PathBuf::from("in.json")));
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!args.tokens);
    }
}
