use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::parsing::sam::{parse_path, parse_reader, ParseOutcome};

#[derive(Args)]
pub struct ValidateArgs {
    /// Input SAM file, optionally gzip-compressed (.gz)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Warn about @PG records whose PP tag names an unknown program ID
    #[arg(long)]
    pub check_program_chain: bool,

    /// Include every accepted record in JSON output
    #[arg(long)]
    pub include_records: bool,
}

/// Execute validate subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or fails validation.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ValidateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let outcome = read_input(&args.input);
    let source = display_input(&args.input);

    if verbose {
        eprintln!(
            "Read {} lines from {source} ({} comments)",
            outcome.lines_read, outcome.comments
        );
    }

    if args.check_program_chain {
        for program in outcome.contents.dangling_program_links() {
            warn!(
                program = %program.id,
                previous = program.previous_id.as_deref().unwrap_or_default(),
                "PP does not match any @PG ID"
            );
        }
    }

    match format {
        OutputFormat::Text => print_text_report(&source, &outcome),
        OutputFormat::Json => print_json_report(&source, &outcome, args.include_records)?,
        OutputFormat::Tsv => print_tsv_report(&source, &outcome),
    }

    match outcome.error {
        Some(err) => Err(anyhow::Error::new(err).context(format!("{source} failed validation"))),
        None => Ok(()),
    }
}

fn read_input(input: &Path) -> ParseOutcome {
    if input.as_os_str() == "-" {
        parse_reader(io::stdin().lock())
    } else {
        parse_path(input)
    }
}

fn display_input(input: &Path) -> String {
    if input.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    }
}

fn status(outcome: &ParseOutcome) -> &'static str {
    if outcome.is_ok() {
        "valid"
    } else {
        "invalid"
    }
}

fn print_text_report(source: &str, outcome: &ParseOutcome) {
    let contents = &outcome.contents;

    println!("{source}: {}", status(outcome));
    if let Some(header) = &contents.header {
        match &header.sort_order {
            Some(so) => println!("   Header: VN {} (SO {so})", header.version),
            None => println!("   Header: VN {}", header.version),
        }
    } else {
        println!("   Header: none");
    }
    println!("   Reference sequences: {}", contents.reference_sequences.len());
    println!("   Read groups: {}", contents.read_groups.len());
    println!("   Programs: {}", contents.programs.len());
    println!("   Alignments: {}", contents.alignments.len());
    println!("   Lines read: {}", outcome.lines_read);

    if let Some(err) = &outcome.error {
        println!("   Error: {err}");
    }
}

fn print_json_report(
    source: &str,
    outcome: &ParseOutcome,
    include_records: bool,
) -> anyhow::Result<()> {
    let contents = &outcome.contents;

    let mut json = serde_json::json!({
        "input": source,
        "status": status(outcome),
        "lines_read": outcome.lines_read,
        "comments": outcome.comments,
        "counts": {
            "header": contents.header.is_some(),
            "reference_sequences": contents.reference_sequences.len(),
            "read_groups": contents.read_groups.len(),
            "programs": contents.programs.len(),
            "alignments": contents.alignments.len(),
        },
    });

    if let Some(err) = &outcome.error {
        json["error"] = serde_json::json!({
            "kind": err.kind(),
            "line": err.line(),
            "message": err.to_string(),
        });
    }

    if include_records {
        json["records"] = serde_json::to_value(contents)?;
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_tsv_report(source: &str, outcome: &ParseOutcome) {
    let contents = &outcome.contents;
    let version = contents
        .header
        .as_ref()
        .map_or("", |h| h.version.as_str());
    let (line, message) = outcome.error.as_ref().map_or((String::new(), String::new()), |e| {
        (
            e.line().map(|l| l.to_string()).unwrap_or_default(),
            e.to_string(),
        )
    });

    println!("input\tstatus\tversion\treference_sequences\tread_groups\tprograms\talignments\tlines_read\terror_line\terror");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        source,
        status(outcome),
        version,
        contents.reference_sequences.len(),
        contents.read_groups.len(),
        contents.programs.len(),
        contents.alignments.len(),
        outcome.lines_read,
        line,
        message,
    );
}
