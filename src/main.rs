//! commentgen — interactively add documentation comments to a C++ source file.
//!
//! Reads the file line by line and, for every line that looks interesting,
//! asks whether to insert a comment:
//!
//! - **file header** — fixed block at the top (file, date, project, description)
//! - **function header** — banner, description, one parameter, return value
//! - **line comments** — above variable declarations, I/O and control statements
//! - **end markers** — `}  // end of "Name"` on the brace that closes a function
//!
//! The original lines are copied to a new file in order, with the generated
//! comments interleaved.

mod annotate;
mod classify;
mod error;
mod literals;
mod paths;
mod prompt;
mod render;
mod tracker;

use anyhow::{Context, Result};
use clap::Parser;
use error::AppError;
use prompt::{Console, Prompter};
use render::FileHeader;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracker::BracePolicy;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "commentgen",
    about = "Interactively insert header, function and end-of-function comments into C++ source"
)]
struct Cli {
    /// Source file to annotate. Asked for interactively when omitted.
    input: Option<String>,

    /// Output file. Asked for when omitted; the default is commented_<name> next to the input.
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Date for the file header (MM/DD/YYYY). Defaults to today when left blank.
    #[arg(long)]
    date: Option<String>,

    /// Project name for the file header
    #[arg(long)]
    project: Option<String>,

    /// Program description for the file header
    #[arg(long)]
    description: Option<String>,

    /// Programmer line in the file header
    #[arg(long)]
    programmer: Option<String>,

    /// Class line in the file header
    #[arg(long)]
    course: Option<String>,

    /// Class time line in the file header
    #[arg(long)]
    class_time: Option<String>,

    /// Instructor line in the file header
    #[arg(long)]
    instructor: Option<String>,

    /// Never write a file header
    #[arg(long)]
    no_header: bool,

    /// Ignore braces inside string/char literals and comments when looking
    /// for the end of a function
    #[arg(long)]
    skip_literal_braces: bool,

    /// Log line classification and brace tracking to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(error::exit_code_for(&e))
        }
    }
}

/// `-v` forces debug; otherwise `RUST_LOG` wins over the warn default.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("commentgen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("commentgen=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut console = Console::stdio();
    console.say("C++ Comment Generator")?;
    console.say("")?;

    let input_path = match cli.input {
        Some(ref raw) => paths::expand_home(raw),
        None => ask_input_path(&mut console)?,
    };

    let bytes = fs::read(&input_path).map_err(|source| AppError::InputUnreadable {
        path: input_path.clone(),
        source,
    })?;
    info!(path = %input_path.display(), bytes = bytes.len(), "read input");

    let output_path = match cli.output {
        Some(ref raw) => paths::expand_home(raw),
        None => {
            let answer = console.ask_text("Enter output filename (or press Enter for default): ")?;
            if answer.is_empty() {
                paths::default_output_path(&input_path)
            } else {
                paths::expand_home(&answer)
            }
        }
    };

    let header = if cli.no_header {
        None
    } else if console.ask_yes_no("Add file header? (y/n): ")? {
        Some(collect_header(cli, &mut console, &input_path)?)
    } else {
        None
    };

    let file = File::create(&output_path).map_err(|source| AppError::OutputUncreatable {
        path: output_path.clone(),
        source,
    })?;

    let summary = match write_output(cli, &mut console, file, &output_path, header.as_ref(), &bytes) {
        Ok(summary) => summary,
        Err(e) => {
            if let Err(rm) = fs::remove_file(&output_path) {
                warn!(path = %output_path.display(), error = %rm, "could not remove partial output");
            }
            return Err(e);
        }
    };

    info!(
        lines = summary.lines,
        functions = summary.functions,
        headers = summary.function_headers,
        comments = summary.line_comments,
        end_markers = summary.end_markers,
        open_at_eof = summary.open_at_eof,
        "annotation finished"
    );

    console.say("")?;
    console.say(&format!(
        "Done! Commented code saved as: {}",
        output_path.display()
    ))?;
    Ok(())
}

/// Header plus annotated source into `file`. Any error leaves a partial
/// file behind for the caller to remove.
fn write_output<P: Prompter>(
    cli: &Cli,
    console: &mut P,
    file: File,
    output_path: &Path,
    header: Option<&FileHeader>,
    source: &[u8],
) -> Result<annotate::Summary> {
    let mut writer = BufWriter::new(file);

    if let Some(header) = header {
        writer
            .write_all(render::file_header(header).as_bytes())
            .with_context(|| format!("failed to write {}", output_path.display()))?;
    }

    let policy = if cli.skip_literal_braces {
        BracePolicy::CodeOnly
    } else {
        BracePolicy::Textual
    };

    console.say("")?;
    console.say("Processing your code...")?;
    console.say("")?;

    annotate::annotate(source, console, &mut writer, policy).map_err(|e| -> anyhow::Error {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            AppError::InputClosed {
                what: "a parameter mode".to_string(),
            }
            .into()
        } else {
            anyhow::Error::new(e).context(format!("failed to write {}", output_path.display()))
        }
    })
}

/// Ask for the input path until an existing file is named.
fn ask_input_path<P: Prompter>(console: &mut P) -> Result<PathBuf> {
    console.say("Tips: You can use:")?;
    console.say("  - Relative path: program.cpp")?;
    console.say("  - ~ for home: ~/HW02/program.cpp")?;
    console.say("  - Full path: /home/you/HW02/program.cpp")?;
    console.say("")?;

    loop {
        let Some(answer) = console.read_answer("Enter your C++ file name or full path: ")? else {
            return Err(AppError::InputClosed {
                what: "a file path".to_string(),
            }
            .into());
        };
        let path = paths::expand_home(answer.trim());
        if path.is_file() {
            console.say("File found!")?;
            return Ok(path);
        }
        console.say("Error: File not found.")?;
        console.say(&format!(
            "Try checking if the file exists with: ls {}",
            path.display()
        ))?;
    }
}

/// Gather file header fields, asking only for what was not given on the
/// command line.
fn collect_header<P: Prompter>(cli: &Cli, console: &mut P, input: &Path) -> io::Result<FileHeader> {
    console.say("")?;
    console.say("File header information:")?;

    let date = header_field(console, cli.date.as_deref(), "Today's date (MM/DD/YYYY, Enter for today): ")?;
    let date = if date.is_empty() {
        chrono::Local::now().format("%m/%d/%Y").to_string()
    } else {
        date
    };
    let project = header_field(console, cli.project.as_deref(), "Project name: ")?;
    let description = header_field(console, cli.description.as_deref(), "Program description: ")?;

    Ok(FileHeader {
        file_name: paths::display_name(input),
        date,
        project,
        description,
        programmer: cli.programmer.clone(),
        course: cli.course.clone(),
        class_time: cli.class_time.clone(),
        instructor: cli.instructor.clone(),
    })
}

fn header_field<P: Prompter>(console: &mut P, given: Option<&str>, prompt: &str) -> io::Result<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => console.ask_text(prompt),
    }
}
