//! CLI tool to project record files through mapper (.mapper) definitions.

use clap::Parser;
use facets_rs::{Record, compile_definition};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Project a JSON record through a mapper definition.
///
/// Prints the accumulated result (the `all` snapshot plus one entry per
/// stage) as pretty JSON.
#[derive(Parser)]
#[command(name = "facet-run")]
struct Cli {
    /// Mapper definition file (.mapper, JSON)
    mapper: String,

    /// Input record file (JSON object)
    record: String,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Show paths and stage counts on stderr, raise the log filter
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("facets_rs=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("facets_rs=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mapper_text = match fs::read_to_string(&cli.mapper) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading mapper file '{}': {e}", cli.mapper);
            process::exit(1);
        }
    };

    let record_text = match fs::read_to_string(&cli.record) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading record file '{}': {e}", cli.record);
            process::exit(1);
        }
    };

    let pipeline = match compile_definition(&mapper_text) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Mapper error: {e}");
            process::exit(1);
        }
    };

    let record: Record = match serde_json::from_str(&record_text) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Record error: '{}' is not a JSON object: {e}", cli.record);
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Mapper: {}", cli.mapper);
        eprintln!("Record: {}", cli.record);
        eprintln!("Output: {}", cli.output.as_deref().unwrap_or("(stdout)"));
        eprintln!("Stages: {}", pipeline.len());
    }

    let rendered = pipeline.run(&record, |result| serde_json::to_string_pretty(&result));
    let output = match rendered {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error rendering result: {e}");
            process::exit(1);
        }
    };

    if let Some(out_path) = &cli.output {
        if let Some(parent) = Path::new(out_path.as_str()).parent()
            && !parent.as_os_str().is_empty()
            && fs::create_dir_all(parent).is_err()
        {
            eprintln!("Error creating output directory for '{out_path}'");
            process::exit(1);
        }
        if let Err(e) = fs::write(out_path, &output) {
            eprintln!("Error writing output file '{out_path}': {e}");
            process::exit(1);
        }
    } else {
        if let Err(e) = io::stdout().write_all(output.as_bytes()) {
            eprintln!("Error writing output: {e}");
            process::exit(1);
        }
        if !output.is_empty() && !output.ends_with('\n') {
            println!();
        }
    }
}
