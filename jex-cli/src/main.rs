//! jex - run a templated command once per JSON input record
//!
//! Reads one JSON document from standard input (an array of records or a
//! single object), renders the positional argv templates against each
//! record, runs the resulting command with its stdout captured, and merges
//! each record with its decoded output through the `--map` template. The
//! combined result is written to standard output as a single JSON value.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use jex_core::{read_document, Pipeline, PipelineConfig, DEFAULT_MAP_TEMPLATE};
use std::io::Write;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "jex")]
#[command(about = "Run a templated command once per JSON input record")]
#[command(version)]
struct Cli {
    /// Template merging the input record (`In`) and the decoded command
    /// output (`Out`) into the final per-record result
    #[arg(long, default_value = DEFAULT_MAP_TEMPLATE)]
    map: String,

    /// Pretty-print the final JSON document
    #[arg(long)]
    pretty: bool,

    /// Show a progress spinner on stderr while records execute
    #[arg(long)]
    progress: bool,

    /// Increase diagnostic verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Command and argument templates, each rendered against `{In: record}`;
    /// the first names the program to execute
    #[arg(
        required = true,
        value_name = "TEMPLATE",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("jex: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> jex_core::Result<()> {
    let config = PipelineConfig {
        argv: cli.command,
        map: cli.map,
    };
    let pipeline = Pipeline::compile(&config)?;

    let document = read_document(std::io::stdin().lock())?;
    tracing::debug!(records = document.record_count(), "decoded input document");

    let start = Instant::now();
    let spinner = cli.progress.then(|| create_spinner("Executing records"));
    if let Some(pb) = &spinner {
        pb.set_length(document.record_count() as u64);
    }

    let result = pipeline.execute_with_progress(&document, |done, _total| {
        if let Some(pb) = &spinner {
            pb.set_position(done as u64);
        }
    })?;

    if let Some(pb) = &spinner {
        pb.finish_with_message(format!(
            "Executed {} records in {:.2?}",
            document.record_count(),
            start.elapsed()
        ));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &result)?;
    } else {
        serde_json::to_writer(&mut out, &result)?;
    }
    out.flush()?;
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos}/{len} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_requires_a_command_template() {
        let err = Cli::try_parse_from(["jex"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["jex", "echo", "{{ In.a }}"]).unwrap();
        assert_eq!(cli.map, DEFAULT_MAP_TEMPLATE);
        assert_eq!(cli.command, vec!["echo", "{{ In.a }}"]);
        assert!(!cli.pretty);
        assert!(!cli.progress);
    }

    #[test]
    fn test_cli_templates_may_start_with_dashes() {
        let cli = Cli::try_parse_from(["jex", "ls", "-l", "{{ In.path }}"]).unwrap();
        assert_eq!(cli.command, vec!["ls", "-l", "{{ In.path }}"]);
    }

    #[test]
    fn test_cli_map_override() {
        let cli = Cli::try_parse_from(["jex", "--map", "{{ Out }}", "true"]).unwrap();
        assert_eq!(cli.map, "{{ Out }}");
        assert_eq!(cli.command, vec!["true"]);
    }
}
