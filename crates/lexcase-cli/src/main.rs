mod display;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use lexcase_core::{RawDocument, assemble};
use lexcase_gateway::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use lexcase_gateway::{AnalysisSession, Gateway, GatewayConfig, RequestOutcome, parse_header};
use tracing::{Level, info, warn};

use crate::display::{EMPTY_STATE, render_report};

#[derive(Parser)]
#[command(name = "lexcase")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Submit a legal case for AI analysis and print the report")]
struct Cli {
    /// Analysis service base URL, including the API prefix
    #[arg(long, env = "LEXCASE_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Give up on a request after this many seconds
    #[arg(
        long,
        env = "LEXCASE_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    timeout_secs: u64,

    /// Extra header sent with every request, as `Name: value`.
    /// `LEXCASE_HEADERS` takes one header per line
    #[arg(long = "header", env = "LEXCASE_HEADERS", global = true)]
    headers: Vec<String>,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze case text: FIR summary, case brief, or legal notes
    Analyze {
        /// Case text; `-` or omitted reads stdin
        text: Option<String>,

        /// Read the case text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the assembled report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a saved analysis document without contacting the service
    Render {
        /// Path to the analysis JSON
        path: PathBuf,

        /// Print the assembled report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();
    info!("lexcase v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Analyze { text, file, json } => {
            let case_text = read_case_text(text.as_deref(), file.as_deref())?;
            let gateway = Gateway::new(&gateway_config(&cli)?)?;
            analyze(&gateway, &case_text, *json).await
        }
        Commands::Render { path, json } => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            print_report(&RawDocument::new(body), *json)
        }
    }
}

fn gateway_config(cli: &Cli) -> anyhow::Result<GatewayConfig> {
    let mut config = GatewayConfig::new(cli.base_url.clone())
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let lines = cli.headers.iter().flat_map(|h| h.lines());
    for arg in lines.filter(|h| !h.trim().is_empty()) {
        let Some((name, value)) = parse_header(arg) else {
            bail!("invalid header {arg:?}, expected `Name: value`");
        };
        config = config.with_header(name, value);
    }
    Ok(config)
}

fn read_case_text(text: Option<&str>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading case text from {}", path.display()));
    }
    match text {
        Some(t) if t != "-" => Ok(t.to_string()),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading case text from stdin")?;
            Ok(buf)
        }
    }
}

async fn analyze(gateway: &Gateway, case_text: &str, json: bool) -> anyhow::Result<ExitCode> {
    let session = AnalysisSession::new();
    eprintln!("Analyzing case...");
    let outcome = session.analyze(gateway, case_text).await?;

    let raw = match outcome {
        RequestOutcome::Success(raw) => raw,
        failure => {
            if let Some((title, body)) = failure.user_message() {
                eprintln!("{title}: {body}");
            }
            if failure.is_retryable() {
                eprintln!("Run the command again to retry.");
            }
            return Ok(ExitCode::FAILURE);
        }
    };
    print_report(&raw, json)
}

/// What one render writes: the report (or nothing) to stdout, notices to
/// stderr.
#[derive(Debug, PartialEq)]
struct Printed {
    stdout: String,
    stderr: String,
    ok: bool,
}

fn report_output(raw: &RawDocument, json: bool) -> anyhow::Result<Printed> {
    let report = match assemble(raw) {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "discarding analysis response");
            // Keep stdout parseable in JSON mode.
            let (stdout, stderr) = if json {
                (String::new(), format!("{EMPTY_STATE}\n"))
            } else {
                (format!("{EMPTY_STATE}\n"), String::new())
            };
            return Ok(Printed {
                stdout,
                stderr,
                ok: false,
            });
        }
    };

    let stdout = if json {
        format!("{}\n", serde_json::to_string_pretty(&report)?)
    } else {
        render_report(&report)
    };
    Ok(Printed {
        stdout,
        stderr: String::new(),
        ok: true,
    })
}

fn print_report(raw: &RawDocument, json: bool) -> anyhow::Result<ExitCode> {
    let printed = report_output(raw, json)?;
    eprint!("{}", printed.stderr);
    print!("{}", printed.stdout);
    Ok(if printed.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
