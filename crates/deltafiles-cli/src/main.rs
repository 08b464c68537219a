#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, ValueEnum};
use deltafiles_core::output::OutputWriter;
use deltafiles_core::{ComputedOutputs, ConfigInputs, RunConfig};
use std::io::Write;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "deltafiles", version, about = "Changed-file outputs for GitHub Actions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Detect changed files for the triggering event
    Detect(DetectArgs),
}

#[derive(clap::Args)]
struct DetectArgs {
    /// GitHub token for the compare API
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Token used when no explicit token is given
    #[arg(long, env = "GITHUB_TOKEN", hide = true, hide_env_values = true)]
    github_token: Option<String>,

    /// Output encoding: space-delimited, csv or json
    #[arg(long, env = "INPUT_FORMAT")]
    format: Option<String>,

    /// Whitespace-separated extensions to keep (e.g. ".rs .toml")
    #[arg(long, env = "INPUT_EXTENSIONS")]
    extensions: Option<String>,

    /// Triggering event name
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// Path to the JSON event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<String>,

    /// Commit that triggered the run
    #[arg(long, env = "GITHUB_SHA")]
    sha: Option<String>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Repository checkout (default: current directory)
    #[arg(long, env = "DELTAFILES_REPO_PATH")]
    repo_path: Option<String>,

    /// git executable to run
    #[arg(long, env = "DELTAFILES_GIT")]
    git: Option<String>,

    /// Output sink (default: gha inside GitHub Actions, text otherwise)
    #[arg(long, value_enum, env = "DELTAFILES_EMIT")]
    emit: Option<Emit>,

    /// File receiving gha outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<String>,

    /// Log line format
    #[arg(long, value_enum, env = "DELTAFILES_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

/// Where the rendered outputs go
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// GitHub Actions: append to $GITHUB_OUTPUT
    Gha,
    /// One JSON object on stdout
    Json,
    /// `name=value` lines on stdout
    Text,
}

impl Emit {
    fn detect(explicit: Option<Emit>, in_actions: bool) -> Self {
        match explicit {
            Some(emit) => emit,
            None if in_actions => Emit::Gha,
            None => Emit::Text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for outputs and workflow commands
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Detect(args) => run_detect(args),
    };
    std::process::exit(code);
}

/// Filter empty string from Option (Actions passes "" for unset inputs)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

fn in_github_actions() -> bool {
    std::env::var_os("GITHUB_ACTIONS").is_some()
}

/// Percent-encode the characters that would end a workflow command
fn escape_command_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Log the failure and, inside Actions, annotate the run with it
fn report_failure<W: Write>(err: &deltafiles_core::Error, in_actions: bool, out: &mut W) {
    tracing::error!(kind = ?err.kind(), "{}", err);
    if in_actions {
        let _ = writeln!(out, "::error::{}", escape_command_data(&err.to_string()));
    }
}

/// Raw inputs from flags and environment, `--token` taking precedence over `GITHUB_TOKEN`
fn config_inputs(args: &DetectArgs) -> ConfigInputs<'_> {
    ConfigInputs {
        token: clean_opt(&args.token).or_else(|| clean_opt(&args.github_token)),
        format: clean_opt(&args.format),
        extensions: clean_opt(&args.extensions),
        event_name: clean_opt(&args.event_name),
        event_path: clean_opt(&args.event_path),
        sha: clean_opt(&args.sha),
        repository: clean_opt(&args.repository),
        api_url: clean_opt(&args.api_url),
        repo_path: clean_opt(&args.repo_path),
        git: clean_opt(&args.git),
    }
}

fn run_detect(args: DetectArgs) -> i32 {
    init_tracing(args.log_format);

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    execute(&args, in_github_actions(), &mut lock)
}

/// Run detection and emit outputs. Returns 0 once outputs are written, 1 on any failure.
fn execute<W: Write>(args: &DetectArgs, in_actions: bool, out: &mut W) -> i32 {
    let config = match RunConfig::from_inputs(&config_inputs(args)) {
        Ok(config) => config,
        Err(e) => {
            report_failure(&e, in_actions, out);
            return 1;
        }
    };
    tracing::debug!(?config, "Resolved configuration");

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create runtime");
            return 1;
        }
    };

    let outputs = match rt.block_on(deltafiles_core::detect_changes(&config)) {
        Ok(outputs) => outputs,
        Err(e) => {
            report_failure(&e, in_actions, out);
            return 1;
        }
    };

    let emit = Emit::detect(args.emit, in_actions);
    match write_outputs(emit, clean_opt(&args.output_file), &outputs, out) {
        Ok(()) => 0,
        Err(e) => {
            report_failure(&e, in_actions, out);
            1
        }
    }
}

fn write_outputs<W: Write>(
    emit: Emit,
    output_file: Option<&str>,
    outputs: &ComputedOutputs,
    out: &mut W,
) -> deltafiles_core::Result<()> {
    match emit {
        Emit::Gha => match output_file {
            Some(path) => {
                OutputWriter::append_github_output(Path::new(path), outputs)?;
                tracing::info!(path, "Wrote outputs");
                Ok(())
            }
            None => {
                tracing::warn!("GITHUB_OUTPUT not set, falling back to stdout");
                OutputWriter::write_json(out, outputs)
            }
        },
        Emit::Json => OutputWriter::write_json(out, outputs),
        Emit::Text => OutputWriter::write_text(out, outputs),
    }?;
    out.flush()?;
    Ok(())
}
