use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use logdex::{Config, IndexRequest, Indexer, JsonLinesProcessor, TracingWarnings, TriggerEvent};

#[derive(Parser)]
#[command(name = "logdex", about = "logdex — classify, filter and batch application logs for indexing")]
struct Cli {
    /// Write debug logs to /tmp/logdex-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file (defaults to ~/.config/logdex/config.toml).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index log files for AI analysis
    #[command(after_help = "\
This command indexes log files for AI analysis.

Examples:
  logdex index
  logdex index -p /var/logs/app.log
  logdex index --pattern=\"error*.log\"")]
    Index(IndexArgs),

    /// Run a command, then index the recent lines of every log source
    Exec {
        #[command(flatten)]
        output: OutputArgs,

        /// Command line to run.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Args)]
struct IndexArgs {
    /// Index a specific log file instead of the configured sources.
    #[arg(short, long, value_name = "FILE")]
    path: Option<PathBuf>,

    /// File pattern used for discovery (e.g. "*.log"), replacing the configured ones.
    #[arg(long)]
    pattern: Option<String>,

    /// Re-index files even if they were indexed before.
    #[arg(short, long)]
    force: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Append indexed entries as JSON lines to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Index(args) => index(&config, args),
        Command::Exec { output, command } => exec(&config, output, command),
    }
}

fn index(config: &Config, args: IndexArgs) -> anyhow::Result<ExitCode> {
    match &args.path {
        Some(path) => eprintln!("Indexing specific log file: {}", path.display()),
        None => eprintln!("Discovering log files from configured sources..."),
    }

    let writer = open_output(args.output.output.as_deref())?;
    let mut indexer =
        Indexer::new(config, JsonLinesProcessor::new(writer)).with_warning_log(TracingWarnings);
    let summary = indexer.run_explicit(&IndexRequest {
        path: args.path,
        pattern: args.pattern,
        force: args.force,
    });

    eprint!("{summary}");
    Ok(ExitCode::SUCCESS)
}

fn exec(config: &Config, output: OutputArgs, argv: Vec<String>) -> anyhow::Result<ExitCode> {
    let status = std::process::Command::new(&argv[0])
        .args(&argv[1..])
        .status()
        .with_context(|| format!("failed to run {}", argv[0]))?;

    let writer = open_output(output.output.as_deref())?;
    let mut indexer =
        Indexer::new(config, JsonLinesProcessor::new(writer)).with_warning_log(TracingWarnings);
    indexer.run_automatic(&TriggerEvent::from_argv(&argv, status.code()));

    Ok(match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    })
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open output {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    })
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/logdex-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("logdex debug log started — tail -f /tmp/logdex-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
