use std::io::{self, Read, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tex_completion::completion::CompletionSource;
use tex_completion::config::{CompletionConfig, ConfigOverrides};
use tex_completion::logging::init_logger;

/// LaTeX completion source: classifies the text left of the cursor, queries
/// the texparser analyzer and prints ranked candidates as JSON.
#[derive(Parser, Debug)]
#[command(name = "tex-completion", version, about)]
struct Args {
    /// Text left of the cursor (read from stdin when omitted)
    #[arg(long)]
    context: Option<String>,

    /// Analyzer executable (overrides TEXPARSER_PATH)
    #[arg(long)]
    texparser_path: Option<String>,

    /// Main document passed to the analyzer (overrides TEX_COMPLETION_MAINFILE)
    #[arg(long)]
    main_file: Option<String>,

    /// Encoding of the analyzer output (overrides TEX_COMPLETION_ENCODING)
    #[arg(long)]
    encoding: Option<String>,

    /// Print source metadata instead of completing
    #[arg(long)]
    metadata: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level for stderr (otherwise RUST_LOG, default "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Also write a debug session log to the user cache directory
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), args.log_file)
        .context("failed to initialize logging")?;

    if args.metadata {
        return write_json(&CompletionSource::metadata(), args.pretty);
    }

    let config = CompletionConfig::from_env_or_default(ConfigOverrides {
        executable: args.texparser_path,
        encoding: args.encoding,
        main_file: args.main_file,
    });
    info!(
        "Completing against {} (analyzer enabled: {})",
        config.main_file.display(),
        config.is_enabled()
    );

    let left_context = match args.context {
        Some(context) => context,
        None => read_stdin_line().context("failed to read context from stdin")?,
    };
    debug!("Left context: {:?}", left_context);

    let source = CompletionSource::from_config(config);
    let response = source.complete(&left_context);
    info!("Returning {} candidates", response.candidates.len());

    write_json(&response, args.pretty)
}

/// Stdin minus one trailing line break
fn read_stdin_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

fn write_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
