use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use logfan::{FileSink, HttpPostSink, Level, Logging, LoggingConfig, Sink, StreamSink};

#[derive(Parser)]
#[command(name = "logfan-demo")]
#[command(about = "Exercises the fan-out logging facade against live sinks")]
struct Cli {
    /// TOML sink-set description; replaces the built-in demo sink set
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host of the receiving HTTP endpoint
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port of the receiving HTTP endpoint
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// URL path messages are posted to
    #[arg(long, default_value = "/message")]
    url_path: String,
}

/// Initializes the demo's own diagnostics with console and file output.
fn init_diagnostics() {
    let _ = std::fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "demo.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(file_layer)
        .with(console_layer)
        .init();

    // We need to keep the guard in scope to ensure logs are flushed on exit
    std::mem::forget(_guard);
}

fn main() -> anyhow::Result<()> {
    init_diagnostics();
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        let sinks = LoggingConfig::load(path)
            .and_then(|config| config.build_sinks())
            .with_context(|| format!("building sink set from {}", path.display()))?;
        info!(count = sinks.len(), "sink set loaded from config");
        Logging::set_services(sinks).send("Sink set loaded from config", Level::Info)?;
        return Ok(());
    }

    let stream: Arc<dyn Sink> = Arc::new(StreamSink::new(Level::Debug));
    let file: Arc<dyn Sink> =
        Arc::new(FileSink::new(Level::Debug, None).context("opening the default log file")?);
    let http: Arc<dyn Sink> =
        Arc::new(HttpPostSink::post(Level::Debug, &cli.host, cli.port, &cli.url_path)?);

    Logging::set_services(vec![stream.clone(), file.clone(), http.clone()])
        .send("This is a PoC to try my logging service", Level::Info)?;
    Logging::send("This is another sentence I send", Level::Debug)?;

    Logging::set_services(vec![file.clone()]);
    Logging::send("This is my last message", Level::Warning)?;

    Logging::set_services(vec![http.clone()]);
    Logging::send("I send a message", Level::Info)?;

    Logging::set_services(vec![http, file, stream]);
    Logging::send("Some characters: ñÑ%&/()=?¿", Level::Error)?;

    info!("demo finished");
    Ok(())
}
