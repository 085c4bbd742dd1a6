//! rest-action-detector: command-line front end
//!
//! Reads landmark frames from a file or stdin, runs one detection session
//! and prints progress events followed by the final report as JSON lines on
//! stdout. Logs go to stderr.
//!
//! Exit status is 0 when the action was completed or confirmed, 1 otherwise.

mod cli;

use anyhow::Result;
use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use rest_action_detector::config::Config;
use rest_action_detector::events::DetectionEvent;
use rest_action_detector::input::{FrameReader, FrameSource};
use rest_action_detector::lifecycle::ShutdownSignal;
use rest_action_detector::session::{DetectionSession, SessionReport, SessionRunner};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        task = %cli.task,
        "rest-action-detector starting"
    );

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
        config.validate()?;
    }
    info!(
        timeout_secs = config.timeout_secs,
        width = config.frame.width,
        height = config.frame.height,
        "configuration loaded"
    );

    // Session runner -> stdout printer
    let (event_tx, event_rx) = broadcast::channel::<DetectionEvent>(256);
    let printer = tokio::spawn(print_events(event_rx));

    let report = run_session(&cli, &config, event_tx).await;

    // All senders are gone once run_session returns
    if let Err(e) = printer.await {
        warn!(?e, "event printer failed");
    }

    println!("{}", serde_json::to_string(&report)?);

    if report.outcome.is_success() {
        info!(task = %report.task, outcome = %report.outcome, "rest action completed");
        Ok(())
    } else {
        info!(task = %report.task, outcome = %report.outcome, status = %report.status, "rest action not completed");
        std::process::exit(1);
    }
}

/// Open the frame source and drive one session to its end
async fn run_session(
    cli: &Cli,
    config: &Config,
    event_tx: broadcast::Sender<DetectionEvent>,
) -> SessionReport {
    let source = FrameSource::from(cli.frames.as_str());

    // Reader thread -> session runner
    let (frame_tx, frame_rx) = mpsc::channel(32);
    let reader = FrameReader::new(config.frame, config.min_visibility);

    if let Err(e) = reader.start(&source, frame_tx) {
        error!(%e, "cannot open frame source");
        return SessionReport::no_camera(cli.task, e.to_string());
    }
    info!(%source, "frame reader started");

    let session = DetectionSession::start(
        cli.task,
        config.timeout(),
        config.thresholds,
        reader.started_at(),
    );
    let mut runner = SessionRunner::new(session, event_tx);
    let shutdown = ShutdownSignal::new();

    let finished = tokio::select! {
        report = runner.run(frame_rx) => Some(report),
        signal = shutdown.wait() => {
            info!(signal, "shutdown signal received");
            None
        }
    };

    let report = match finished {
        Some(report) => report,
        None => runner.cancel(),
    };

    reader.stop();
    report
}

/// Print every detection event as a JSON line
async fn print_events(mut event_rx: broadcast::Receiver<DetectionEvent>) {
    loop {
        match event_rx.recv().await {
            Ok(event) => {
                debug!(%event, "detection event");
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(?e, "failed to encode event"),
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                break;
            }
        }
    }
}
