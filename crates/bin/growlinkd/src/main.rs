//! # growlinkd: growlink daemon
//!
//! Composition root that opens the serial link and supervises the loops.
//!
//! ## Responsibilities
//! - Parse configuration (`growlink.toml`, env vars)
//! - Initialize the tracing subscriber
//! - Open the first available serial port and let the board reset
//! - Construct the link, state cache and telemetry sink (adapters)
//! - Spawn the poller and the analyzer, injecting adapters via port traits
//! - Stop when the link is lost (non-zero exit) or on SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use growlink_adapter_mqtt::MqttTelemetry;
use growlink_adapter_serial::SerialLink;
use growlink_app::ports::{LocalClock, TelemetrySink};
use growlink_app::{Analyzer, Liveness, LogTelemetry, Poller, state_cache};
use growlink_domain::error::GrowlinkError;
use growlink_domain::reading::Reading;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Why the supervisor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Shutdown,
    LinkLost,
}

/// Telemetry sink chosen at startup.
#[derive(Clone)]
enum Telemetry {
    Log(LogTelemetry),
    Mqtt(Arc<MqttTelemetry>),
}

impl TelemetrySink for Telemetry {
    async fn publish(&self, readings: &[Reading]) -> Result<(), GrowlinkError> {
        match self {
            Self::Log(sink) => sink.publish(readings).await,
            Self::Mqtt(sink) => sink.publish(readings).await,
        }
    }
}

impl Telemetry {
    fn teardown(&self) {
        if let Self::Mqtt(sink) = self {
            sink.shutdown();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("growlinkd: {}", report(&err));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.filter);

    match run(config).await {
        Ok(Outcome::Shutdown) => ExitCode::SUCCESS,
        Ok(Outcome::LinkLost) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %report(&*err), "growlinkd failed to start");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("growlinkd: invalid log filter {filter:?} ({err}), using \"info\"");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: Config) -> Result<Outcome, Box<dyn Error + Send + Sync>> {
    let schedule = config.schedule.schedule();

    let (port, stream) = growlink_adapter_serial::open_first(&config.serial)?;
    tokio::time::sleep(config.serial.startup_delay()).await;
    tracing::info!(%port, "serial link ready");

    let liveness = Liveness::new();
    let link = Arc::new(SerialLink::new(
        stream,
        config.serial.timing(),
        liveness.clone(),
    ));
    let (writer, reader) = state_cache::new();

    let telemetry = if config.telemetry.mqtt_enabled {
        Telemetry::Mqtt(Arc::new(MqttTelemetry::connect(&config.mqtt)))
    } else {
        Telemetry::Log(LogTelemetry)
    };

    let poller = Poller::new(
        Arc::clone(&link),
        telemetry.clone(),
        writer,
        liveness.clone(),
        config.schedule.poll_interval(),
    );
    let analyzer = Analyzer::new(
        Arc::clone(&link),
        LocalClock,
        reader,
        schedule,
        liveness.clone(),
        config.schedule.analyze_interval(),
    );

    let poll_task = tokio::spawn(poller.run());
    let analyze_task = tokio::spawn(analyzer.run());

    let outcome = tokio::select! {
        () = liveness.wait_down() => Outcome::LinkLost,
        () = shutdown_signal() => Outcome::Shutdown,
    };

    match outcome {
        Outcome::LinkLost => tracing::error!(%port, "serial link lost, shutting down"),
        Outcome::Shutdown => tracing::info!("shutdown requested"),
    }

    liveness.mark_down();
    poll_task.abort();
    analyze_task.abort();
    for task in [poll_task, analyze_task] {
        if let Err(err) = task.await
            && err.is_panic()
        {
            tracing::error!(%err, "loop task panicked");
        }
    }
    telemetry.teardown();

    Ok(outcome)
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let terminate = match signal(SignalKind::terminate()) {
            Ok(sig) => Some(sig),
            Err(err) => {
                tracing::warn!(%err, "failed to install SIGTERM handler, only Ctrl-C will stop growlinkd");
                None
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            () = async {
                match terminate {
                    Some(mut sig) => {
                        sig.recv().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            } => {}
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

/// Render an error with its source chain.
fn report(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
