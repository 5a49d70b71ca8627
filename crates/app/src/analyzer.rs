//! Analyzer: keeps a scheduled actuator in line with its time window.
//!
//! Each cycle sleeps the analyze interval, reads the time of day, compares
//! the desired actuator state with the cached one and, only when they
//! differ, sends a `set` command through the [`Link`]. The cache is read
//! instead of querying the board so that no second live query contends for
//! the link; the cached value may be one poll interval old.

use std::time::Duration;

use growlink_domain::error::GrowlinkError;
use growlink_domain::schedule::{Decision, Schedule};

use crate::liveness::Liveness;
use crate::ports::{Clock, Link};
use crate::state_cache::StateReader;

/// Periodic schedule evaluator for one actuator.
pub struct Analyzer<L, C> {
    link: L,
    clock: C,
    cache: StateReader,
    schedule: Schedule,
    liveness: Liveness,
    interval: Duration,
}

impl<L, C> Analyzer<L, C>
where
    L: Link,
    C: Clock,
{
    pub fn new(
        link: L,
        clock: C,
        cache: StateReader,
        schedule: Schedule,
        liveness: Liveness,
        interval: Duration,
    ) -> Self {
        Self {
            link,
            clock,
            cache,
            schedule,
            liveness,
            interval,
        }
    }

    /// Evaluate the schedule once and send a command if needed, without sleeping.
    ///
    /// # Errors
    ///
    /// Returns [`GrowlinkError::LinkUnavailable`] when a command cannot be sent.
    pub async fn analyze_once(&self) -> Result<Decision, GrowlinkError> {
        let now = self.clock.time_of_day();
        let cached = self.cache.get(&self.schedule.actuator);
        let decision = self.schedule.decide(now, cached.as_ref());

        match &decision {
            Decision::Unknown => tracing::debug!(
                device = %self.schedule.actuator,
                cached = ?cached.as_ref().map(|v| v.as_str()),
                "actuator state unknown, taking no action"
            ),
            Decision::NoChange { on } => tracing::debug!(
                device = %self.schedule.actuator,
                on,
                %now,
                "actuator already in desired state"
            ),
            Decision::Switch(command) => {
                tracing::info!(
                    device = %command.device,
                    on = command.on,
                    %now,
                    window = %self.schedule.window,
                    "switching actuator"
                );
                let replies = self.link.transact(&command.to_frame()).await?;
                for line in replies {
                    tracing::debug!(%line, "ignoring reply to set command");
                }
            }
        }

        Ok(decision)
    }

    /// Analyze until the link goes down.
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            device = %self.schedule.actuator,
            window = %self.schedule.window,
            "analyzer started"
        );

        while self.liveness.is_alive() {
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                () = self.liveness.wait_down() => break,
            }

            match self.analyze_once().await {
                Ok(_) => {}
                Err(err) if err.is_fatal() => {
                    tracing::error!(%err, "link lost, analyzer stopping");
                    self.liveness.mark_down();
                }
                Err(err) => tracing::warn!(%err, "analyze cycle failed"),
            }
        }

        tracing::info!("analyzer stopped");
    }
}
