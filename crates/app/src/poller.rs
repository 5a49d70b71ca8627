//! Poller: periodically queries every device and refreshes the state cache.
//!
//! Each cycle sleeps the poll interval, sends `get` through the [`Link`],
//! parses the `name:value` lines, applies them to the cache and forwards the
//! batch to the [`TelemetrySink`]. Malformed lines and publish failures are
//! logged and absorbed; only a lost link ends the loop.

use std::time::Duration;

use growlink_domain::error::GrowlinkError;
use growlink_domain::protocol::{self, QUERY};
use growlink_domain::reading::Reading;

use crate::liveness::Liveness;
use crate::ports::{Link, TelemetrySink};
use crate::state_cache::StateWriter;

/// Summary of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    /// Well-formed readings, in arrival order.
    pub readings: Vec<Reading>,
    /// Number of lines dropped as malformed.
    pub malformed: usize,
    /// Whether the batch reached the telemetry sink.
    pub published: bool,
}

/// Periodic status poller. Owns the only [`StateWriter`].
pub struct Poller<L, T> {
    link: L,
    sink: T,
    cache: StateWriter,
    liveness: Liveness,
    interval: Duration,
}

impl<L, T> Poller<L, T>
where
    L: Link,
    T: TelemetrySink,
{
    pub fn new(
        link: L,
        sink: T,
        cache: StateWriter,
        liveness: Liveness,
        interval: Duration,
    ) -> Self {
        Self {
            link,
            sink,
            cache,
            liveness,
            interval,
        }
    }

    /// Run a single query/parse/update/publish cycle, without sleeping.
    ///
    /// The cache is updated after the link transaction has completed, so it
    /// never holds the link while mutating.
    ///
    /// # Errors
    ///
    /// Returns [`GrowlinkError::LinkUnavailable`] when the query cannot be
    /// exchanged. Publish failures are not errors here.
    pub async fn poll_once(&self) -> Result<PollReport, GrowlinkError> {
        let lines = self.link.transact(QUERY).await?;
        let batch = protocol::parse_batch(&lines);

        for frame in &batch.rejected {
            let err = GrowlinkError::MalformedFrame(frame.clone());
            tracing::warn!(%err, "dropping response line");
        }
        for reading in &batch.readings {
            tracing::debug!(device = %reading.device, value = %reading.value, "received");
        }

        self.cache.update_batch(batch.readings.iter().cloned());

        let published = if batch.readings.is_empty() {
            false
        } else {
            match self.sink.publish(&batch.readings).await {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(%err, count = batch.readings.len(), "telemetry publish failed");
                    false
                }
            }
        };

        Ok(PollReport {
            readings: batch.readings,
            malformed: batch.rejected.len(),
            published,
        })
    }

    /// Poll until the link goes down.
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs_f64(), "poller started");

        while self.liveness.is_alive() {
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                () = self.liveness.wait_down() => break,
            }

            match self.poll_once().await {
                Ok(report) => tracing::debug!(
                    readings = report.readings.len(),
                    malformed = report.malformed,
                    published = report.published,
                    "poll cycle complete"
                ),
                Err(err) if err.is_fatal() => {
                    tracing::error!(%err, "link lost, poller stopping");
                    self.liveness.mark_down();
                }
                Err(err) => tracing::warn!(%err, "poll cycle failed"),
            }
        }

        tracing::info!("poller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use growlink_domain::id::DeviceId;
    use growlink_domain::reading::RawValue;

    use crate::state_cache::{self, StateReader};

    // ── Scripted link ──────────────────────────────────────────────

    #[derive(Default)]
    struct ScriptedLink {
        responses: Mutex<VecDeque<Result<Vec<String>, ()>>>,
        sent: Mutex<Vec<String>>,
    }

    impl ScriptedLink {
        fn with(responses: Vec<Result<Vec<&str>, ()>>) -> Self {
            let responses = responses
                .into_iter()
                .map(|r| r.map(|lines| lines.into_iter().map(String::from).collect()))
                .collect();
            Self {
                responses: Mutex::new(responses),
                sent: Mutex::default(),
            }
        }
    }

    impl Link for ScriptedLink {
        fn transact(
            &self,
            command: &str,
        ) -> impl Future<Output = Result<Vec<String>, GrowlinkError>> + Send {
            self.sent.lock().unwrap().push(command.to_string());
            let next = self.responses.lock().unwrap().pop_front();
            async move {
                match next {
                    Some(Ok(lines)) => Ok(lines),
                    Some(Err(())) | None => Err(GrowlinkError::LinkUnavailable("closed".into())),
                }
            }
        }
    }

    // ── Recording sink ─────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingSink {
        batches: Mutex<Vec<Vec<Reading>>>,
        fail: bool,
    }

    impl TelemetrySink for RecordingSink {
        fn publish(
            &self,
            readings: &[Reading],
        ) -> impl Future<Output = Result<(), GrowlinkError>> + Send {
            let result = if self.fail {
                Err(GrowlinkError::Publish("sink offline".into()))
            } else {
                self.batches.lock().unwrap().push(readings.to_vec());
                Ok(())
            };
            async { result }
        }
    }

    fn make_poller(
        link: ScriptedLink,
        sink: RecordingSink,
    ) -> (Poller<ScriptedLink, RecordingSink>, StateReader, Liveness) {
        let (writer, reader) = state_cache::new();
        let liveness = Liveness::new();
        let poller = Poller::new(link, sink, writer, liveness.clone(), Duration::from_secs(10));
        (poller, reader, liveness)
    }

    fn id(name: &str) -> DeviceId {
        DeviceId::new(name).unwrap()
    }

    #[tokio::test]
    async fn should_send_get_query() {
        let link = ScriptedLink::with(vec![Ok(vec![])]);
        let (poller, _, _) = make_poller(link, RecordingSink::default());
        poller.poll_once().await.unwrap();
        assert_eq!(*poller.link.sent.lock().unwrap(), ["get"]);
    }

    #[tokio::test]
    async fn should_store_every_well_formed_reading() {
        let link = ScriptedLink::with(vec![Ok(vec![
            "FloatSwitch:1",
            "RelaySwitch3:0",
            "DHT22Sensor0temp:21.5",
        ])]);
        let (poller, reader, _) = make_poller(link, RecordingSink::default());

        let report = poller.poll_once().await.unwrap();

        assert_eq!(report.readings.len(), 3);
        assert_eq!(report.malformed, 0);
        assert_eq!(reader.get(&id("FloatSwitch")), Some(RawValue::from("1")));
        assert_eq!(reader.get(&id("RelaySwitch3")), Some(RawValue::from("0")));
        assert_eq!(reader.get(&id("DHT22Sensor0temp")), Some(RawValue::from("21.5")));
    }

    #[tokio::test]
    async fn should_drop_malformed_lines_and_keep_the_rest() {
        let link = ScriptedLink::with(vec![Ok(vec!["FloatSwitch:1", "garbage", ":0", "RelaySwitch3:0"])]);
        let (poller, reader, _) = make_poller(link, RecordingSink::default());

        let report = poller.poll_once().await.unwrap();

        assert_eq!(report.malformed, 2);
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.get(&id("garbage")), None);
    }

    #[tokio::test]
    async fn should_publish_the_cycle_batch() {
        let link = ScriptedLink::with(vec![
            Ok(vec!["FloatSwitch:1", "RelaySwitch3:0"]),
            Ok(vec!["RelaySwitch3:1"]),
        ]);
        let (poller, _, _) = make_poller(link, RecordingSink::default());

        poller.poll_once().await.unwrap();
        let report = poller.poll_once().await.unwrap();

        assert!(report.published);
        let batches = poller.sink.batches.lock().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1], vec![Reading::new(id("RelaySwitch3"), RawValue::from("1"))]);
    }

    #[tokio::test]
    async fn should_not_publish_empty_batch() {
        let link = ScriptedLink::with(vec![Ok(vec!["noise"])]);
        let (poller, _, _) = make_poller(link, RecordingSink::default());

        let report = poller.poll_once().await.unwrap();

        assert!(!report.published);
        assert!(poller.sink.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_update_cache_even_when_publish_fails() {
        let link = ScriptedLink::with(vec![Ok(vec!["FloatSwitch:0"])]);
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let (poller, reader, _) = make_poller(link, sink);

        let report = poller.poll_once().await.unwrap();

        assert!(!report.published);
        assert_eq!(reader.get(&id("FloatSwitch")), Some(RawValue::from("0")));
    }

    #[tokio::test]
    async fn should_propagate_link_unavailable() {
        let link = ScriptedLink::with(vec![Err(())]);
        let (poller, _, _) = make_poller(link, RecordingSink::default());

        let err = poller.poll_once().await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_and_mark_link_down_when_link_is_lost() {
        let link = ScriptedLink::with(vec![Ok(vec!["FloatSwitch:1"]), Err(())]);
        let (poller, reader, liveness) = make_poller(link, RecordingSink::default());

        tokio::time::timeout(Duration::from_secs(3600), poller.run())
            .await
            .expect("poller should stop on its own");

        assert!(!liveness.is_alive());
        assert_eq!(reader.get(&id("FloatSwitch")), Some(RawValue::from("1")));
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_publish_failures() {
        let link = ScriptedLink::with(vec![
            Ok(vec!["FloatSwitch:1"]),
            Ok(vec!["FloatSwitch:0"]),
            Ok(vec!["FloatSwitch:1"]),
            Err(()),
        ]);
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let link = Arc::new(link);
        let (writer, reader) = state_cache::new();
        let poller = Poller::new(
            Arc::clone(&link),
            sink,
            writer,
            Liveness::new(),
            Duration::from_secs(10),
        );

        tokio::time::timeout(Duration::from_secs(3600), poller.run())
            .await
            .expect("poller should stop on its own");

        assert_eq!(link.sent.lock().unwrap().len(), 4);
        assert_eq!(reader.get(&id("FloatSwitch")), Some(RawValue::from("1")));
    }

    #[tokio::test(start_paused = true)]
    async fn should_exit_without_polling_when_link_already_down() {
        let link = ScriptedLink::with(vec![Ok(vec!["FloatSwitch:1"])]);
        let (poller, reader, liveness) = make_poller(link, RecordingSink::default());
        liveness.mark_down();

        poller.run().await;

        assert!(reader.is_empty());
    }
}
