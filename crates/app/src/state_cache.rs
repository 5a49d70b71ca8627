//! Latest observed value of every device.
//!
//! The cache has exactly one writer. [`StateWriter`] is not `Clone`, so
//! whoever owns it (the poller) is the only code able to mutate the cache.
//! Readers are cheap clones of [`StateReader`].
//!
//! Backed by a tokio [`watch`] channel so that a whole poll batch is applied
//! in one step and readers never see half of a cycle.

use std::collections::HashMap;

use tokio::sync::watch;

use growlink_domain::id::DeviceId;
use growlink_domain::reading::{RawValue, Reading};

/// Full cache contents.
pub type Snapshot = HashMap<DeviceId, RawValue>;

/// Create an empty cache, returning its single writer and a first reader.
#[must_use]
pub fn new() -> (StateWriter, StateReader) {
    let writer = StateWriter::default();
    let reader = writer.reader();
    (writer, reader)
}

/// Exclusive mutation handle.
#[derive(Debug)]
pub struct StateWriter {
    sender: watch::Sender<Snapshot>,
}

impl Default for StateWriter {
    fn default() -> Self {
        Self {
            sender: watch::Sender::new(Snapshot::new()),
        }
    }
}

impl StateWriter {
    /// Insert or overwrite the value of `id`.
    pub fn update(&self, id: DeviceId, value: RawValue) {
        self.sender.send_modify(|states| {
            states.insert(id, value);
        });
    }

    /// Apply every reading of a batch at once. Later readings of the same
    /// device win.
    pub fn update_batch<I>(&self, readings: I)
    where
        I: IntoIterator<Item = Reading>,
    {
        let mut readings = readings.into_iter().peekable();
        if readings.peek().is_none() {
            return;
        }
        self.sender.send_modify(|states| {
            for reading in readings {
                states.insert(reading.device, reading.value);
            }
        });
    }

    /// New read-only view of this cache.
    #[must_use]
    pub fn reader(&self) -> StateReader {
        StateReader {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Read-only view of the cache.
#[derive(Debug, Clone)]
pub struct StateReader {
    receiver: watch::Receiver<Snapshot>,
}

impl StateReader {
    /// Last value reported by `id`, `None` if it never reported.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<RawValue> {
        self.receiver.borrow().get(id).cloned()
    }

    /// Copy of the whole cache.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.receiver.borrow().clone()
    }

    /// Number of devices that have reported at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.borrow().is_empty()
    }
}
