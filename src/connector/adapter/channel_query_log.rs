use std::time::SystemTime;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::application::QueryLog;

const DEFAULT_CAPACITY: usize = 128;

/// One logged query, timestamped at enqueue time (the drain task may run
/// later).
#[derive(Debug, Clone)]
pub struct QueryRecord {
    pub query: String,
    pub received_at: SystemTime,
}

/// Non-blocking query log backed by a bounded mpsc channel.
///
/// `record` uses `try_send`, so the response path never waits on the log.
/// A full or closed channel drops the record with a warning. The default
/// drain task hands records to `tracing` under the `query_log` target,
/// which is the seam a persistent sink would replace.
pub struct ChannelQueryLog {
    sender: mpsc::Sender<QueryRecord>,
}

impl ChannelQueryLog {
    /// Build with the default capacity and spawn the tracing drain task.
    pub fn new() -> Self {
        let (log, mut receiver) = Self::with_capacity(DEFAULT_CAPACITY);
        tokio::spawn(async move {
            while let Some(record) = receiver.recv().await {
                info!(target: "query_log", "Query received: {}", record.query);
            }
        });
        log
    }

    /// Build without a drain task, handing the receiver to the caller.
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<QueryRecord>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl QueryLog for ChannelQueryLog {
    fn record(&self, query: &str) {
        let record = QueryRecord {
            query: query.to_string(),
            received_at: SystemTime::now(),
        };

        if let Err(e) = self.sender.try_send(record) {
            warn!("Query log dropped a record: {e}");
        }
    }
}
