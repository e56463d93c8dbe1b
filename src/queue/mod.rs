// src/queue/mod.rs
//! Queue collaborator — where login messages come from
//!
//! The pipeline only needs `receive` and `delete`; polling, visibility and
//! redelivery are the queue's business.

use std::fmt;
use std::time::Duration;

use crate::error::QueueError;

mod memory;
mod spool;

pub use memory::MemoryQueue;
pub use spool::SpoolDirQueue;

/// Opaque token used to delete a received message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiptHandle(String);

impl ReceiptHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub body: Vec<u8>,
    pub handle: ReceiptHandle,
}

pub trait LoginQueue {
    /// Fetch up to `max_count` messages, waiting at most `wait` for the first one
    ///
    /// An empty vector means no messages were available.
    fn receive(&mut self, max_count: usize, wait: Duration)
        -> Result<Vec<QueueMessage>, QueueError>;

    /// Acknowledge a processed message so it is not delivered again
    fn delete(&mut self, handle: &ReceiptHandle) -> Result<(), QueueError>;
}

impl<Q: LoginQueue + ?Sized> LoginQueue for &mut Q {
    fn receive(
        &mut self,
        max_count: usize,
        wait: Duration,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        (**self).receive(max_count, wait)
    }

    fn delete(&mut self, handle: &ReceiptHandle) -> Result<(), QueueError> {
        (**self).delete(handle)
    }
}
