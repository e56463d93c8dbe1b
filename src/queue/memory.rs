// src/queue/memory.rs
//! In-process queue with in-flight tracking

use std::collections::VecDeque;
use std::time::Duration;

use super::{LoginQueue, QueueMessage, ReceiptHandle};
use crate::error::QueueError;

/// FIFO queue held in memory
///
/// Received messages stay in flight (invisible) until deleted, or until
/// [`MemoryQueue::release_in_flight`] makes them visible again.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    visible: VecDeque<QueueMessage>,
    in_flight: Vec<QueueMessage>,
    deleted: Vec<ReceiptHandle>,
    next_id: u64,
    receive_calls: usize,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bodies<I, B>(bodies: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let mut queue = Self::new();
        for body in bodies {
            queue.push(body);
        }
        queue
    }

    /// Enqueue a message body, returning its receipt handle
    pub fn push(&mut self, body: impl Into<Vec<u8>>) -> ReceiptHandle {
        self.next_id += 1;
        let handle = ReceiptHandle::new(format!("mem-{:06}", self.next_id));
        self.visible.push_back(QueueMessage {
            body: body.into(),
            handle: handle.clone(),
        });
        handle
    }

    /// Make every undeleted in-flight message visible again, oldest first
    pub fn release_in_flight(&mut self) {
        for message in self.in_flight.drain(..).rev() {
            self.visible.push_front(message);
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn deleted(&self) -> &[ReceiptHandle] {
        &self.deleted
    }

    pub fn receive_calls(&self) -> usize {
        self.receive_calls
    }
}

impl LoginQueue for MemoryQueue {
    fn receive(
        &mut self,
        max_count: usize,
        _wait: Duration,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        self.receive_calls += 1;
        let take = max_count.min(self.visible.len());
        let batch: Vec<QueueMessage> = self.visible.drain(..take).collect();
        self.in_flight.extend(batch.iter().cloned());
        Ok(batch)
    }

    fn delete(&mut self, handle: &ReceiptHandle) -> Result<(), QueueError> {
        let pos = self
            .in_flight
            .iter()
            .position(|m| &m.handle == handle)
            .ok_or_else(|| QueueError::UnknownHandle(handle.to_string()))?;
        self.in_flight.remove(pos);
        self.deleted.push(handle.clone());
        Ok(())
    }
}
