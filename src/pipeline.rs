// src/pipeline.rs
//! Batch processor: receive → parse → mask → normalize → persist
//!
//! Every message runs through the whole chain on its own. A failure at any
//! stage is recorded against that message and the loop moves on; only the
//! queue fetch and the final commit can fail a run.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::aliases::MaskingSecret;
use crate::consts::{DEFAULT_MAX_MESSAGES, DEFAULT_WAIT_SECONDS, FIELD_APP_VERSION};
use crate::db::LoginStore;
use crate::error::{MessageError, PipelineError};
use crate::event::{LoginRow, RawLoginEvent};
use crate::masker::mask_pii;
use crate::queue::{LoginQueue, QueueMessage, ReceiptHandle};
use crate::version::normalize_app_version;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_messages: usize,
    pub wait: Duration,
    /// Delete messages from the queue once their row is committed
    pub ack_on_success: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            wait: Duration::from_secs(DEFAULT_WAIT_SECONDS),
            ack_on_success: false,
        }
    }
}

#[derive(Debug)]
pub struct FailedMessage {
    pub message: QueueMessage,
    pub error: MessageError,
}

/// Outcome of one batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub received: usize,
    pub persisted: usize,
    pub failed: Vec<FailedMessage>,
    /// Handles of messages whose row reached the store
    pub persisted_handles: Vec<ReceiptHandle>,
    pub acknowledged: usize,
    pub ack_failures: usize,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.received == 0
    }
}

/// Parse, mask and normalize one message into a row — no I/O
pub fn process_message(
    secret: &MaskingSecret,
    message: &QueueMessage,
    create_date: NaiveDate,
) -> Result<LoginRow, MessageError> {
    let event = RawLoginEvent::from_slice(&message.body)?;
    let masked = mask_pii(&event, secret)?;
    let app_version = normalize_app_version(masked.get(FIELD_APP_VERSION))?;
    Ok(LoginRow::from_masked(&masked, app_version, create_date)?)
}

/// Owns the injected queue and store for the lifetime of a run
pub struct BatchProcessor<Q, S> {
    queue: Q,
    store: S,
    secret: MaskingSecret,
    options: PipelineOptions,
}

impl<Q: LoginQueue, S: LoginStore> BatchProcessor<Q, S> {
    pub fn new(queue: Q, store: S, secret: MaskingSecret, options: PipelineOptions) -> Self {
        Self {
            queue,
            store,
            secret,
            options,
        }
    }

    /// Pull one batch, process it, commit, then acknowledge if configured
    pub fn run_once(&mut self) -> Result<BatchReport, PipelineError> {
        let batch = self
            .queue
            .receive(self.options.max_messages, self.options.wait)?;

        if batch.is_empty() {
            info!("no messages in queue");
            return Ok(BatchReport::default());
        }

        let mut report = self.process(batch);

        if let Err(source) = self.store.commit() {
            return Err(PipelineError::Commit {
                report: Box::new(report),
                source,
            });
        }

        if self.options.ack_on_success {
            self.acknowledge(&mut report);
        }

        Ok(report)
    }

    /// Run every message of `batch` through the chain and hand rows to the store
    pub fn process(&mut self, batch: Vec<QueueMessage>) -> BatchReport {
        let create_date = Local::now().date_naive();
        let mut report = BatchReport {
            received: batch.len(),
            ..BatchReport::default()
        };

        for message in batch {
            let outcome = process_message(&self.secret, &message, create_date)
                .and_then(|row| self.store.insert_login(&row).map_err(MessageError::from));

            match outcome {
                Ok(()) => {
                    debug!(handle = %message.handle, "persisted login row");
                    report.persisted += 1;
                    report.persisted_handles.push(message.handle);
                }
                Err(error) => {
                    warn!(
                        handle = %message.handle,
                        stage = %error.stage(),
                        error = %error,
                        "login message failed"
                    );
                    report.failed.push(FailedMessage { message, error });
                }
            }
        }

        info!(
            received = report.received,
            persisted = report.persisted,
            failed = report.failed.len(),
            "batch processed"
        );
        report
    }

    fn acknowledge(&mut self, report: &mut BatchReport) {
        for handle in &report.persisted_handles {
            match self.queue.delete(handle) {
                Ok(()) => report.acknowledged += 1,
                Err(e) => {
                    warn!(handle = %handle, error = %e, "failed to delete message");
                    report.ack_failures += 1;
                }
            }
        }
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (Q, S) {
        (self.queue, self.store)
    }
}
