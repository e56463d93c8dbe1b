// src/queue/spool.rs
//! Directory-backed queue: one `*.json` file per message

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;
use walkdir::WalkDir;

use super::{LoginQueue, QueueMessage, ReceiptHandle};
use crate::error::QueueError;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Reads message bodies from a spool directory
///
/// The receipt handle is the file name; `delete` removes the file.
/// Received but undeleted files stay put and are delivered again.
#[derive(Debug, Clone)]
pub struct SpoolDirQueue {
    dir: PathBuf,
    poll_interval: Duration,
}

impl SpoolDirQueue {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, QueueError> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn pending_files(&self) -> Result<Vec<PathBuf>, QueueError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            let is_json = entry
                .path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if entry.file_type().is_file() && is_json {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn resolve(&self, handle: &ReceiptHandle) -> Result<PathBuf, QueueError> {
        let name = handle.as_str();
        let plain_name = Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name);
        if name.is_empty() || !plain_name {
            return Err(QueueError::UnknownHandle(name.to_owned()));
        }
        Ok(self.dir.join(name))
    }
}

impl LoginQueue for SpoolDirQueue {
    fn receive(
        &mut self,
        max_count: usize,
        wait: Duration,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        // A wait too long to represent means: keep polling until a file shows up
        let deadline = Instant::now().checked_add(wait);
        let files = loop {
            let files = self.pending_files()?;
            let now = Instant::now();
            let nap = match deadline {
                _ if !files.is_empty() => break files,
                Some(deadline) if now >= deadline => break files,
                Some(deadline) => self.poll_interval.min(deadline - now),
                None => self.poll_interval,
            };
            thread::sleep(nap);
        };

        let mut batch = Vec::with_capacity(max_count.min(files.len()));
        for path in files.into_iter().take(max_count) {
            let body = match fs::read(&path) {
                Ok(body) => body,
                // Another consumer took it between listing and reading
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            batch.push(QueueMessage {
                body,
                handle: ReceiptHandle::new(name),
            });
        }

        debug!(dir = %self.dir.display(), count = batch.len(), "received spool batch");
        Ok(batch)
    }

    fn delete(&mut self, handle: &ReceiptHandle) -> Result<(), QueueError> {
        let path = self.resolve(handle)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(QueueError::UnknownHandle(handle.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
