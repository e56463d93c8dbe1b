// tests/pipeline_tests.rs
mod common;
mod support;

use std::fs;
use std::time::Duration;

use login_masker::{
    decrypt_field, BatchProcessor, LoginQueue, MemoryQueue, PipelineError, PipelineOptions,
    QueueMessage, ReceiptHandle, SpoolDirQueue, Stage,
};
use support::{login_body, test_secret, RecordingStore, ScriptedStore, TempStore};

fn quick(ack_on_success: bool) -> PipelineOptions {
    PipelineOptions {
        wait: Duration::ZERO,
        ack_on_success,
        ..PipelineOptions::default()
    }
}

#[test]
fn bad_message_does_not_abort_the_batch() {
    common::setup();
    let queue = MemoryQueue::from_bodies([
        login_body("u1", "dev-1", "10.0.0.1", "3.1.0"),
        b"{\"user_id\": \"u2\", ".to_vec(),
        login_body("u3", "dev-3", "10.0.0.3", "4.0"),
    ]);
    let mut processor =
        BatchProcessor::new(queue, RecordingStore::default(), test_secret(), quick(false));

    let report = processor.run_once().unwrap();

    assert_eq!(report.received, 3);
    assert_eq!(report.persisted, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].error.stage(), Stage::Parse);
    assert_eq!(report.failed[0].message.handle.as_str(), "mem-000002");

    let store = processor.store();
    let users: Vec<_> = store.rows.iter().map(|r| r.user_id.as_deref()).collect();
    assert_eq!(users, [Some("u1"), Some("u3")]);
    assert_eq!(store.rows[0].app_version, Some(3));
    assert_eq!(store.rows[1].app_version, Some(4));
    assert_eq!(store.commits, 1);
}

#[test]
fn empty_queue_touches_nothing() {
    let mut processor = BatchProcessor::new(
        MemoryQueue::new(),
        RecordingStore::default(),
        test_secret(),
        quick(true),
    );

    let report = processor.run_once().unwrap();
    assert!(report.is_empty());
    assert_eq!(report.persisted, 0);
    assert!(report.failed.is_empty());

    let (queue, store) = processor.into_parts();
    assert_eq!(queue.receive_calls(), 1);
    assert!(queue.deleted().is_empty());
    assert_eq!(store.insert_calls, 0);
    assert_eq!(store.commits, 0);
}

#[test]
fn processing_an_empty_batch() {
    let mut processor = BatchProcessor::new(
        MemoryQueue::new(),
        RecordingStore::default(),
        test_secret(),
        quick(false),
    );
    let report = processor.process(Vec::new());
    assert_eq!(report.persisted, 0);
    assert!(report.failed.is_empty());
    assert_eq!(processor.store().insert_calls, 0);
    assert_eq!(processor.queue().receive_calls(), 0);
}

#[test]
fn messages_are_not_deleted_by_default() {
    let queue = MemoryQueue::from_bodies([login_body("u1", "d", "1.1.1.1", "1.0")]);
    let mut processor =
        BatchProcessor::new(queue, RecordingStore::default(), test_secret(), quick(false));

    let report = processor.run_once().unwrap();
    assert_eq!(report.persisted, 1);
    assert_eq!(report.acknowledged, 0);

    let (mut queue, _) = processor.into_parts();
    assert!(queue.deleted().is_empty());
    assert_eq!(queue.in_flight_len(), 1);
    queue.release_in_flight();
    assert_eq!(queue.visible_len(), 1);
}

#[test]
fn ack_deletes_only_persisted_messages() {
    let queue = MemoryQueue::from_bodies([
        login_body("u1", "d1", "1.1.1.1", "1.0"),
        b"not json".to_vec(),
        login_body("u3", "d3", "3.3.3.3", "3.0"),
    ]);
    let mut processor =
        BatchProcessor::new(queue, RecordingStore::default(), test_secret(), quick(true));

    let report = processor.run_once().unwrap();
    assert_eq!(report.acknowledged, 2);
    assert_eq!(report.ack_failures, 0);

    let queue = processor.queue();
    assert_eq!(
        queue.deleted(),
        [ReceiptHandle::new("mem-000001"), ReceiptHandle::new("mem-000003")]
    );
    assert_eq!(queue.in_flight_len(), 1);
}

#[test]
fn store_rejection_is_isolated() {
    let queue = MemoryQueue::from_bodies([
        login_body("u1", "d1", "1.1.1.1", "1.0"),
        login_body("locked", "d2", "2.2.2.2", "2.0"),
        login_body("u3", "d3", "3.3.3.3", "3.0"),
    ]);
    let mut processor = BatchProcessor::new(
        queue,
        ScriptedStore::rejecting(&["locked"]),
        test_secret(),
        quick(true),
    );

    let report = processor.run_once().unwrap();
    assert_eq!(report.persisted, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].error.stage(), Stage::Persist);
    assert_eq!(report.acknowledged, 2);
    assert_eq!(processor.store().rows.len(), 2);
}

#[test]
fn bad_version_is_isolated() {
    let queue = MemoryQueue::from_bodies([
        login_body("u1", "d1", "1.1.1.1", "abc.1"),
        login_body("u2", "d2", "2.2.2.2", "10"),
    ]);
    let mut processor =
        BatchProcessor::new(queue, RecordingStore::default(), test_secret(), quick(false));

    let report = processor.run_once().unwrap();
    assert_eq!(report.persisted, 1);
    assert_eq!(report.failed[0].error.stage(), Stage::Normalize);
    assert_eq!(processor.store().rows[0].app_version, None);
}

#[test]
fn commit_failure_fails_the_run_without_acks() {
    let queue = MemoryQueue::from_bodies([
        login_body("u1", "d1", "1.1.1.1", "1.0"),
        login_body("u2", "d2", "2.2.2.2", "2.0"),
    ]);
    let mut processor = BatchProcessor::new(
        queue,
        ScriptedStore::failing_commit(),
        test_secret(),
        quick(true),
    );

    match processor.run_once() {
        Err(PipelineError::Commit { report, .. }) => {
            assert_eq!(report.persisted, 2);
            assert_eq!(report.acknowledged, 0);
        }
        other => panic!("expected commit failure, got {other:?}"),
    }
    assert!(processor.queue().deleted().is_empty());
}

#[test]
fn plaintext_pii_never_reaches_the_store() {
    let secret = test_secret();
    let queue = MemoryQueue::from_bodies([login_body(
        "u1",
        "c0ffee-device-id",
        "203.0.113.77",
        "7.1",
    )]);
    let mut processor =
        BatchProcessor::new(queue, RecordingStore::default(), test_secret(), quick(false));
    processor.run_once().unwrap();

    let row = &processor.store().rows[0];
    let serialized = serde_json::to_string(row).unwrap();
    assert!(!serialized.contains("203.0.113.77"));
    assert!(!serialized.contains("c0ffee-device-id"));

    let ip = row.masked_ip.as_deref().unwrap();
    let device = row.masked_device_id.as_deref().unwrap();
    assert_eq!(decrypt_field(ip, &secret).unwrap(), "203.0.113.77");
    assert_eq!(decrypt_field(device, &secret).unwrap(), "c0ffee-device-id");
}

#[test]
fn batch_size_is_capped() {
    let bodies: Vec<_> = (0..5)
        .map(|i| login_body(&format!("u{i}"), "d", "1.1.1.1", "1.0"))
        .collect();
    let options = PipelineOptions {
        max_messages: 2,
        ..quick(true)
    };
    let mut processor = BatchProcessor::new(
        MemoryQueue::from_bodies(bodies),
        RecordingStore::default(),
        test_secret(),
        options,
    );

    assert_eq!(processor.run_once().unwrap().received, 2);
    assert_eq!(processor.run_once().unwrap().received, 2);
    assert_eq!(processor.run_once().unwrap().received, 1);
    assert!(processor.run_once().unwrap().is_empty());
    assert_eq!(processor.store().rows.len(), 5);
}

#[test]
fn borrowed_collaborators_work_too() {
    let mut queue = MemoryQueue::from_bodies([login_body("u1", "d", "1.1.1.1", "1.0")]);
    let mut store = RecordingStore::default();

    BatchProcessor::new(&mut queue, &mut store, test_secret(), quick(true))
        .run_once()
        .unwrap();

    assert_eq!(store.rows.len(), 1);
    assert_eq!(queue.deleted().len(), 1);
}

#[test]
fn spool_directory_into_sqlite() {
    common::setup();
    let spool = tempfile::tempdir().unwrap();
    fs::write(
        spool.path().join("0001.json"),
        login_body("u1", "dev-1", "198.51.100.1", "12.0.4"),
    )
    .unwrap();
    fs::write(spool.path().join("0002.json"), b"{broken").unwrap();
    fs::write(
        spool.path().join("0003.json"),
        login_body("u3", "", "198.51.100.3", ""),
    )
    .unwrap();
    fs::write(spool.path().join("README.txt"), b"ignored").unwrap();

    let target = TempStore::new();
    let queue = SpoolDirQueue::open(spool.path()).unwrap();
    let mut processor = BatchProcessor::new(queue, target.open(), test_secret(), quick(true));

    let report = processor.run_once().unwrap();
    assert_eq!(report.received, 3);
    assert_eq!(report.persisted, 2);
    assert_eq!(report.failed[0].message.handle.as_str(), "0002.json");

    // Only the failed message and the non-message file remain
    assert!(!spool.path().join("0001.json").exists());
    assert!(spool.path().join("0002.json").exists());
    assert!(!spool.path().join("0003.json").exists());
    assert!(spool.path().join("README.txt").exists());

    let rows = processor.store().fetch_all().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].app_version, Some(12));
    assert_eq!(rows[1].masked_device_id, None);
    assert_eq!(rows[1].app_version, None);
    assert_eq!(
        decrypt_field(rows[1].masked_ip.as_deref().unwrap(), &test_secret()).unwrap(),
        "198.51.100.3"
    );
}

#[test]
fn failed_message_keeps_its_body() {
    let mut processor = BatchProcessor::new(
        MemoryQueue::new(),
        RecordingStore::default(),
        test_secret(),
        quick(false),
    );
    let message = QueueMessage {
        body: b"[1, 2]".to_vec(),
        handle: ReceiptHandle::new("external-1"),
    };
    let report = processor.process(vec![message.clone()]);
    assert_eq!(report.failed[0].message, message);

    // The queue was never consulted
    let mut queue = processor.into_parts().0;
    assert!(queue.receive(1, Duration::ZERO).unwrap().is_empty());
}
