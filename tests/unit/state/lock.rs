//! Unit tests for the run lock

use rsiwatch::state::{LockError, RunLock};
use std::time::{Duration, SystemTime};

#[test]
fn test_second_acquire_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sent.json.lock");

    let lock = RunLock::acquire(&path, Duration::from_secs(600)).unwrap();
    assert!(path.exists());

    let err = RunLock::acquire(&path, Duration::from_secs(600)).unwrap_err();
    assert!(matches!(err, LockError::Held { .. }));

    drop(lock);
    assert!(!path.exists());
    assert!(RunLock::acquire(&path, Duration::from_secs(600)).is_ok());
}

#[test]
fn test_stale_lock_is_taken_over() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.lock");
    std::fs::write(&path, "12345\n").unwrap();

    let lock = RunLock::acquire(&path, Duration::ZERO).unwrap();
    assert_eq!(lock.path(), path.as_path());
}

fn backdate(path: &std::path::Path, by: Duration) {
    std::fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() - by)
        .unwrap();
}

#[test]
fn test_refresh_keeps_long_run_from_going_stale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.lock");

    let lock = RunLock::acquire(&path, Duration::from_secs(600)).unwrap();
    backdate(&path, Duration::from_secs(3600));
    lock.refresh().unwrap();

    let err = RunLock::acquire(&path, Duration::from_secs(600)).unwrap_err();
    assert!(matches!(err, LockError::Held { .. }));
}

#[test]
fn test_drop_leaves_lock_taken_over_by_another_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.lock");

    let lock = RunLock::acquire(&path, Duration::from_secs(600)).unwrap();
    std::fs::write(&path, "4000000000\n").unwrap();
    drop(lock);

    assert!(path.exists());
}
