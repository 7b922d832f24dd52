//! Snapshot feed
//!
//! Delivers complete, immutable snapshots of the record set over a channel.
//! Consumers replace whatever they held with each snapshot they receive.
//!
//! [`spawn_store_poller`] drives a feed from the JSON store: a background
//! thread reloads the store whenever its files change and publishes the
//! result. The returned [`StorePoller`] stops the thread when dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use crate::config::paths::ClaimsPaths;
use crate::error::ClaimsResult;
use crate::models::Snapshot;

use super::file_io::file_stamp;
use super::Storage;

/// Publishing half of a snapshot channel
#[derive(Debug, Clone)]
pub struct SnapshotFeed {
    sender: mpsc::Sender<Arc<Snapshot>>,
}

impl SnapshotFeed {
    /// Create a feed and the receiver a viewing session listens on
    pub fn channel() -> (Self, mpsc::Receiver<Arc<Snapshot>>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Publish a snapshot; returns `false` once the receiver is gone
    pub fn publish(&self, snapshot: Snapshot) -> bool {
        self.sender.send(Arc::new(snapshot)).is_ok()
    }
}

type StoreStamp = (Option<(SystemTime, u64)>, Option<(SystemTime, u64)>);

fn store_stamp(paths: &ClaimsPaths) -> StoreStamp {
    (file_stamp(paths.claims_file()), file_stamp(paths.users_file()))
}

fn load_snapshot(paths: &ClaimsPaths) -> ClaimsResult<Snapshot> {
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    storage.snapshot()
}

/// Handle to a running store poller
///
/// Dropping the handle stops the thread and waits for it to finish.
#[derive(Debug)]
pub struct StorePoller {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl StorePoller {
    /// Stop polling and wait for the thread to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Whether the polling thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("Store poller thread panicked");
            }
        }
    }
}

impl Drop for StorePoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Poll the store every `interval` and publish a snapshot whenever it changed
///
/// The first snapshot is published immediately. The thread exits once the
/// returned handle is stopped or dropped, checking every `interval`, or when
/// the receiving side of `feed` is gone at a publish.
pub fn spawn_store_poller(
    paths: ClaimsPaths,
    interval: Duration,
    feed: SnapshotFeed,
) -> StorePoller {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = thread::spawn(move || {
        let mut last_stamp: Option<StoreStamp> = None;
        while !stop_flag.load(Ordering::Relaxed) {
            let stamp = store_stamp(&paths);
            if last_stamp.as_ref() != Some(&stamp) {
                match load_snapshot(&paths) {
                    Ok(snapshot) => {
                        tracing::debug!(
                            claims = snapshot.claims.len(),
                            users = snapshot.users.len(),
                            "Publishing snapshot"
                        );
                        if !feed.publish(snapshot) {
                            return;
                        }
                        last_stamp = Some(stamp);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to reload record store");
                    }
                }
            }
            thread::sleep(interval);
        }
        tracing::debug!("Store poller stopped");
    });

    StorePoller {
        stop,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Claim, Money, UserId};
    use crate::storage::ClaimStore;
    use tempfile::TempDir;

    #[test]
    fn test_publish_after_receiver_dropped() {
        let (feed, receiver) = SnapshotFeed::channel();
        assert!(feed.publish(Snapshot::default()));
        drop(receiver);
        assert!(!feed.publish(Snapshot::default()));
    }

    #[test]
    fn test_poller_publishes_initial_and_changed_snapshots() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClaimsPaths::with_base_dir(temp_dir.path().to_path_buf());

        let (feed, receiver) = SnapshotFeed::channel();
        let _poller = spawn_store_poller(paths.clone(), Duration::from_millis(10), feed);

        let first = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(first.claims.is_empty());

        let storage = Storage::new(paths).unwrap();
        storage
            .insert_claim(Claim::new(
                UserId::from("u1"),
                None,
                None,
                "2024-11-20",
                "Client Meeting Lunch",
                Money::from_units(2500),
            ))
            .unwrap();

        let second = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second.claims.len(), 1);
    }

    #[test]
    fn test_stop_ends_idle_poller() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClaimsPaths::with_base_dir(temp_dir.path().to_path_buf());

        let (feed, receiver) = SnapshotFeed::channel();
        let poller = spawn_store_poller(paths, Duration::from_millis(10), feed);
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!poller.is_finished());

        // Store never changes, so the thread would otherwise never publish again
        poller.stop();
        assert!(receiver.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_dropping_handle_ends_poller() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClaimsPaths::with_base_dir(temp_dir.path().to_path_buf());

        let (feed, receiver) = SnapshotFeed::channel();
        let poller = spawn_store_poller(paths, Duration::from_millis(10), feed);
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        drop(poller);

        // The feed sender lives in the thread; a disconnect means it exited
        assert_eq!(
            receiver.recv_timeout(Duration::from_secs(5)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        );
    }
}
