//! Owned handle for a live heading stream.

use crate::domain::HeadingSample;
use tokio::sync::mpsc;

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// A subscription to a heading sensor.
///
/// Owns the receiving end of the sample channel and the action that stops the
/// producer. The release action runs at most once: on the first explicit
/// [`release`](Self::release) or on drop, whichever comes first.
pub struct HeadingSubscription {
    rx: mpsc::Receiver<HeadingSample>,
    release: Option<ReleaseFn>,
}

impl HeadingSubscription {
    pub fn new(rx: mpsc::Receiver<HeadingSample>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            rx,
            release: Some(Box::new(release)),
        }
    }

    /// Next sample, or `None` once released or when the producer has finished.
    pub async fn next_sample(&mut self) -> Option<HeadingSample> {
        if self.release.is_none() {
            return None;
        }
        self.rx.recv().await
    }

    /// Stop the stream. Returns `true` only for the call that actually released it.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                self.rx.close();
                release();
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for HeadingSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for HeadingSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadingSubscription")
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_subscription() -> (
        HeadingSubscription,
        mpsc::Sender<HeadingSample>,
        Arc<AtomicUsize>,
    ) {
        let (tx, rx) = mpsc::channel(4);
        let releases = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&releases);
        let sub = HeadingSubscription::new(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (sub, tx, releases)
    }

    #[tokio::test]
    async fn test_release_runs_once() {
        let (mut sub, _tx, releases) = counting_subscription();
        assert!(sub.release());
        assert!(!sub.release());
        drop(sub);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_releases() {
        let (sub, _tx, releases) = counting_subscription();
        drop(sub);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_samples_after_release() {
        let (mut sub, tx, _releases) = counting_subscription();
        tx.send(HeadingSample::new(1.0, 0.0)).await.unwrap();
        assert_eq!(sub.next_sample().await, Some(HeadingSample::new(1.0, 0.0)));

        tx.send(HeadingSample::new(0.0, 1.0)).await.unwrap();
        sub.release();
        assert_eq!(sub.next_sample().await, None);
        assert!(tx.send(HeadingSample::new(1.0, 1.0)).await.is_err());
    }
}
