//! Fire-and-forget submissions.
//!
//! Every submission runs on its own worker thread so the page owner can keep
//! handling input while requests are outstanding. Completions come back over
//! a channel in the order the requests finish; nothing sequences them, so a
//! slower earlier request can land after a faster later one.

use crate::inference::{InferenceClient, InferenceOutcome};
use crate::{Error, Result};
use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;

/// Identifies a dispatched submission, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub u64);

/// A finished submission.
#[derive(Debug, Clone)]
pub struct Completion {
    pub id: SubmissionId,
    pub outcome: InferenceOutcome,
}

pub struct SubmissionDispatcher {
    client: Arc<InferenceClient>,
    done_tx: Sender<Completion>,
    done_rx: Receiver<Completion>,
    next_id: u64,
    in_flight: usize,
}

impl SubmissionDispatcher {
    pub fn new(client: Arc<InferenceClient>) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            client,
            done_tx,
            done_rx,
            next_id: 0,
            in_flight: 0,
        }
    }

    /// Start a submission and return immediately.
    pub fn dispatch(&mut self, image_b64: String) -> SubmissionId {
        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        self.in_flight += 1;

        let client = self.client.clone();
        let done_tx = self.done_tx.clone();
        thread::spawn(move || {
            let outcome = infer_guarded(&client, &image_b64);
            // The dispatcher may already be gone; the result is then dropped.
            let _ = done_tx.send(Completion { id, outcome });
        });
        debug!("dispatched submission {:?}", id);
        id
    }

    /// Submissions dispatched but not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Next finished submission, if one is ready.
    pub fn try_next(&mut self) -> Option<Completion> {
        let c = self.done_rx.try_recv().ok()?;
        self.in_flight -= 1;
        Some(c)
    }

    /// Block until the next submission finishes. Returns `None` when nothing
    /// is outstanding.
    pub fn wait_next(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let c = self.done_rx.recv().ok()?;
        self.in_flight -= 1;
        Some(c)
    }
}

/// Run one submission, turning a panicking transport into a failed outcome
/// so every dispatched submission produces a completion.
fn infer_guarded(client: &InferenceClient, image_b64: &str) -> InferenceOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| client.infer(image_b64))).unwrap_or_else(|_| {
        warn!("submission worker panicked");
        InferenceOutcome::Failed("worker panicked".to_string())
    })
}

/// Run a single submission off the calling task and await its outcome.
pub async fn submit(client: Arc<InferenceClient>, image_b64: String) -> Result<InferenceOutcome> {
    let (tx, rx) = oneshot::channel();
    thread::spawn(move || {
        let _ = tx.send(infer_guarded(&client, &image_b64));
    });
    rx.await
        .map_err(|e| Error::Other(format!("Submission canceled: {}", e)))
}
