//! Upload submission state machine.
//!
//! Guarantees at most one upload is in flight, so the single result slot
//! never sees racing writes. Transitions:
//!
//! ```text
//! Idle | Succeeded | Failed --begin--> Submitting
//! Submitting --succeed--> Succeeded
//! Submitting --fail | abandon | drop--> Failed
//! ```
//!
//! `begin` hands out an [`ActiveSubmission`]. Dropping it before it is
//! completed marks the upload abandoned, so a cancelled or panicked task
//! never leaves the tracker stuck in `Submitting`.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::prediction::{
    validate_upload, ClassificationResult, ErrorCategory, ImageUpload, PredictionClient,
    UploadFailure,
};
use crate::store::{KeyValueStore, ResultStore};

/// Failure message recorded when an upload is dropped or abandoned.
pub const ABANDONED_MESSAGE: &str = "Upload abandoned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("An upload is already in progress")]
    AlreadySubmitting,
}

struct TrackerInner {
    state: SubmissionState,
    /// Signals the in-flight upload to stop. Present only while submitting.
    cancel: Option<oneshot::Sender<()>>,
}

/// Managed Tauri state wrapping the current `SubmissionState`.
pub struct SubmissionTracker {
    inner: Mutex<TrackerInner>,
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TrackerInner {
                state: SubmissionState::Idle,
                cancel: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Enter `Submitting`. Fails if an upload is already outstanding.
    pub fn begin(&self) -> Result<ActiveSubmission<'_>, SubmissionError> {
        let mut inner = self.lock();
        if inner.state == SubmissionState::Submitting {
            warn!("Rejected upload: another upload is in progress");
            return Err(SubmissionError::AlreadySubmitting);
        }

        let (tx, rx) = oneshot::channel();
        inner.state = SubmissionState::Submitting;
        inner.cancel = Some(tx);
        info!("Upload started");

        Ok(ActiveSubmission {
            tracker: self,
            cancelled: rx,
            finished: false,
        })
    }

    /// Ask the in-flight upload to stop. Returns false if none is running.
    pub fn abandon(&self) -> bool {
        match self.lock().cancel.take() {
            Some(tx) => {
                info!("Abandoning in-flight upload");
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    fn finish(&self, next: SubmissionState) {
        let mut inner = self.lock();
        if inner.state != SubmissionState::Submitting {
            error!(
                "Submission state out of sync: finishing from {:?}",
                inner.state
            );
        }
        inner.cancel = None;
        inner.state = next;
    }
}

/// Handle for the one upload in flight.
pub struct ActiveSubmission<'a> {
    tracker: &'a SubmissionTracker,
    cancelled: oneshot::Receiver<()>,
    finished: bool,
}

impl ActiveSubmission<'_> {
    pub fn succeed(mut self) {
        self.finished = true;
        self.tracker.finish(SubmissionState::Succeeded);
    }

    pub fn fail(mut self, message: impl Into<String>) {
        self.finished = true;
        self.tracker.finish(SubmissionState::Failed(message.into()));
    }

    /// Resolves once [`SubmissionTracker::abandon`] is called.
    pub async fn cancelled(&mut self) {
        let _ = (&mut self.cancelled).await;
    }
}

impl Drop for ActiveSubmission<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Upload dropped before completion");
            self.tracker
                .finish(SubmissionState::Failed(ABANDONED_MESSAGE.to_string()));
        }
    }
}

impl From<SubmissionError> for UploadFailure {
    fn from(err: SubmissionError) -> Self {
        UploadFailure {
            category: ErrorCategory::Busy,
            message: err.to_string(),
        }
    }
}

/// Run one upload end to end.
///
/// Invalid input is rejected before the tracker changes state. On success the
/// result overwrites the store slot; on failure or abandonment the slot is
/// left untouched.
pub async fn submit<S: KeyValueStore>(
    tracker: &SubmissionTracker,
    client: &PredictionClient,
    store: &ResultStore<S>,
    upload: &ImageUpload,
) -> Result<ClassificationResult, UploadFailure> {
    validate_upload(upload)?;
    let mut active = tracker.begin()?;

    let outcome = tokio::select! {
        outcome = client.submit(upload) => Some(outcome),
        _ = active.cancelled() => None,
    };

    match outcome {
        Some(Ok(result)) => {
            store.write(&result);
            active.succeed();
            Ok(result)
        }
        Some(Err(e)) => {
            warn!("Upload failed: {}", e);
            let failure = UploadFailure::from(&e);
            active.fail(failure.message.clone());
            Err(failure)
        }
        None => {
            drop(active);
            Err(UploadFailure {
                category: ErrorCategory::Cancelled,
                message: ABANDONED_MESSAGE.to_string(),
            })
        }
    }
}
