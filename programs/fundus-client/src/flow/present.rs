//! Maps a submission's phases onto user-facing notifications.
//!
//! The sink shows one notice per attempt: it appears when the attempt goes
//! pending and is later replaced in place by exactly one terminal message.
//! [`PendingNotice`] is consumed by that terminal call, so a notice can be
//! neither finished twice nor silently abandoned. Dropping it unfinished
//! (e.g. when the submitting future is dropped) reports a failure, unless
//! the donation was already confirmed on chain, in which case it reports
//! success.

use crate::{error::DonationError, flow::SubmissionOutcome};
use solana_sdk::signature::Signature;
use std::sync::Arc;

pub type NoticeId = u64;

/// Where notifications go: a toast layer, a terminal, a test recorder.
pub trait NotificationSink: Send + Sync {
    fn announce_pending(&self, message: &str) -> NoticeId;

    fn replace_with_success(&self, id: NoticeId, message: &str);

    fn replace_with_failure(&self, id: NoticeId, message: &str);

    /// Standalone warning, for problems outside a pending attempt.
    fn warn(&self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessages {
    pub pending: String,
    pub success: String,
    pub failure: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            pending: "Processing donation...".to_string(),
            success: "Thank you for your donation! 🎉".to_string(),
            failure: "Transaction failed 😔".to_string(),
        }
    }
}

pub struct StatusPresenter {
    sink: Arc<dyn NotificationSink>,
    messages: StatusMessages,
}

impl StatusPresenter {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_messages(sink, StatusMessages::default())
    }

    pub fn with_messages(sink: Arc<dyn NotificationSink>, messages: StatusMessages) -> Self {
        Self { sink, messages }
    }

    pub fn pending(&self) -> PendingNotice<'_> {
        let id = self.sink.announce_pending(&self.messages.pending);
        PendingNotice {
            presenter: self,
            id,
            finished: false,
            confirmed: None,
        }
    }

    pub fn warn(&self, err: &DonationError) {
        self.sink.warn(&err.to_string());
    }
}

#[must_use = "a pending notice must be finished with `succeed` or `fail`"]
pub struct PendingNotice<'a> {
    presenter: &'a StatusPresenter,
    id: NoticeId,
    finished: bool,
    confirmed: Option<Signature>,
}

impl PendingNotice<'_> {
    pub fn id(&self) -> NoticeId {
        self.id
    }

    /// Marks the donation as landed. From here on the notice can no longer
    /// end in failure, even if it is dropped before `succeed`.
    pub fn confirm(&mut self, signature: Signature) {
        self.confirmed = Some(signature);
    }

    pub fn succeed(mut self, signature: Signature) -> SubmissionOutcome {
        self.finished = true;
        let p = self.presenter;
        p.sink.replace_with_success(self.id, &p.messages.success);
        SubmissionOutcome::Success(signature)
    }

    pub fn fail(mut self, reason: impl Into<String>) -> SubmissionOutcome {
        self.finished = true;
        let p = self.presenter;
        p.sink.replace_with_failure(self.id, &p.messages.failure);
        SubmissionOutcome::Failure(reason.into())
    }

    pub fn finish(self, result: &Result<Signature, DonationError>) -> SubmissionOutcome {
        match result {
            Ok(signature) => self.succeed(*signature),
            Err(err) => self.fail(err.to_string()),
        }
    }
}

impl Drop for PendingNotice<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let p = self.presenter;
        match self.confirmed {
            Some(_) => p.sink.replace_with_success(self.id, &p.messages.success),
            None => p.sink.replace_with_failure(self.id, &p.messages.failure),
        }
    }
}
