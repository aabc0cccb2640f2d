//! The progress publish point.

use tokio::sync::mpsc::UnboundedSender;

use janwatch_core::ProgressEvent;

/// Multi-writer publish side of the progress channel. Any worker may
/// publish; only the external subscriber reads. Publishing is
/// fire-and-forget — a dropped receiver never fails a worker.
#[derive(Clone)]
pub struct ProgressSink {
    sender: UnboundedSender<ProgressEvent>,
}

impl ProgressSink {
    #[must_use]
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }

    pub fn publish(&self, event: ProgressEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("progress receiver dropped; event discarded");
        }
    }
}
