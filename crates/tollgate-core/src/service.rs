use crate::{blocker::Blocker, event::ForegroundEvent};
use anyhow::Result;
use tokio::sync::mpsc;

/// Cloneable handle the surface host uses to report the user's dismiss
/// taps back into the serialized loop.
#[derive(Debug, Clone)]
pub struct DismissHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl DismissHandle {
    /// Request a dismiss. Ignored by the overlay while it is locked.
    pub fn attempt_dismiss(&self) {
        let _ = self.tx.send(());
    }
}

/// Serialized event loop around a [`Blocker`].
///
/// Platform notifications and dismiss requests are drained one at a time,
/// so no two decisions ever run concurrently and the monitor needs no
/// locking of its own.
pub struct BlockerService {
    blocker: Blocker,
    events: mpsc::UnboundedReceiver<ForegroundEvent>,
    dismissals: mpsc::UnboundedReceiver<()>,
}

impl BlockerService {
    /// Wrap `blocker`, returning the service plus the channel ends the
    /// platform adapter and surface host feed.
    #[must_use]
    pub fn new(
        blocker: Blocker,
    ) -> (
        Self,
        mpsc::UnboundedSender<ForegroundEvent>,
        DismissHandle,
    ) {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (dismiss_tx, dismissals) = mpsc::unbounded_channel();
        (
            Self {
                blocker,
                events,
                dismissals,
            },
            event_tx,
            DismissHandle { tx: dismiss_tx },
        )
    }

    /// Run until the event source closes or ctrl-c arrives, then tear down
    /// any live overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the final overlay teardown fails; handler errors
    /// during the loop are logged and skipped.
    pub async fn run(mut self) -> Result<()> {
        log::info!("blocker service started");
        loop {
            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else { break };
                    if let Err(e) = self.blocker.handle_event(&event).await {
                        log::error!("failed to handle foreground event: {e}");
                    }
                }
                Some(()) = self.dismissals.recv() => {
                    if let Err(e) = self.blocker.attempt_dismiss().await {
                        log::error!("failed to handle dismiss request: {e}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("received ctrl-c, shutting down");
                    break;
                }
            }
        }
        self.blocker.shutdown().await?;
        log::info!("blocker service stopped");
        Ok(())
    }
}
