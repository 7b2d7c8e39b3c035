use crate::{
    event::{EventKind, ForegroundEvent},
    overlay::Overlay,
    session::SessionState,
    surface::OverlaySurface,
};
use anyhow::Result;
use std::{collections::HashSet, sync::Arc, time::Duration};
use tollgate_prefs::PrefStore;

/// Packages exempt from blocking: system shell UI and input-method
/// keyboards.
pub const IGNORED_PACKAGES: &[&str] = &[
    "com.android.systemui",
    "android",
    "com.google.android.inputmethod.latin",
    "com.samsung.android.honeyboard",
];

/// Whether `package` is exempt from blocking decisions.
///
/// An empty identifier counts as exempt (fail open, no block).
#[must_use]
pub fn is_ignored(package: &str, self_package: &str) -> bool {
    package.is_empty() || package == self_package || IGNORED_PACKAGES.contains(&package)
}

/// Outcome of the decision table for one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exempt identifier; nothing happens.
    Ignore,
    /// Blocked, but an overlay is already up or the session already passed
    /// the wait for this exact package.
    NoChange,
    /// Blocked for the first time this session; show the overlay.
    Block,
    /// Not blocked; reset the session and hide any overlay.
    Clear,
}

/// The foreground-switch monitor.
///
/// Consumes foreground-change notifications one at a time and owns the
/// single live overlay, so the idempotency checks in [`Blocker::decide`]
/// are the only concurrency guard the countdown needs.
pub struct Blocker {
    self_package: String,
    store: PrefStore,
    surface: Arc<dyn OverlaySurface>,
    session: SessionState,
    overlay: Option<Overlay>,
    tick_interval: Duration,
}

impl Blocker {
    #[must_use]
    pub fn new(
        self_package: impl Into<String>,
        store: PrefStore,
        surface: Arc<dyn OverlaySurface>,
    ) -> Self {
        Self {
            self_package: self_package.into(),
            store,
            surface,
            session: SessionState::new(),
            overlay: None,
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Override the countdown tick interval (one second in production).
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Apply the decision table to `package` against a fresh blocklist.
    #[must_use]
    pub fn decide(&self, package: &str, blocklist: &HashSet<String>) -> Verdict {
        if is_ignored(package, &self.self_package) {
            return Verdict::Ignore;
        }
        if blocklist.contains(package) {
            if self.overlay.is_some() || self.session.is_unlocked_for(package) {
                return Verdict::NoChange;
            }
            return Verdict::Block;
        }
        Verdict::Clear
    }

    /// Handle one foreground-change notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface host rejects a show or hide request.
    pub async fn handle_event(&mut self, event: &ForegroundEvent) -> Result<()> {
        if event.kind != EventKind::WindowStateChanged {
            return Ok(());
        }
        let package = event.package.as_str();
        let blocklist = self.store.blocklist();
        match self.decide(package, &blocklist) {
            Verdict::Ignore | Verdict::NoChange => Ok(()),
            Verdict::Block => {
                self.session.begin(package);
                self.show_overlay(package).await
            }
            Verdict::Clear => {
                self.session.clear();
                self.hide_overlay().await
            }
        }
    }

    /// Forward the user's dismiss attempt to the overlay.
    ///
    /// A no-op while the overlay is still locked or when none is showing.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface host rejects the hide request.
    pub async fn attempt_dismiss(&mut self) -> Result<()> {
        let Some(overlay) = self.overlay.as_ref() else {
            return Ok(());
        };
        if !overlay.attempt_dismiss() {
            log::debug!("dismiss attempt while locked, ignoring");
            return Ok(());
        }
        let package = overlay.package();
        self.session.mark_unlocked();
        log::info!("unlocked {package} for this session");
        self.hide_overlay().await
    }

    /// Tear down any live overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface host rejects the hide request.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.hide_overlay().await
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn overlay_showing(&self) -> bool {
        self.overlay.is_some()
    }

    async fn show_overlay(&mut self, package: &str) -> Result<()> {
        let tasks = self.store.tasks();
        let duration_secs = self.store.duration_secs();
        log::info!("blocking {package} for {duration_secs}s");
        let overlay = Overlay::show(
            package.to_string(),
            tasks,
            duration_secs,
            self.tick_interval,
            Arc::clone(&self.surface),
        )
        .await?;
        self.overlay = Some(overlay);
        Ok(())
    }

    async fn hide_overlay(&mut self) -> Result<()> {
        if let Some(overlay) = self.overlay.take() {
            drop(overlay); // aborts the countdown
            self.surface.hide().await?;
        }
        Ok(())
    }
}
