/// Per-session blocking flags, scoped to the lifetime of the monitor.
///
/// Tracks which blocked package the user is currently gated on and whether
/// they already sat out the countdown for it. Nothing here survives a
/// process restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    blocked_package: Option<String>,
    unlocked: bool,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start gating on `package`; any previous unlock is forfeited.
    pub fn begin(&mut self, package: &str) {
        self.blocked_package = Some(package.to_string());
        self.unlocked = false;
    }

    /// Reset to the untracked state.
    pub fn clear(&mut self) {
        self.blocked_package = None;
        self.unlocked = false;
    }

    /// Record a successful dismiss for the tracked package.
    pub fn mark_unlocked(&mut self) {
        self.unlocked = true;
    }

    /// Whether the user already passed the wait for exactly `package`.
    #[must_use]
    pub fn is_unlocked_for(&self, package: &str) -> bool {
        self.unlocked && self.blocked_package.as_deref() == Some(package)
    }

    #[must_use]
    pub fn blocked_package(&self) -> Option<&str> {
        self.blocked_package.as_deref()
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}
