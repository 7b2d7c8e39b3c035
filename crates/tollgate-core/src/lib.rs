pub mod blocker;
pub mod event;
pub mod overlay;
pub mod service;
pub mod session;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use blocker::{is_ignored, Blocker, Verdict, IGNORED_PACKAGES};
pub use event::{EventKind, ForegroundEvent};
pub use overlay::{LockPhase, Overlay, OverlayState};
pub use service::{BlockerService, DismissHandle};
pub use session::SessionState;
pub use surface::{OverlayFrame, OverlaySurface};
