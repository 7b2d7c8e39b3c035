use anyhow::Result;
use async_trait::async_trait;

/// Render snapshot handed to the surface host.
///
/// Emitted after every overlay transition; the host owns the actual pixels
/// and touch interception.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub package: String,
    pub tasks: Vec<String>,
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub unlocked: bool,
}

impl OverlayFrame {
    /// Elapsed fraction of the countdown, from 0.0 up to 1.0.
    ///
    /// Constant 1.0 for a zero-length countdown.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.total_secs == 0 {
            return 1.0;
        }
        1.0 - self.remaining_secs as f32 / self.total_secs as f32
    }
}

/// Host for the full-screen, input-opaque overlay surface.
///
/// Show/hide are idempotent from the caller's point of view: the monitor
/// never shows twice without a hide in between, and a hide without a
/// visible surface is never requested.
#[async_trait]
pub trait OverlaySurface: Send + Sync {
    /// Put the surface on screen, on top of everything, rendering `frame`.
    async fn show(&self, frame: &OverlayFrame) -> Result<()>;

    /// Refresh an already-visible surface with `frame`.
    async fn update(&self, frame: &OverlayFrame) -> Result<()>;

    /// Take the surface down.
    async fn hide(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(remaining: u32, total: u32) -> OverlayFrame {
        OverlayFrame {
            package: String::from("com.example.game"),
            tasks: Vec::new(),
            remaining_secs: remaining,
            total_secs: total,
            unlocked: remaining == 0,
        }
    }

    #[test]
    fn progress_rises_from_zero_to_one() {
        assert!((frame(4, 4).progress() - 0.0).abs() < f32::EPSILON);
        assert!((frame(3, 4).progress() - 0.25).abs() < f32::EPSILON);
        assert!((frame(1, 4).progress() - 0.75).abs() < f32::EPSILON);
        assert!((frame(0, 4).progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_total_reads_as_complete() {
        assert!((frame(0, 0).progress() - 1.0).abs() < f32::EPSILON);
    }
}
