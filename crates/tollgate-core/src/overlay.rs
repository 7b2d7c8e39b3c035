use crate::surface::{OverlayFrame, OverlaySurface};
use anyhow::Result;
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{task::JoinHandle, time::interval};

/// Overlay lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    /// Countdown running; dismissal is disabled.
    Locked,
    /// Countdown elapsed; dismissal is enabled.
    Unlocked,
    /// Terminal: the user dismissed and the surface is coming down.
    Dismissed,
}

/// State machine behind a single overlay.
///
/// Package and task list are captured once at creation and never refreshed,
/// even if preferences are edited while the overlay is up.
#[derive(Debug)]
pub struct OverlayState {
    package: String,
    tasks: Vec<String>,
    total_secs: u32,
    remaining_secs: u32,
    phase: LockPhase,
}

impl OverlayState {
    #[must_use]
    pub fn new(package: String, tasks: Vec<String>, duration_secs: u32) -> Self {
        let phase = if duration_secs == 0 {
            LockPhase::Unlocked
        } else {
            LockPhase::Locked
        };
        Self {
            package,
            tasks,
            total_secs: duration_secs,
            remaining_secs: duration_secs,
            phase,
        }
    }

    /// One countdown second. No-op outside `Locked`.
    pub fn tick(&mut self) -> LockPhase {
        if self.phase == LockPhase::Locked {
            self.remaining_secs -= 1;
            if self.remaining_secs == 0 {
                self.phase = LockPhase::Unlocked;
            }
        }
        self.phase
    }

    /// Dismiss if unlocked. Returns true on the transition to `Dismissed`.
    pub fn attempt_dismiss(&mut self) -> bool {
        if self.phase == LockPhase::Unlocked {
            self.phase = LockPhase::Dismissed;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn frame(&self) -> OverlayFrame {
        OverlayFrame {
            package: self.package.clone(),
            tasks: self.tasks.clone(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            unlocked: self.phase != LockPhase::Locked,
        }
    }
}

/// Owned handle to the live overlay: shared state plus its countdown task.
///
/// Dropping the handle aborts the countdown, so the task's lifetime is tied
/// 1:1 to the visible surface.
pub struct Overlay {
    state: Arc<Mutex<OverlayState>>,
    ticker: JoinHandle<()>,
}

impl Overlay {
    /// Push the initial frame to `surface` and start the countdown.
    ///
    /// `tick_interval` is one second in production; tests shrink it.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface host rejects the initial frame.
    pub async fn show(
        package: String,
        tasks: Vec<String>,
        duration_secs: u32,
        tick_interval: Duration,
        surface: Arc<dyn OverlaySurface>,
    ) -> Result<Self> {
        let state = OverlayState::new(package, tasks, duration_secs);
        surface.show(&state.frame()).await?;
        let state = Arc::new(Mutex::new(state));
        let ticker = tokio::spawn(run_countdown(Arc::clone(&state), tick_interval, surface));
        Ok(Self { state, ticker })
    }

    #[must_use]
    pub fn package(&self) -> String {
        self.lock().package().to_string()
    }

    #[must_use]
    pub fn phase(&self) -> LockPhase {
        self.lock().phase()
    }

    /// Forward a dismiss attempt. True when the overlay accepted it.
    pub fn attempt_dismiss(&self) -> bool {
        self.lock().attempt_dismiss()
    }

    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

async fn run_countdown(
    state: Arc<Mutex<OverlayState>>,
    tick_interval: Duration,
    surface: Arc<dyn OverlaySurface>,
) {
    let mut timer = interval(tick_interval);
    timer.tick().await; // the first tick completes immediately
    loop {
        timer.tick().await;
        let frame = {
            let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if state.phase() != LockPhase::Locked {
                break;
            }
            state.tick();
            state.frame()
        };
        if let Err(e) = surface.update(&frame).await {
            log::warn!("overlay update failed: {e}");
        }
        if frame.unlocked {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, SurfaceCall};
    use tokio::time::sleep;

    fn locked_state(duration: u32) -> OverlayState {
        OverlayState::new(
            String::from("com.example.game"),
            vec![String::from("Stretch")],
            duration,
        )
    }

    #[test]
    fn starts_locked_with_full_countdown() {
        let state = locked_state(60);
        assert_eq!(state.phase(), LockPhase::Locked);
        assert_eq!(state.remaining_secs(), 60);
    }

    #[test]
    fn zero_duration_starts_unlocked() {
        let state = locked_state(0);
        assert_eq!(state.phase(), LockPhase::Unlocked);
        assert!(state.frame().unlocked);
    }

    #[test]
    fn ticks_count_down_then_unlock_and_stay() {
        let mut state = locked_state(3);
        assert_eq!(state.tick(), LockPhase::Locked);
        assert_eq!(state.remaining_secs(), 2);
        assert_eq!(state.tick(), LockPhase::Locked);
        assert_eq!(state.tick(), LockPhase::Unlocked);
        assert_eq!(state.remaining_secs(), 0);

        // further ticks change nothing
        assert_eq!(state.tick(), LockPhase::Unlocked);
        assert_eq!(state.remaining_secs(), 0);
    }

    #[test]
    fn dismiss_is_gated_on_unlock() {
        let mut state = locked_state(2);
        assert!(!state.attempt_dismiss());
        assert_eq!(state.phase(), LockPhase::Locked);

        state.tick();
        state.tick();
        assert!(state.attempt_dismiss());
        assert_eq!(state.phase(), LockPhase::Dismissed);
        assert!(!state.attempt_dismiss());
    }

    #[tokio::test]
    async fn countdown_task_pushes_updates_until_unlocked() {
        let surface = Arc::new(RecordingSurface::new());
        let overlay = Overlay::show(
            String::from("com.example.game"),
            vec![String::from("Stretch")],
            2,
            Duration::from_millis(10),
            surface.clone(),
        )
        .await
        .unwrap();

        sleep(Duration::from_millis(100)).await;

        let calls = surface.calls();
        assert!(matches!(&calls[0], SurfaceCall::Show(frame) if frame.remaining_secs == 2));
        let last = surface.last_frame().unwrap();
        assert!(last.unlocked);
        assert_eq!(last.remaining_secs, 0);
        assert_eq!(overlay.phase(), LockPhase::Unlocked);

        // remaining_secs strictly decreases across updates
        let updates: Vec<u32> = calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Update(frame) => Some(frame.remaining_secs),
                _ => None,
            })
            .collect();
        assert_eq!(updates, vec![1, 0]);
    }

    #[tokio::test]
    async fn dropping_the_handle_stops_the_countdown() {
        let surface = Arc::new(RecordingSurface::new());
        let overlay = Overlay::show(
            String::from("com.example.game"),
            Vec::new(),
            1000,
            Duration::from_millis(10),
            surface.clone(),
        )
        .await
        .unwrap();

        sleep(Duration::from_millis(35)).await;
        drop(overlay);
        let after_drop = surface.calls().len();

        sleep(Duration::from_millis(50)).await;
        assert_eq!(surface.calls().len(), after_drop);
    }
}
