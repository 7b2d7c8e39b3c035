use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedSender,
};
use tollgate_core::{
    Blocker, BlockerService, DismissHandle, ForegroundEvent, OverlayFrame, OverlaySurface,
};
use tollgate_prefs::PrefStore;

const NO_TASKS_MESSAGE: &str = "No pending tasks. Wait required.";

/// Overlay surface that renders to the terminal.
struct ConsoleSurface;

#[async_trait]
impl OverlaySurface for ConsoleSurface {
    async fn show(&self, frame: &OverlayFrame) -> Result<()> {
        println!("==== ACCESS DENIED ====");
        println!("blocked: {}", frame.package);
        if frame.tasks.is_empty() {
            println!("{NO_TASKS_MESSAGE}");
        } else {
            for task in &frame.tasks {
                println!(">> {task}");
            }
        }
        print_countdown(frame);
        Ok(())
    }

    async fn update(&self, frame: &OverlayFrame) -> Result<()> {
        print_countdown(frame);
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        println!("==== overlay removed ====");
        Ok(())
    }
}

fn print_countdown(frame: &OverlayFrame) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (frame.progress() * 100.0).round() as u32;
    if frame.unlocked {
        println!("UNLOCKED [{percent:>3}%] - type 'dismiss' to continue");
    } else {
        println!("{:>4}s remaining [{percent:>3}%]", frame.remaining_secs);
    }
}

/// One parsed stdin line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Dismiss,
    Foreground(String),
    Skip,
}

fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        Input::Skip
    } else if line.eq_ignore_ascii_case("dismiss") {
        Input::Dismiss
    } else {
        Input::Foreground(line.to_string())
    }
}

/// Run the service with foreground events fed from stdin, one package
/// identifier per line. The line `dismiss` stands in for the overlay's
/// dismiss tap. EOF or ctrl-c shuts down.
pub async fn execute(store: PrefStore, self_package: String) -> Result<()> {
    log::info!("reading preferences from {}", store.path().display());
    let blocker = Blocker::new(self_package, store, Arc::new(ConsoleSurface));
    let (service, events, dismiss) = BlockerService::new(blocker);

    tokio::spawn(feed_stdin(events, dismiss));
    service.run().await
}

async fn feed_stdin(events: UnboundedSender<ForegroundEvent>, dismiss: DismissHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_line(&line) {
            Input::Dismiss => dismiss.attempt_dismiss(),
            Input::Foreground(package) => {
                if events.send(ForegroundEvent::window_change(package)).is_err() {
                    break;
                }
            }
            Input::Skip => {}
        }
    }
    // the sender drops here; the service exits once the channel drains
}
