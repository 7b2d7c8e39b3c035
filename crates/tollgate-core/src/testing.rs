use crate::surface::{OverlayFrame, OverlaySurface};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Show(OverlayFrame),
    Update(OverlayFrame),
    Hide,
}

/// Surface double that records every call for assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<OverlayFrame> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::Show(frame) | SurfaceCall::Update(frame) => Some(frame),
            SurfaceCall::Hide => None,
        })
    }

    pub fn show_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Show(_)))
            .count()
    }
}

#[async_trait]
impl OverlaySurface for RecordingSurface {
    async fn show(&self, frame: &OverlayFrame) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Show(frame.clone()));
        Ok(())
    }

    async fn update(&self, frame: &OverlayFrame) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Update(frame.clone()));
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        self.calls.lock().unwrap().push(SurfaceCall::Hide);
        Ok(())
    }
}
