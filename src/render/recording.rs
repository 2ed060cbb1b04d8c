//! In-memory surface
//!
//! Keeps presented frames instead of drawing them. Used by the native demo
//! and by tests that check what an engine drew.

use super::{DrawList, DrawSurface};

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    /// Number of frames presented so far
    pub frames: usize,
    /// The most recent frame
    pub last: DrawList,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            frames: 0,
            last: DrawList::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn present(&mut self, list: &DrawList) {
        self.frames += 1;
        self.last = list.clone();
    }
}
