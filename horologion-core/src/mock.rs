//! Test doubles for the hardware seams
//!
//! Shared by the effect, policy and engine tests. The mocks record every
//! mutation so tests can assert not just the final state but who wrote
//! what, in which order.

use crate::frame::DisplayFrame;
use crate::traits::{AnodePower, TubeDisplay};

/// A display that records every latched frame.
#[derive(Debug, Default)]
pub struct MockDisplay {
    current: DisplayFrame,
    pub writes: Vec<DisplayFrame>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn showing(frame: DisplayFrame) -> Self {
        Self {
            current: frame,
            writes: Vec::new(),
        }
    }
}

impl TubeDisplay for MockDisplay {
    fn write_frame(&mut self, frame: DisplayFrame) {
        self.current = frame;
        self.writes.push(frame);
    }

    fn current_frame(&self) -> DisplayFrame {
        self.current
    }
}

/// A power rail that records every brightness write.
#[derive(Debug, Default)]
pub struct MockPower {
    level: u8,
    hv: bool,
    pub level_writes: Vec<u8>,
}

impl MockPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lit(level: u8) -> Self {
        Self {
            level,
            hv: true,
            level_writes: Vec::new(),
        }
    }
}

impl AnodePower for MockPower {
    fn set_brightness(&mut self, level: u8) {
        self.level = level;
        self.level_writes.push(level);
    }

    fn brightness(&self) -> u8 {
        self.level
    }

    fn set_hv(&mut self, on: bool) {
        self.hv = on;
    }

    fn is_hv_on(&self) -> bool {
        self.hv
    }
}
