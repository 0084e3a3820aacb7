//! Fixed-timestep frame driver
//!
//! Converts variable frame times into whole simulation ticks. Slow frames
//! are capped at `MAX_SUBSTEPS` ticks so a stall never snowballs; the
//! simulation only ever sees a count of `advance()` calls.

use crate::consts::*;
use crate::sim::{Engine, FeedbackSink};

/// Longest frame delta honoured, in seconds
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator: f32,
    ticks: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `dt` seconds of wall time and run the ticks it covers.
    /// Returns how many ticks ran.
    pub fn update<S: FeedbackSink>(&mut self, engine: &mut Engine<S>, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            engine.advance();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.ticks += u64::from(substeps);
        substeps
    }

    /// Total ticks run by this driver
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
