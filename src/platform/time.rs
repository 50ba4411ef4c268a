//! Fixed-step frame clock
//!
//! Hosts deliver wall-clock deltas; the simulation wants whole frames.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame deltas into a count of fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed seconds, returning how many steps to run now.
    /// Long stalls are capped at [`MAX_SUBSTEPS`] and the backlog dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.25);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Fraction of a step left over (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
