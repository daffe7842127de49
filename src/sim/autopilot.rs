//! Seeded demo input
//!
//! Plays the session without a keyboard: every tick it may request a route
//! switch. Same seed, same switches.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::switch::SwitchDirection;

/// Default chance per tick of requesting a switch
pub const DEFAULT_SWITCH_CHANCE: f64 = 0.004;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    switch_chance: f64,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self::with_chance(seed, DEFAULT_SWITCH_CHANCE)
    }

    pub fn with_chance(seed: u64, switch_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            switch_chance: switch_chance.clamp(0.0, 1.0),
        }
    }

    /// Switch to request this tick, if any
    pub fn next_input(&mut self) -> Option<SwitchDirection> {
        if !self.rng.random_bool(self.switch_chance) {
            return None;
        }
        if self.rng.random_bool(0.5) {
            Some(SwitchDirection::Left)
        } else {
            Some(SwitchDirection::Right)
        }
    }
}
