//! Curve Kick - a ball bending along switchable free kick routes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paths, switching, card scoring, session loop)
//! - `config`: Session configuration with validation
//! - `view`: Presentation helpers for a renderer (model matrix, chase camera)
//! - `scoreboard`: Best fair-play runs of this process

pub mod config;
pub mod scoreboard;
pub mod sim;
pub mod view;

pub use config::{ConfigError, MarkerSpec, PathSpec, PenaltyWeights, SessionConfig};
pub use scoreboard::Scoreboard;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default tuning constants (the three-route free kick scene)
pub mod consts {
    /// Progress added to `t` every tick
    pub const BALL_SPEED: f32 = 0.002;
    /// Spin added every tick (radians)
    pub const SPIN_SPEED: f32 = 0.08;
    /// A card is shown when |progress - card.t| is strictly below this
    pub const HIT_WINDOW: f32 = 0.05;
    /// Sampling resolution of the continuity search (K steps, K + 1 samples)
    pub const CONTINUITY_SAMPLES: u32 = 100;

    /// Score of a clean run
    pub const MAX_FAIR_PLAY_SCORE: f32 = 100.0;
    /// Penalty units charged per minor (yellow) card weight
    pub const MINOR_PENALTY: f32 = 1.0;
    /// Penalty units charged per major (red) card weight
    pub const MAJOR_PENALTY: f32 = 10.0;
    /// Penalty units that halve the score
    pub const PENALTY_HALVING: f32 = 10.0;

    /// Every route starts at the penalty spot...
    pub const ROUTE_START: [f32; 3] = [0.0, 0.0, 100.0];
    /// ...and ends in the goal mouth
    pub const ROUTE_END: [f32; 3] = [0.0, 0.0, 0.0];
    /// Sideways/upward reach of each route's control point
    pub const ROUTE_BEND: f32 = 50.0;

    /// Segments used when drawing a route as a polyline
    pub const ROUTE_DRAW_SEGMENTS: usize = 50;
}

/// World axis used to compare positions across routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    /// Depth: the axis every route progresses along (start z=100 to goal z=0)
    #[default]
    Z,
}

/// Component of `v` along `axis`
#[inline]
pub fn axis_component(v: Vec3, axis: Axis) -> f32 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

/// Wrap an accumulated angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
