//! Session state and core simulation types
//!
//! Everything a tick mutates lives here: the follower, the card markers and
//! the penalty tally. The route geometry itself is immutable.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::path::PathSet;
use crate::wrap_angle;

/// Phase of the follower within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowerPhase {
    /// 0 <= progress <= 1
    Traveling,
    /// progress > 1; the session scores the run and resets within the same tick
    Finished,
}

/// Card severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Yellow card
    Minor,
    /// Red card
    Major,
}

/// A card placed on a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub id: u32,
    /// Index of the route the card sits on
    pub path: usize,
    /// Parameter along that route
    pub t: f32,
    pub kind: CardKind,
    /// Penalty units charged to the card's tier when shown
    pub weight: f32,
    /// Shown this run; cleared when the run resets
    pub consumed: bool,
}

impl Marker {
    pub fn new(id: u32, path: usize, t: f32, kind: CardKind, weight: f32) -> Self {
        Self {
            id,
            path,
            t,
            kind,
            weight,
            consumed: false,
        }
    }

    /// Whether the scene should still draw this card
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.consumed
    }

    /// World position of the card on its route
    pub fn position(&self, paths: &PathSet) -> Vec3 {
        paths.evaluate(self.path, self.t)
    }
}

/// The ball travelling along the active route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follower {
    /// Active route; only changed through a switch so it always indexes the session's routes
    path: usize,
    /// Progress along the active route; exceeds 1 on the tick the run ends
    pub progress: f32,
    /// Progress per tick
    pub speed: f32,
    /// Spin per tick (radians)
    pub spin_speed: f32,
    /// Accumulated spin, kept in [0, 2π)
    pub spin: f32,
    /// Last position evaluated while traveling
    pub position: Vec3,
}

impl Follower {
    /// `path` must index `paths`; the session validates it from the config
    pub(crate) fn new(paths: &PathSet, path: usize, speed: f32, spin_speed: f32) -> Self {
        Self {
            path,
            progress: 0.0,
            speed,
            spin_speed,
            spin: 0.0,
            position: paths.evaluate(path, 0.0),
        }
    }

    /// Index of the active route
    #[inline]
    pub fn path(&self) -> usize {
        self.path
    }

    /// Move onto another route at `progress`
    pub(crate) fn reanchor(&mut self, paths: &PathSet, path: usize, progress: f32) {
        self.path = path;
        self.progress = progress;
        self.position = paths.evaluate(path, progress);
    }

    pub fn phase(&self) -> FollowerPhase {
        if self.progress > 1.0 {
            FollowerPhase::Finished
        } else {
            FollowerPhase::Traveling
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase() == FollowerPhase::Finished
    }

    /// Advance one tick. Position is only re-evaluated while still traveling.
    pub fn advance(&mut self, paths: &PathSet) -> FollowerPhase {
        self.progress += self.speed;
        self.spin = wrap_angle(self.spin + self.spin_speed);

        let phase = self.phase();
        if phase == FollowerPhase::Traveling {
            self.position = paths.evaluate(self.path, self.progress);
        }
        phase
    }

    /// Spin about the X axis (pure animation, not the route tangent)
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_x(-self.spin)
    }

    /// Back to the start of the active route (Finished -> Traveling).
    /// Position keeps its last traveling value until the next advance.
    pub fn restart(&mut self) {
        self.progress = 0.0;
    }
}

/// Penalty tally for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    /// Accumulated minor (yellow) card weight
    pub minor: f32,
    /// Accumulated major (red) card weight
    pub major: f32,
    pub minor_cards: u32,
    pub major_cards: u32,
}

impl ScoreState {
    pub fn book(&mut self, kind: CardKind, weight: f32) {
        match kind {
            CardKind::Minor => {
                self.minor += weight;
                self.minor_cards += 1;
            }
            CardKind::Major => {
                self.major += weight;
                self.major_cards += 1;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 0-based index of the run within the session
    pub run: u64,
    /// Fair play score in (0, 100]
    pub score: f32,
    pub minor_cards: u32,
    pub major_cards: u32,
    /// Route the ball finished on
    pub path: usize,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    PathSwitched { from: usize, to: usize, progress: f32 },
    /// Switch arrived while the follower was finished
    SwitchIgnored,
    /// A card was consumed; the scene should hide it
    CardShown { marker: u32, kind: CardKind },
    /// Run scored; every card is visible again
    RunComplete(RunSummary),
}
