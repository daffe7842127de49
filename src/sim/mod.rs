//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall clock
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (cards in declaration order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod path;
pub mod score;
pub mod state;
pub mod switch;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{CollisionScorer, within_hit_window};
pub use path::{Path, PathSet};
pub use score::fair_play_score;
pub use state::{CardKind, Follower, FollowerPhase, Marker, RunEvent, RunSummary, ScoreState};
pub use switch::{PathSwitcher, SwitchDirection, SwitchOutcome, closest_t_on_axis, next_path_index};
pub use tick::{Session, TickReport};
