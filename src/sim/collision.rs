//! Card collision detection and booking
//!
//! Cards are tested in parameter space, not world space: a card is hit when
//! the ball's progress on the card's own route is within the hit window.
//! The active route is part of the predicate, so a card on another route can
//! never be hit even if the progress value would match.

use super::state::{Follower, Marker, ScoreState};

/// Strict window test: |progress - t| < window
#[inline]
pub fn within_hit_window(progress: f32, t: f32, window: f32) -> bool {
    (progress - t).abs() < window
}

/// Shows cards the ball passes on its active route
#[derive(Debug, Clone, Copy)]
pub struct CollisionScorer {
    pub hit_window: f32,
}

impl CollisionScorer {
    pub fn new(hit_window: f32) -> Self {
        Self { hit_window }
    }

    /// Whether `marker` would be shown for this follower right now
    pub fn is_hit(&self, follower: &Follower, marker: &Marker) -> bool {
        !marker.consumed
            && marker.path == follower.path()
            && within_hit_window(follower.progress, marker.t, self.hit_window)
    }

    /// Consume every card hit this tick and book its weight.
    ///
    /// Returns the ids of the cards shown, in marker order.
    pub fn check_cards(
        &self,
        follower: &Follower,
        markers: &mut [Marker],
        score: &mut ScoreState,
    ) -> Vec<u32> {
        let mut shown = Vec::new();
        for marker in markers.iter_mut() {
            if self.is_hit(follower, marker) {
                marker.consumed = true;
                score.book(marker.kind, marker.weight);
                shown.push(marker.id);
            }
        }
        shown
    }
}
