//! Route switching with a continuity search
//!
//! When the player switches routes mid-flight the ball must not jump along
//! the depth axis. The new progress is found by sampling the new route and
//! picking the sample whose depth is closest to the ball's current depth.
//!
//! Depth is only comparable across routes because they all share the same
//! start and end anchors. The result is quantised to the sampling grid (1/K).

use serde::{Deserialize, Serialize};

use super::path::{Path, PathSet};
use super::state::Follower;
use crate::{Axis, axis_component};

/// Switch input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchDirection {
    /// Next route (index + 1, wrapping to 0)
    Left,
    /// Previous route (index - 1, wrapping to the last)
    Right,
}

/// Result of applying a switch request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SwitchOutcome {
    Switched { from: usize, to: usize, progress: f32 },
    /// The follower had already finished its route
    Ignored,
}

/// Route index after one switch among `count` routes
pub fn next_path_index(current: usize, count: usize, direction: SwitchDirection) -> usize {
    match direction {
        SwitchDirection::Left => (current + 1) % count,
        SwitchDirection::Right => (current + count - 1) % count,
    }
}

/// Parameter on `path` whose `axis` coordinate is closest to `target`.
///
/// Samples t = i / samples for i in 0..=samples. Ties keep the smallest t.
pub fn closest_t_on_axis(path: &Path, axis: Axis, target: f32, samples: u32) -> f32 {
    let samples = samples.max(1);
    let mut closest_t = 0.0;
    let mut min_distance = f32::INFINITY;

    for i in 0..=samples {
        let t = i as f32 / samples as f32;
        let distance = (axis_component(path.point_at(t), axis) - target).abs();
        if distance < min_distance {
            min_distance = distance;
            closest_t = t;
        }
    }

    closest_t
}

/// Re-anchors the follower on a neighbouring route
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathSwitcher {
    pub axis: Axis,
    pub samples: u32,
}

impl PathSwitcher {
    pub fn new(axis: Axis, samples: u32) -> Self {
        Self { axis, samples }
    }

    /// Switch the follower's route. Only the route and progress change; speed
    /// and spin are untouched. A finished follower is left alone.
    pub fn apply(
        &self,
        follower: &mut Follower,
        paths: &PathSet,
        direction: SwitchDirection,
    ) -> SwitchOutcome {
        let from = follower.path();
        if follower.is_finished() || from >= paths.len() {
            return SwitchOutcome::Ignored;
        }

        let old_position = paths.evaluate(from, follower.progress);
        let to = next_path_index(from, paths.len(), direction);

        let target = axis_component(old_position, self.axis);
        let progress = closest_t_on_axis(paths.path(to), self.axis, target, self.samples);

        follower.reanchor(paths, to, progress);

        SwitchOutcome::Switched { from, to, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn routes() -> PathSet {
        let start = Vec3::new(0.0, 0.0, 100.0);
        PathSet::new(vec![
            Path::new(start, Vec3::new(50.0, 0.0, 50.0), Vec3::ZERO),
            Path::new(start, Vec3::new(0.0, 50.0, 50.0), Vec3::ZERO),
            Path::new(start, Vec3::new(-50.0, 0.0, 50.0), Vec3::ZERO),
        ])
    }

    #[test]
    fn test_next_path_index_wraps() {
        assert_eq!(next_path_index(0, 3, SwitchDirection::Left), 1);
        assert_eq!(next_path_index(2, 3, SwitchDirection::Left), 0);
        assert_eq!(next_path_index(0, 3, SwitchDirection::Right), 2);
        assert_eq!(next_path_index(1, 3, SwitchDirection::Right), 0);
        assert_eq!(next_path_index(0, 1, SwitchDirection::Right), 0);
    }

    #[test]
    fn test_closest_t_endpoints() {
        let paths = routes();
        let path = paths.get(0).copied().unwrap();
        assert_eq!(closest_t_on_axis(&path, Axis::Z, 100.0, 100), 0.0);
        assert_eq!(closest_t_on_axis(&path, Axis::Z, 0.0, 100), 1.0);
        // Beyond either end clamps to the nearest sample
        assert_eq!(closest_t_on_axis(&path, Axis::Z, 500.0, 100), 0.0);
        assert_eq!(closest_t_on_axis(&path, Axis::Z, -500.0, 100), 1.0);
    }

    #[test]
    fn test_closest_t_ties_keep_first() {
        // Depth is exactly 0 at every t, so every sample ties
        let flat = Path::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
        );
        assert_eq!(closest_t_on_axis(&flat, Axis::Z, 7.0, 100), 0.0);
    }

    #[test]
    fn test_closest_t_tie_between_two_samples() {
        // Two steps sample z = 100, 50, 0 exactly; 75 is 25 away from both
        // of the first two, and the earlier one wins
        let paths = routes();
        let path = paths.path(0);
        assert_eq!(path.point_at(0.5).z, 50.0);
        assert_eq!(closest_t_on_axis(path, Axis::Z, 75.0, 2), 0.0);
        assert_eq!(closest_t_on_axis(path, Axis::Z, 25.0, 2), 0.5);
    }

    #[test]
    fn test_closest_t_is_sampled() {
        // Along these routes z = 100 (1 - t); a target between samples snaps
        // to a grid point rather than being solved exactly
        let paths = routes();
        let path = paths.get(1).copied().unwrap();
        let t = closest_t_on_axis(&path, Axis::Z, 100.0 * (1.0 - 0.3333), 10);
        assert!((t - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_switch_keeps_depth() {
        let paths = routes();
        let mut follower = Follower::new(&paths, 0, 0.002, 0.08);
        follower.progress = 0.4;
        follower.spin = 1.25;
        let depth_before = paths.evaluate(0, 0.4).z;

        let outcome =
            PathSwitcher::new(Axis::Z, 100).apply(&mut follower, &paths, SwitchDirection::Left);
        let SwitchOutcome::Switched { from, to, progress } = outcome else {
            panic!("expected a switch, got {outcome:?}");
        };
        assert_eq!((from, to), (0, 1));
        assert_eq!(follower.path(), 1);
        assert!((progress - 0.4).abs() <= 0.01 + 1e-6);
        assert!((follower.position.z - depth_before).abs() <= 1.0 + 1e-3);
        // Speed and spin are untouched
        assert_eq!(follower.speed, 0.002);
        assert_eq!(follower.spin, 1.25);
    }

    #[test]
    fn test_switch_back_and_forth_returns() {
        let paths = routes();
        let switcher = PathSwitcher::new(Axis::Z, 100);
        for start in [0.0f32, 0.123, 0.5, 0.777, 0.999] {
            let mut follower = Follower::new(&paths, 0, 0.002, 0.08);
            follower.progress = start;
            switcher.apply(&mut follower, &paths, SwitchDirection::Left);
            switcher.apply(&mut follower, &paths, SwitchDirection::Right);
            assert_eq!(follower.path(), 0);
            assert!((follower.progress - start).abs() <= 0.01 + 1e-6);
        }
    }

    #[test]
    fn test_switch_ignored_when_finished() {
        let paths = routes();
        let mut follower = Follower::new(&paths, 2, 0.002, 0.08);
        follower.progress = 1.001;

        let outcome =
            PathSwitcher::new(Axis::Z, 100).apply(&mut follower, &paths, SwitchDirection::Right);
        assert_eq!(outcome, SwitchOutcome::Ignored);
        assert_eq!(follower.path(), 2);
        assert_eq!(follower.progress, 1.001);
    }

    #[test]
    fn test_switch_ignored_for_unknown_route() {
        // Follower placed on route 2 of three, then handed a single-route set
        let paths = routes();
        let mut follower = Follower::new(&paths, 2, 0.002, 0.08);
        follower.progress = 0.5;
        let single = PathSet::new(vec![*paths.path(0)]);

        let outcome =
            PathSwitcher::new(Axis::Z, 100).apply(&mut follower, &single, SwitchDirection::Left);
        assert_eq!(outcome, SwitchOutcome::Ignored);
        assert_eq!(follower.path(), 2);
        assert_eq!(follower.progress, 0.5);
    }
}
