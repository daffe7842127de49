//! Route geometry: quadratic Bezier curves in world space
//!
//! A route is defined by three control points:
//! - start: where the ball is struck (t = 0)
//! - control: pulls the curve sideways or upward
//! - end: where the ball finishes (t = 1)
//!
//! `t` is never clamped. Values past 1 extrapolate beyond the goal, which is
//! how the follower detects the end of a run.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A quadratic Bezier route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl Path {
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// B(t) = (1-t)²·P0 + 2(1-t)t·P1 + t²·P2
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        let one_minus_t = 1.0 - t;
        let weight_start = one_minus_t * one_minus_t;
        let weight_control = 2.0 * one_minus_t * t;
        let weight_end = t * t;

        self.start * weight_start + self.control * weight_control + self.end * weight_end
    }

    /// Sample `segments + 1` points at t = i / segments (for drawing as a polyline)
    pub fn sample_points(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Ordered set of routes; a route's identity is its index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    /// Route `index`; panics if out of range
    #[inline]
    pub fn path(&self, index: usize) -> &Path {
        &self.paths[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    /// Evaluate route `index` at `t`, or None if there is no such route
    pub fn try_evaluate(&self, index: usize, t: f32) -> Option<Vec3> {
        self.paths.get(index).map(|path| path.point_at(t))
    }

    /// Evaluate route `index` at `t`.
    ///
    /// Panics if `index` is out of range; session construction validates every
    /// index that reaches this call.
    #[inline]
    pub fn evaluate(&self, index: usize, t: f32) -> Vec3 {
        self.paths[index].point_at(t)
    }
}
