//! Presentation helpers
//!
//! Nothing here feeds back into the simulation. A renderer reads the tick
//! report and uses these to place the ball, the cards and the camera.

use glam::{Mat4, Quat, Vec3};

use crate::consts::ROUTE_DRAW_SEGMENTS;
use crate::sim::{Marker, PathSet};

/// Camera height while following the ball
pub const CAMERA_HEIGHT: f32 = 25.0;
/// Camera distance behind the ball along depth
pub const CAMERA_TRAIL: f32 = 60.0;
/// Camera position before the first frame
pub const CAMERA_START: Vec3 = Vec3::new(-5.0, 3.0, 110.0);

/// Model matrix for the ball: translate to `position`, spun about X by `-spin`
pub fn ball_transform(position: Vec3, spin: f32) -> Mat4 {
    Mat4::from_rotation_translation(Quat::from_rotation_x(-spin), position)
}

/// Polylines for drawing every route
pub fn route_polylines(paths: &PathSet) -> Vec<Vec<Vec3>> {
    paths
        .iter()
        .map(|path| path.sample_points(ROUTE_DRAW_SEGMENTS))
        .collect()
}

/// Positions of the cards that should still be drawn
pub fn visible_cards(paths: &PathSet, markers: &[Marker]) -> Vec<(u32, Vec3)> {
    markers
        .iter()
        .filter(|m| m.is_visible())
        .map(|m| (m.id, m.position(paths)))
        .collect()
}

/// Trailing camera that keeps its sideways offset and looks at the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            eye: CAMERA_START,
            target: Vec3::ZERO,
        }
    }
}

impl ChaseCamera {
    pub fn follow(&mut self, ball: Vec3) {
        self.eye = Vec3::new(self.eye.x, CAMERA_HEIGHT, ball.z + CAMERA_TRAIL);
        self.target = ball;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}
