//! VR Ball - interaction and physics core for a VR ball-and-racket demo
//!
//! Core modules:
//! - `sim`: Per-frame simulation (pose resolution, grab, racket contact, ball integration)
//! - `frame`: Frame orchestration against the tracking and rendering collaborators
//! - `platform`: Collaborator interfaces plus a scripted tracker for headless runs
//! - `geometry`: Cube-derived meshes for the room, controllers and racket
//! - `settings`: Data-driven scene and physics constants

pub mod frame;
pub mod geometry;
pub mod platform;
pub mod settings;
pub mod sim;

pub use frame::{FrameClock, FrameOrchestrator};
pub use settings::{Settings, SettingsError};
pub use sim::racket::RacketClamp;

use glam::{Mat4, Vec3};

/// Scene configuration constants
pub mod consts {
    use glam::Vec3;

    /// Nominal HMD refresh rate driving the frame callback
    pub const FRAME_RATE: u32 = 90;

    /// Ball radius (world units)
    pub const BALL_RADIUS: f32 = 0.15;
    /// Half extent of the cubic room centered on the origin
    pub const ROOM_HALF_EXTENT: f32 = 2.0;
    /// Half extent of the controller cube visual
    pub const CONTROLLER_SIZE: f32 = 0.015;

    /// Racket box scale relative to the controller cube, per local axis
    pub const RACKET_SCALE: Vec3 = Vec3::new(1.0, 5.0, 20.0);
    /// Racket box offset along local Z (the blade sits in front of the grip)
    pub const RACKET_Z_OFFSET: f32 = -0.2;

    /// Downward acceleration (world units per frame²)
    pub const GRAVITY: f32 = 0.001;
    /// Per-frame velocity multiplier
    pub const FRICTION: f32 = 0.99;
    /// Length of the racket face direction added on a hit
    pub const HIT_IMPULSE: f32 = 0.01;
    /// Haptic pulse magnitude for grab and hit feedback
    pub const HAPTIC_MAGNITUDE: f32 = 1.0;

    /// Ball position after a side-button reset (just below the camera)
    pub const RESET_POSITION: Vec3 = Vec3::new(0.0, -0.7, 0.0);
}

/// World-space translation of a transform
#[inline]
pub fn translation(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

/// Replace the translation column of a transform, keeping rotation/scale
#[inline]
pub fn with_translation(mut m: Mat4, t: Vec3) -> Mat4 {
    m.w_axis = t.extend(1.0);
    m
}

/// Frame-to-frame positional delta between two transforms
#[inline]
pub fn positional_delta(current: &Mat4, previous: &Mat4) -> Vec3 {
    translation(current) - translation(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_translation_keeps_rotation() {
        let rot = Mat4::from_rotation_y(0.7);
        let moved = with_translation(rot, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(translation(&moved), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(moved.x_axis, rot.x_axis);
        assert_eq!(moved.z_axis, rot.z_axis);
    }

    #[test]
    fn test_positional_delta() {
        let a = Mat4::from_translation(Vec3::new(0.1, 0.0, 0.0));
        let b = Mat4::IDENTITY;
        assert_eq!(positional_delta(&a, &b), Vec3::new(0.1, 0.0, 0.0));
    }
}
