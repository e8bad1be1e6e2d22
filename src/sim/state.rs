//! Interaction state and core simulation types
//!
//! Everything that survives from one frame to the next lives here, owned by a
//! single `InteractionState` that is passed by `&mut` into each tick.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::grab::GrabController;
use super::racket::RacketBounds;
use crate::geometry;
use crate::settings::Settings;
use crate::{positional_delta, translation, with_translation};

/// The dynamic ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// World transform (position in the translation column)
    pub transform: Mat4,
    /// Thrown/batted velocity (world units per frame)
    pub velocity: Vec3,
    /// Accumulated gravity speed along Y, tracked apart from `velocity`
    pub fall_speed: f32,
    /// Multiplier on friction, reset to 1 on every impulse
    pub speed_decay: f32,
    /// Ball is slaved to the hand controller
    pub held: bool,
    /// Ball is in contact with the racket this frame
    pub touching_racket: bool,
}

impl Ball {
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Mat4::from_translation(position),
            velocity: Vec3::ZERO,
            fall_speed: 0.0,
            speed_decay: 1.0,
            held: false,
            touching_racket: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        translation(&self.transform)
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.transform = with_translation(self.transform, position);
    }

    /// Replace the velocity with a fresh impulse (throw or hit)
    pub fn apply_impulse(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.speed_decay = 1.0;
    }

    /// Put the ball back at rest at `position` with identity orientation
    pub fn reset(&mut self, position: Vec3) {
        *self = Self::new(position);
    }
}

/// Current and previous world transform of one tracked controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerTrack {
    pub current: Mat4,
    pub previous: Mat4,
    /// Device delivered a valid pose this frame
    pub tracked: bool,
}

impl Default for ControllerTrack {
    fn default() -> Self {
        Self {
            current: Mat4::IDENTITY,
            previous: Mat4::IDENTITY,
            tracked: false,
        }
    }
}

impl ControllerTrack {
    /// Record this frame's resolved transform, rolling the old one into `previous`.
    ///
    /// An untracked frame keeps the last known pose (the resolver's identity
    /// stand-in is not stored), and the first frame after tracking (re)starts
    /// reports zero motion.
    pub fn update(&mut self, resolved: Mat4, tracked: bool) {
        if !tracked {
            self.previous = self.current;
            self.tracked = false;
            return;
        }
        self.previous = if self.tracked { self.current } else { resolved };
        self.current = resolved;
        self.tracked = true;
    }

    /// Positional delta since the previous frame (world units per frame)
    #[inline]
    pub fn delta(&self) -> Vec3 {
        positional_delta(&self.current, &self.previous)
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        translation(&self.current)
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// Hand closed on the ball
    Grabbed { position: Vec3 },
    /// Hand let go; ball takes the hand's last frame delta
    Released { velocity: Vec3 },
    /// Racket struck the ball
    RacketHit { impulse: Vec3 },
    /// Side button pressed, ball returned to its start position
    Reset,
}

/// Complete interaction state (single owner of everything mutable)
#[derive(Debug, Clone, Serialize)]
pub struct InteractionState {
    pub ball: Ball,
    pub grab: GrabController,
    pub hand: ControllerTrack,
    pub racket: ControllerTrack,
    /// Racket box in its local frame, fixed at construction
    racket_bounds: RacketBounds,
    /// Frames simulated so far
    pub frame: u64,
}

impl InteractionState {
    /// Create the state for a fresh session; the racket bounds come from the
    /// racket geometry built for `settings`.
    pub fn new(settings: &Settings) -> Self {
        let racket_bounds = geometry::racket_bounds(settings.controller_size);
        Self::with_racket_bounds(settings, racket_bounds)
    }

    pub fn with_racket_bounds(settings: &Settings, racket_bounds: RacketBounds) -> Self {
        Self {
            ball: Ball::new(settings.reset_position),
            grab: GrabController::default(),
            hand: ControllerTrack::default(),
            racket: ControllerTrack::default(),
            racket_bounds,
            frame: 0,
        }
    }

    #[inline]
    pub fn racket_bounds(&self) -> &RacketBounds {
        &self.racket_bounds
    }

    /// Forced reset from a side button, regardless of grab state
    pub fn reset(&mut self, settings: &Settings) {
        self.grab.force_idle();
        self.ball.reset(settings.reset_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_ball_at_rest() {
        let settings = Settings::default();
        let state = InteractionState::new(&settings);
        assert_eq!(state.ball.position(), settings.reset_position);
        assert_eq!(state.ball.velocity, Vec3::ZERO);
        assert!(!state.ball.held);
        assert!(!state.ball.touching_racket);
        assert!(!state.grab.is_holding());
    }

    #[test]
    fn test_track_delta() {
        let mut track = ControllerTrack::default();
        track.update(Mat4::from_translation(Vec3::ZERO), true);
        track.update(Mat4::from_translation(Vec3::new(0.1, 0.0, 0.0)), true);
        assert!(track.tracked);
        assert_eq!(track.delta(), Vec3::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn test_reacquired_track_reports_no_motion() {
        let mut track = ControllerTrack::default();
        track.update(Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0)), true);
        track.update(Mat4::IDENTITY, false);
        track.update(Mat4::from_translation(Vec3::new(0.9, 0.0, 0.0)), true);
        assert_eq!(track.delta(), Vec3::ZERO);
    }

    #[test]
    fn test_untracked_frame_holds_last_pose() {
        let mut track = ControllerTrack::default();
        track.update(Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0)), true);
        track.update(Mat4::IDENTITY, false);
        assert!(!track.tracked);
        assert_eq!(track.origin(), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(track.delta(), Vec3::ZERO);
    }

    #[test]
    fn test_apply_impulse_resets_decay() {
        let mut ball = Ball::new(Vec3::ZERO);
        ball.speed_decay = 0.5;
        ball.apply_impulse(Vec3::X);
        assert_eq!(ball.velocity, Vec3::X);
        assert_eq!(ball.speed_decay, 1.0);
    }

    #[test]
    fn test_reset_clears_motion_and_grab() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        state.ball.transform = Mat4::from_rotation_y(1.0) * Mat4::from_translation(Vec3::ONE);
        state.ball.velocity = Vec3::new(0.2, 0.1, 0.0);
        state.ball.fall_speed = -0.05;
        state.ball.held = true;

        state.reset(&settings);

        assert_eq!(state.ball.transform, Mat4::from_translation(settings.reset_position));
        assert_eq!(state.ball.velocity, Vec3::ZERO);
        assert_eq!(state.ball.fall_speed, 0.0);
        assert!(!state.ball.held);
        assert!(!state.grab.is_holding());
    }
}
