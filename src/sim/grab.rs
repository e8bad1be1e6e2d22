//! Hand grab state machine
//!
//! The hand picks the ball up when the trigger is pressed with the controller
//! origin inside the ball, carries it rigidly, and throws it on release with
//! the hand's last frame-to-frame motion.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::state::{Ball, ControllerTrack, InteractionEvent};

/// Grab state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GrabState {
    /// Ball is free
    #[default]
    Idle,
    /// Ball follows the hand; `offset` is the ball pose in hand space at grab time
    Holding { offset: Mat4 },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GrabController {
    state: GrabState,
}

impl GrabController {
    #[inline]
    pub fn state(&self) -> GrabState {
        self.state
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        matches!(self.state, GrabState::Holding { .. })
    }

    /// Drop any grab without producing a throw
    pub fn force_idle(&mut self) {
        self.state = GrabState::Idle;
    }

    /// Advance the grab state for one frame.
    ///
    /// `trigger` is the hand controller's trigger this frame. Nothing happens
    /// while the hand is untracked.
    pub fn update(
        &mut self,
        hand: &ControllerTrack,
        trigger: bool,
        ball: &mut Ball,
        ball_radius: f32,
    ) -> Option<InteractionEvent> {
        if !hand.tracked {
            return None;
        }

        match self.state {
            GrabState::Idle => {
                if !trigger || !within_reach(hand.origin(), ball.position(), ball_radius) {
                    return None;
                }
                let offset = hand.current.inverse() * ball.transform;
                self.state = GrabState::Holding { offset };
                ball.transform = hand.current * offset;
                ball.velocity = Vec3::ZERO;
                ball.fall_speed = 0.0;
                ball.held = true;
                Some(InteractionEvent::Grabbed {
                    position: ball.position(),
                })
            }
            GrabState::Holding { offset } => {
                if trigger {
                    ball.transform = hand.current * offset;
                    return None;
                }
                self.state = GrabState::Idle;
                ball.held = false;
                let velocity = hand.delta();
                ball.apply_impulse(velocity);
                Some(InteractionEvent::Released { velocity })
            }
        }
    }
}

/// Hand origin strictly inside the ball sphere
#[inline]
fn within_reach(hand_origin: Vec3, ball_center: Vec3, ball_radius: f32) -> bool {
    hand_origin.distance(ball_center) < ball_radius
}
