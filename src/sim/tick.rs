//! Per-frame simulation tick
//!
//! Core interaction loop, run once per rendered frame on poses that were
//! sampled after the tracker's blocking pose wait.

use glam::Mat4;

use super::integrator::integrate_ball;
use super::pose::resolve_pose;
use super::racket::detect_racket_contact;
use super::state::{InteractionEvent, InteractionState};
use crate::settings::Settings;

/// Which controller a haptic request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Controller {
    Hand,
    Racket,
}

/// Sampled state of one controller for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerInput {
    /// Raw device pose in tracking space (`None` when untracked)
    pub pose: Option<Mat4>,
    /// Trigger touched
    pub trigger: bool,
    /// Side button touched
    pub side: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Scene camera transform this frame
    pub camera: Mat4,
    pub hand: ControllerInput,
    pub racket: ControllerInput,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            camera: Mat4::IDENTITY,
            hand: ControllerInput::default(),
            racket: ControllerInput::default(),
        }
    }
}

/// A haptic pulse to forward to the tracking system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticRequest {
    pub controller: Controller,
    pub magnitude: f32,
}

/// What a tick produced besides the state change
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub events: Vec<InteractionEvent>,
    pub haptics: Vec<HapticRequest>,
}

/// Advance the interaction state by one frame
pub fn tick(state: &mut InteractionState, input: &TickInput, settings: &Settings) -> TickOutput {
    let mut output = TickOutput::default();
    state.frame += 1;

    // Resolve controller poses against this frame's camera
    state.hand.update(
        resolve_pose(&input.camera, input.hand.pose.as_ref()),
        input.hand.pose.is_some(),
    );
    state.racket.update(
        resolve_pose(&input.camera, input.racket.pose.as_ref()),
        input.racket.pose.is_some(),
    );

    // Buttons of an untracked controller are ignored
    let hand_trigger = state.hand.tracked && input.hand.trigger;
    let side = (state.hand.tracked && input.hand.side) || (state.racket.tracked && input.racket.side);

    if side {
        state.reset(settings);
        log::debug!("frame {}: ball reset", state.frame);
        output.events.push(InteractionEvent::Reset);
    }

    // Grab / carry / throw
    if let Some(event) = state.grab.update(&state.hand, hand_trigger, &mut state.ball, settings.ball_radius) {
        if matches!(event, InteractionEvent::Grabbed { .. }) {
            output.haptics.push(HapticRequest {
                controller: Controller::Hand,
                magnitude: settings.haptic_magnitude,
            });
        }
        log::debug!("frame {}: {:?}", state.frame, event);
        output.events.push(event);
    }

    // Racket contact (never while the hand holds the ball)
    let contact = if !state.ball.held && state.racket.tracked {
        detect_racket_contact(
            &state.ball.transform,
            &state.racket,
            state.racket_bounds(),
            settings.ball_radius,
            settings.hit_impulse,
            settings.racket_clamp,
        )
    } else {
        None
    };
    state.ball.touching_racket = contact.is_some();
    if let Some(contact) = contact {
        state.ball.apply_impulse(contact.impulse);
        output.haptics.push(HapticRequest {
            controller: Controller::Racket,
            magnitude: settings.haptic_magnitude,
        });
        let event = InteractionEvent::RacketHit {
            impulse: contact.impulse,
        };
        log::debug!("frame {}: {:?}", state.frame, event);
        output.events.push(event);
    }

    integrate_ball(&mut state.ball, settings);

    debug_assert!(!(state.ball.held && state.ball.touching_racket));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_RADIUS, HIT_IMPULSE};
    use crate::sim::GrabState;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn hand_at(position: Vec3, trigger: bool) -> ControllerInput {
        ControllerInput {
            pose: Some(Mat4::from_translation(position)),
            trigger,
            side: false,
        }
    }

    #[test]
    fn test_grab_carry_throw() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let start = state.ball.position();

        // Close the hand on the ball
        let input = TickInput {
            hand: hand_at(start, true),
            ..Default::default()
        };
        let out = tick(&mut state, &input, &settings);
        assert!(matches!(out.events[..], [InteractionEvent::Grabbed { .. }]));
        assert_eq!(
            out.haptics,
            vec![HapticRequest {
                controller: Controller::Hand,
                magnitude: settings.haptic_magnitude
            }]
        );
        assert!(state.ball.held);

        // Carry it up, gravity stays off
        let carried = start + Vec3::new(0.0, 0.3, 0.0);
        let input = TickInput {
            hand: hand_at(carried, true),
            ..Default::default()
        };
        let out = tick(&mut state, &input, &settings);
        assert!(out.events.is_empty());
        assert!(state.ball.position().abs_diff_eq(carried, 1e-5));
        assert_eq!(state.ball.fall_speed, 0.0);

        // Let go while moving sideways
        let input = TickInput {
            hand: hand_at(carried + Vec3::new(0.1, 0.0, 0.0), false),
            ..Default::default()
        };
        let out = tick(&mut state, &input, &settings);
        assert!(matches!(out.events[..], [InteractionEvent::Released { velocity }] if velocity.abs_diff_eq(Vec3::new(0.1, 0.0, 0.0), 1e-6)));
        assert!(!state.ball.held);
        assert_eq!(state.grab.state(), GrabState::Idle);
    }

    #[test]
    fn test_camera_is_removed_from_hand_pose() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let camera = Mat4::from_translation(Vec3::new(0.0, 1.0, -0.2));

        let input = TickInput {
            camera,
            hand: hand_at(Vec3::new(0.3, 1.3, -0.2), false),
            ..Default::default()
        };
        tick(&mut state, &input, &settings);
        assert!(state.hand.origin().abs_diff_eq(Vec3::new(0.3, 0.3, 0.0), 1e-6));
    }

    #[test]
    fn test_lost_hand_keeps_last_resolved_pose() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let camera = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let seen = TickInput {
            camera,
            hand: hand_at(Vec3::new(0.4, 1.2, 0.0), false),
            ..Default::default()
        };
        tick(&mut state, &seen, &settings);

        let lost = TickInput {
            camera,
            hand: ControllerInput::default(),
            ..Default::default()
        };
        tick(&mut state, &lost, &settings);
        assert!(!state.hand.tracked);
        assert!(state.hand.origin().abs_diff_eq(Vec3::new(0.4, 0.2, 0.0), 1e-6));
        assert_eq!(state.hand.delta(), Vec3::ZERO);
    }

    #[test]
    fn test_side_button_resets_held_ball() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let start = state.ball.position();
        tick(
            &mut state,
            &TickInput {
                hand: hand_at(start, true),
                ..Default::default()
            },
            &settings,
        );
        assert!(state.grab.is_holding());

        let input = TickInput {
            hand: hand_at(Vec3::new(1.0, 1.0, 1.0), true),
            racket: ControllerInput {
                pose: Some(Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0))),
                trigger: false,
                side: true,
            },
            ..Default::default()
        };
        let out = tick(&mut state, &input, &settings);

        assert_eq!(out.events.first(), Some(&InteractionEvent::Reset));
        assert!(!state.grab.is_holding());
        assert!(!state.ball.held);
        assert_eq!(state.ball.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_untracked_side_button_ignored() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let input = TickInput {
            hand: ControllerInput {
                pose: None,
                trigger: true,
                side: true,
            },
            ..Default::default()
        };
        let out = tick(&mut state, &input, &settings);
        assert!(out.events.is_empty());
        assert!(out.haptics.is_empty());
    }

    #[test]
    fn test_racket_hit_sends_ball_off_face() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let ball = state.ball.position();

        // Racket face pointing up, just below the ball
        let racket = Mat4::from_translation(ball - Vec3::new(0.0, 0.1, 0.0)) * Mat4::from_rotation_z(FRAC_PI_2);
        let input = TickInput {
            racket: ControllerInput {
                pose: Some(racket),
                ..Default::default()
            },
            ..Default::default()
        };
        let out = tick(&mut state, &input, &settings);

        assert!(state.ball.touching_racket);
        assert!(!state.ball.held);
        assert_eq!(out.haptics.len(), 1);
        assert_eq!(out.haptics[0].controller, Controller::Racket);
        match out.events[..] {
            [InteractionEvent::RacketHit { impulse }] => {
                assert!(impulse.abs_diff_eq(Vec3::Y * HIT_IMPULSE, 1e-6));
            }
            _ => panic!("expected a single racket hit, got {:?}", out.events),
        }
        assert_eq!(state.ball.fall_speed, 0.0);
        assert!(state.ball.position().y > ball.y);
    }

    #[test]
    fn test_held_ball_ignores_racket() {
        let settings = Settings::default();
        let mut state = InteractionState::new(&settings);
        let ball = state.ball.position();
        let input = TickInput {
            hand: hand_at(ball, true),
            racket: ControllerInput {
                pose: Some(Mat4::from_translation(ball)),
                ..Default::default()
            },
            ..Default::default()
        };

        for _ in 0..3 {
            tick(&mut state, &input, &settings);
            assert!(state.ball.held);
            assert!(!state.ball.touching_racket);
        }
        assert!(state.ball.position().distance(ball) < BALL_RADIUS);
    }
}
