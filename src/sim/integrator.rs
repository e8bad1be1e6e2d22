//! Per-frame ball integration
//!
//! Units are per frame, not per second: the demo runs locked to the HMD
//! refresh, so gravity is a fixed decrement of fall speed every tick and
//! friction is a fixed multiplier.

use glam::Vec3;

use super::state::Ball;
use crate::settings::Settings;

/// Advance the ball by one frame.
///
/// Gravity is suspended while the ball is held, touching the racket, or
/// resting on the floor. Walls clamp the ball inside the room and turn the
/// matching velocity component inward; each axis is handled on its own.
pub fn integrate_ball(ball: &mut Ball, settings: &Settings) {
    let radius = settings.ball_radius;
    let bound = settings.room_half_extent;
    let mut pos = ball.position();

    if ball.held {
        // The hand drives the ball; only keep it inside the room
        ball.velocity = Vec3::ZERO;
        ball.fall_speed = 0.0;
        confine_to_room(&mut pos, &mut ball.velocity, radius, bound);
        ball.set_position(pos);
        return;
    }

    if !ball.touching_racket && pos.y - radius > -bound {
        ball.fall_speed -= settings.gravity;
        pos.y += ball.fall_speed;
    } else {
        ball.fall_speed = 0.0;
    }

    pos += ball.velocity;
    ball.velocity *= ball.speed_decay * settings.friction;
    pos += ball.velocity;

    confine_to_room(&mut pos, &mut ball.velocity, radius, bound);
    ball.set_position(pos);
}

/// Clamp `pos` so the sphere stays inside the room cube, reflecting velocity
fn confine_to_room(pos: &mut Vec3, vel: &mut Vec3, radius: f32, bound: f32) {
    for axis in 0..3 {
        if pos[axis] + radius > bound {
            pos[axis] = bound - radius;
            vel[axis] = -vel[axis].abs();
        } else if pos[axis] - radius < -bound {
            pos[axis] = -bound + radius;
            vel[axis] = vel[axis].abs();
        }
    }
}
