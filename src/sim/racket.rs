//! Racket contact detection
//!
//! The racket is a thin box rigidly attached to its controller. Contact is a
//! sphere-vs-box test done in the racket's local frame, where the box is
//! axis-aligned: clamp the ball center into the box to get the closest point,
//! then compare the distance against the ball radius.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::state::ControllerTrack;
use crate::translation;

/// How the ball center is clamped into the racket box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacketClamp {
    /// Each axis clamped to its own extent
    #[default]
    PerAxis,
    /// Y and Z capped by the X upper bound instead of their own, which
    /// shrinks the blade to a short stub
    LegacyXUpper,
}

/// Axis-aligned racket box in the racket's local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RacketBounds {
    min: Vec3,
    max: Vec3,
}

impl RacketBounds {
    /// Box spanning two corners, in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Tightest box around `points`, or `None` for an empty set
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Closest point of the box to a local-space point
    pub fn closest_point(&self, p: Vec3, clamp: RacketClamp) -> Vec3 {
        match clamp {
            RacketClamp::PerAxis => p.clamp(self.min, self.max),
            RacketClamp::LegacyXUpper => Vec3::new(
                p.x.min(self.max.x).max(self.min.x),
                p.y.min(self.max.x).max(self.min.y),
                p.z.min(self.max.x).max(self.min.z),
            ),
        }
    }
}

/// A detected racket hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RacketContact {
    /// Ball center in racket space
    pub local_position: Vec3,
    /// New ball velocity: face direction plus the racket's swing
    pub impulse: Vec3,
}

/// Test the ball against the racket and derive the hit impulse.
///
/// The face direction is the racket's world X axis, flipped when the ball
/// sits on the local -X side, scaled by `impulse_scale`. The racket's
/// frame-to-frame motion is added on top so a swing carries into the ball.
pub fn detect_racket_contact(
    ball: &Mat4,
    racket: &ControllerTrack,
    bounds: &RacketBounds,
    ball_radius: f32,
    impulse_scale: f32,
    clamp: RacketClamp,
) -> Option<RacketContact> {
    let local_ball = racket.current.inverse() * *ball;
    let local_position = translation(&local_ball);
    let closest = bounds.closest_point(local_position, clamp);

    if closest.distance(local_position) >= ball_radius {
        return None;
    }

    let face = racket.current.x_axis.truncate();
    let face = if local_position.x > 0.0 { face } else { -face };
    let impulse = face * impulse_scale + racket.delta();

    Some(RacketContact {
        local_position,
        impulse,
    })
}
