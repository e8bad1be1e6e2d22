//! Scripted tracker and recording scene
//!
//! Stand-ins for the VR runtime and renderer so the core can run headless:
//! the tracker replays a fixed list of frames (with optional seeded jitter to
//! mimic sensor noise) and the scene just remembers what it was told.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{DeviceIndex, Scene, SceneObject, Tracker};
use crate::sim::ControllerInput;
use crate::translation;

const HAND_DEVICE: DeviceIndex = DeviceIndex(1);
const RACKET_DEVICE: DeviceIndex = DeviceIndex(2);

/// Camera used by the demo scene: at (0, -1, 0.2) looking down -Z
pub fn demo_camera() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, -1.0, 0.2), Vec3::new(0.0, -1.0, 0.0), Vec3::Y)
}

/// Both controllers as they should read for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedFrame {
    pub hand: ControllerInput,
    pub racket: ControllerInput,
}

/// Tracker replaying a script; the last frame repeats once the script ends
#[derive(Debug, Clone)]
pub struct ScriptedTracker {
    frames: Vec<ScriptedFrame>,
    next: usize,
    current: ScriptedFrame,
    /// Max translation noise per axis
    jitter: f32,
    rng: Pcg32,
    /// Haptic pulses received, in order
    pub pulses: Vec<(DeviceIndex, f32)>,
    /// Number of `wait_get_poses` calls
    pub polls: u64,
}

impl ScriptedTracker {
    pub fn new(frames: Vec<ScriptedFrame>) -> Self {
        Self {
            frames,
            next: 0,
            current: ScriptedFrame::default(),
            jitter: 0.0,
            rng: Pcg32::seed_from_u64(0),
            pulses: Vec::new(),
            polls: 0,
        }
    }

    /// Add seeded translation noise of up to `amount` per axis
    pub fn with_jitter(mut self, seed: u64, amount: f32) -> Self {
        self.rng = Pcg32::seed_from_u64(seed);
        self.jitter = amount.abs();
        self
    }

    /// Frames in the script
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Demo routine against `demo_camera`: pick the ball up off the floor,
    /// throw it, reset it with the side button, then bat it with the racket.
    pub fn demo(seed: u64) -> Self {
        let mut script = Script::new(demo_camera());

        let hand_rest = Vec3::new(0.4, -1.0, -0.3);
        let racket_rest = Vec3::new(-0.5, -1.0, -0.3);
        let floor_ball = Vec3::new(0.0, -1.85, 0.0);
        let carry_top = Vec3::new(0.0, -0.6, 0.0);
        let blade_up = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let under_ball = Vec3::new(0.0, -1.3, 0.2);

        // Ball drops from its start position and settles on the floor
        script.hold(60, hand_rest, racket_rest, false);
        // Reach down and close the hand on it
        script.hand_move(40, hand_rest, floor_ball, racket_rest, false);
        script.hold(5, floor_ball, racket_rest, true);
        // Lift, then swing towards +X and let go
        script.hand_move(40, floor_ball, carry_top, racket_rest, true);
        let swing_end = carry_top + Vec3::new(0.32, 0.0, 0.0);
        script.hand_move(8, carry_top, swing_end, racket_rest, true);
        // Open the hand mid-swing so the ball leaves with the swing's speed
        let follow_through = swing_end + Vec3::new(0.04, 0.0, 0.0);
        script.hand_move(1, swing_end, follow_through, racket_rest, false);
        script.hand_move(30, follow_through, hand_rest, racket_rest, false);
        script.hold(120, hand_rest, racket_rest, false);
        // Side button: ball back to start
        script.push(hand_rest, false, true, racket_rest, Mat4::IDENTITY);
        // Racket under the ball, blade facing up, then an upward swing
        script.racket_move(10, racket_rest, under_ball, blade_up, hand_rest);
        script.racket_move(80, under_ball, under_ball, blade_up, hand_rest);
        let lifted = under_ball + Vec3::new(0.0, 0.3, 0.0);
        script.racket_move(10, under_ball, lifted, blade_up, hand_rest);
        script.racket_move(60, lifted, lifted, blade_up, hand_rest);

        Self::new(script.frames).with_jitter(seed, 0.0005)
    }

    fn sample(&self, index: DeviceIndex) -> Option<&ControllerInput> {
        match index {
            HAND_DEVICE => Some(&self.current.hand),
            RACKET_DEVICE => Some(&self.current.racket),
            _ => None,
        }
    }

    fn jittered(&mut self, pose: Option<Mat4>) -> Option<Mat4> {
        let pose = pose?;
        if self.jitter == 0.0 {
            return Some(pose);
        }
        let j = self.jitter;
        let noise = Vec3::new(
            self.rng.random_range(-j..=j),
            self.rng.random_range(-j..=j),
            self.rng.random_range(-j..=j),
        );
        Some(Mat4::from_translation(noise) * pose)
    }
}

impl Tracker for ScriptedTracker {
    fn wait_get_poses(&mut self) {
        self.polls += 1;
        let Some(frame) = self.frames.get(self.next.min(self.frames.len().saturating_sub(1))).copied() else {
            self.current = ScriptedFrame::default();
            return;
        };
        self.next += 1;
        self.current = ScriptedFrame {
            hand: ControllerInput {
                pose: self.jittered(frame.hand.pose),
                ..frame.hand
            },
            racket: ControllerInput {
                pose: self.jittered(frame.racket.pose),
                ..frame.racket
            },
        };
    }

    fn hand_index(&self) -> Option<DeviceIndex> {
        self.current.hand.pose.map(|_| HAND_DEVICE)
    }

    fn racket_index(&self) -> Option<DeviceIndex> {
        self.current.racket.pose.map(|_| RACKET_DEVICE)
    }

    fn pose(&self, index: DeviceIndex) -> Option<Mat4> {
        self.sample(index).and_then(|s| s.pose)
    }

    fn trigger_touched(&self, index: DeviceIndex) -> bool {
        self.sample(index).is_some_and(|s| s.trigger)
    }

    fn side_touched(&self, index: DeviceIndex) -> bool {
        self.sample(index).is_some_and(|s| s.side)
    }

    fn trigger_haptic_pulse(&mut self, index: DeviceIndex, magnitude: f32) {
        self.pulses.push((index, magnitude));
    }
}

/// Builds scripted frames from world-space controller positions
struct Script {
    /// World to tracking space (the camera, since world = inverse(camera) * raw)
    to_tracking: Mat4,
    frames: Vec<ScriptedFrame>,
}

impl Script {
    fn new(to_tracking: Mat4) -> Self {
        Self {
            to_tracking,
            frames: Vec::new(),
        }
    }

    fn push(&mut self, hand: Vec3, trigger: bool, side: bool, racket: Vec3, racket_rotation: Mat4) {
        let hand_pose = self.to_tracking * Mat4::from_translation(hand);
        let racket_pose = self.to_tracking * Mat4::from_translation(racket) * racket_rotation;
        self.frames.push(ScriptedFrame {
            hand: ControllerInput {
                pose: Some(hand_pose),
                trigger,
                side,
            },
            racket: ControllerInput {
                pose: Some(racket_pose),
                trigger: false,
                side: false,
            },
        });
    }

    fn hold(&mut self, frames: usize, hand: Vec3, racket: Vec3, trigger: bool) {
        for _ in 0..frames {
            self.push(hand, trigger, false, racket, Mat4::IDENTITY);
        }
    }

    fn hand_move(&mut self, frames: usize, from: Vec3, to: Vec3, racket: Vec3, trigger: bool) {
        for i in 1..=frames {
            let t = i as f32 / frames as f32;
            self.push(from.lerp(to, t), trigger, false, racket, Mat4::IDENTITY);
        }
    }

    fn racket_move(&mut self, frames: usize, from: Vec3, to: Vec3, rotation: Mat4, hand: Vec3) {
        for i in 1..=frames {
            let t = i as f32 / frames as f32;
            self.push(hand, false, false, from.lerp(to, t), rotation);
        }
    }
}

/// Scene that records the last transform and visibility of each object
#[derive(Debug, Clone)]
pub struct RecordingScene {
    pub camera: Mat4,
    transforms: HashMap<SceneObject, Mat4>,
    visible: HashMap<SceneObject, bool>,
}

impl RecordingScene {
    pub fn new(camera: Mat4) -> Self {
        Self {
            camera,
            transforms: HashMap::new(),
            visible: HashMap::new(),
        }
    }

    pub fn transform(&self, object: SceneObject) -> Option<Mat4> {
        self.transforms.get(&object).copied()
    }

    pub fn position(&self, object: SceneObject) -> Option<Vec3> {
        self.transform(object).map(|m| translation(&m))
    }

    /// Objects start visible until told otherwise
    pub fn is_visible(&self, object: SceneObject) -> bool {
        self.visible.get(&object).copied().unwrap_or(true)
    }
}

impl Scene for RecordingScene {
    fn camera_transform(&self) -> Mat4 {
        self.camera
    }

    fn set_transform(&mut self, object: SceneObject, transform: Mat4) {
        self.transforms.insert(object, transform);
    }

    fn set_visible(&mut self, object: SceneObject, visible: bool) {
        self.visible.insert(object, visible);
    }
}
