//! Platform abstraction layer
//!
//! Interfaces to the collaborators around the interaction core:
//! - `Tracker`: VR runtime (poses, buttons, haptics)
//! - `Scene`: renderer (camera, object transforms, visibility)
//!
//! `scripted` provides deterministic stand-ins for headless runs and tests.

pub mod scripted;

pub use scripted::{RecordingScene, ScriptedFrame, ScriptedTracker, demo_camera};

use glam::Mat4;

/// Index of a tracked device in the VR runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIndex(pub u32);

/// The device-tracking collaborator
pub trait Tracker {
    /// Block until this frame's poses are sampled. Poses and buttons are only
    /// valid after this returns.
    fn wait_get_poses(&mut self);

    /// Controller assigned to the hand, if one is connected and tracked
    fn hand_index(&self) -> Option<DeviceIndex>;

    /// Controller assigned to the racket, if one is connected and tracked
    fn racket_index(&self) -> Option<DeviceIndex>;

    /// Raw pose in tracking space
    fn pose(&self, index: DeviceIndex) -> Option<Mat4>;

    fn trigger_touched(&self, index: DeviceIndex) -> bool;

    fn side_touched(&self, index: DeviceIndex) -> bool;

    fn trigger_haptic_pulse(&mut self, index: DeviceIndex, magnitude: f32);
}

/// Renderable objects the core drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    Ball,
    Racket,
    /// Hand marker while the trigger is released
    HandIdle,
    /// Brighter hand marker while the trigger is held
    HandTriggered,
}

/// The rendering collaborator
pub trait Scene {
    /// Current scene camera (world to camera) transform
    fn camera_transform(&self) -> Mat4;

    fn set_transform(&mut self, object: SceneObject, transform: Mat4);

    fn set_visible(&mut self, object: SceneObject, visible: bool);
}
