//! Scene and physics settings
//!
//! Defaults come from `consts`; a JSON file can override any subset of them.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::racket::RacketClamp;

/// Errors raised while loading settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values that would break the simulation
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Scene/physics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Ball radius
    pub ball_radius: f32,
    /// Half extent of the room cube
    pub room_half_extent: f32,
    /// Half extent of the controller cube; the racket is scaled from it
    pub controller_size: f32,
    /// Where a side-button reset puts the ball
    pub reset_position: Vec3,

    // === Physics (per frame) ===
    pub gravity: f32,
    pub friction: f32,
    /// Face direction length added on a racket hit
    pub hit_impulse: f32,
    /// Racket box clamp behaviour
    pub racket_clamp: RacketClamp,

    // === Devices ===
    pub haptic_magnitude: f32,
    /// Frame callback rate (Hz)
    pub frame_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            room_half_extent: ROOM_HALF_EXTENT,
            controller_size: CONTROLLER_SIZE,
            reset_position: RESET_POSITION,

            gravity: GRAVITY,
            friction: FRICTION,
            hit_impulse: HIT_IMPULSE,
            racket_clamp: RacketClamp::default(),

            haptic_magnitude: HAPTIC_MAGNITUDE,
            frame_rate: FRAME_RATE,
        }
    }
}

impl Settings {
    /// Time between two frame callbacks
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.ball_radius > 0.0) {
            return Err(SettingsError::Invalid(format!("ball_radius must be positive, got {}", self.ball_radius)));
        }
        if !(self.room_half_extent > self.ball_radius) {
            return Err(SettingsError::Invalid(format!(
                "room_half_extent {} does not fit a ball of radius {}",
                self.room_half_extent, self.ball_radius
            )));
        }
        if !(self.controller_size > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "controller_size must be positive, got {}",
                self.controller_size
            )));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SettingsError::Invalid(format!("friction must be in (0, 1], got {}", self.friction)));
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid("frame_rate must be non-zero".into()));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}
