//! Per-frame interaction simulation
//!
//! All interaction logic lives here. This module must stay pure:
//! - One step per rendered frame, no wall-clock time
//! - No rendering, tracking or haptics calls (those go through `frame`)
//! - All mutable state owned by `InteractionState`

pub mod grab;
pub mod integrator;
pub mod pose;
pub mod racket;
pub mod state;
pub mod tick;

pub use grab::{GrabController, GrabState};
pub use integrator::integrate_ball;
pub use pose::resolve_pose;
pub use racket::{RacketBounds, RacketContact, detect_racket_contact};
pub use state::{Ball, ControllerTrack, InteractionEvent, InteractionState};
pub use tick::{Controller, ControllerInput, HapticRequest, TickInput, TickOutput, tick};
