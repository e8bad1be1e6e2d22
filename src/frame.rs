//! Frame orchestration
//!
//! Runs one interaction tick per rendered frame: wait for poses, sample the
//! controllers, tick, then hand the results to the haptics and renderer
//! collaborators.

use std::time::{Duration, Instant};

use crate::platform::{DeviceIndex, Scene, SceneObject, Tracker};
use crate::settings::Settings;
use crate::sim::{Controller, ControllerInput, InteractionState, TickInput, TickOutput, tick};

/// Owns the interaction state and drives it from the collaborators
#[derive(Debug, Clone)]
pub struct FrameOrchestrator {
    state: InteractionState,
    settings: Settings,
}

impl FrameOrchestrator {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: InteractionState::new(&settings),
            settings,
        }
    }

    #[inline]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run a single frame. Called from the per-frame render callback.
    pub fn run_frame<T: Tracker, S: Scene>(&mut self, tracker: &mut T, scene: &mut S) -> TickOutput {
        // Nothing pose-dependent may happen before this returns
        tracker.wait_get_poses();

        let hand_index = tracker.hand_index();
        let racket_index = tracker.racket_index();
        let input = TickInput {
            camera: scene.camera_transform(),
            hand: sample(tracker, hand_index),
            racket: sample(tracker, racket_index),
        };

        let output = tick(&mut self.state, &input, &self.settings);

        for pulse in &output.haptics {
            let index = match pulse.controller {
                Controller::Hand => hand_index,
                Controller::Racket => racket_index,
            };
            if let Some(index) = index {
                tracker.trigger_haptic_pulse(index, pulse.magnitude);
            }
        }

        self.publish(scene, input.hand.trigger);
        output
    }

    /// Push this frame's transforms and visibility to the renderer
    fn publish<S: Scene>(&self, scene: &mut S, hand_trigger: bool) {
        scene.set_transform(SceneObject::Ball, self.state.ball.transform);

        let hand = &self.state.hand;
        let (shown, hidden) = if hand_trigger {
            (SceneObject::HandTriggered, SceneObject::HandIdle)
        } else {
            (SceneObject::HandIdle, SceneObject::HandTriggered)
        };
        scene.set_visible(hidden, false);
        if hand.tracked {
            scene.set_transform(shown, hand.current);
        }
        scene.set_visible(shown, hand.tracked);

        let racket = &self.state.racket;
        if racket.tracked {
            scene.set_transform(SceneObject::Racket, racket.current);
        }
        scene.set_visible(SceneObject::Racket, racket.tracked);
    }
}

/// Read one controller; an invalid index samples as untracked and idle
fn sample<T: Tracker>(tracker: &T, index: Option<DeviceIndex>) -> ControllerInput {
    let Some(index) = index else {
        return ControllerInput::default();
    };
    ControllerInput {
        pose: tracker.pose(index),
        trigger: tracker.trigger_touched(index),
        side: tracker.side_touched(index),
    }
}

/// Fixed-rate frame timer for hosts without a display-driven callback.
///
/// Deadlines advance by whole intervals from the first tick, so one slow frame
/// does not shift every later one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next frame is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        } else if now - self.next > self.interval {
            // Fell more than a frame behind; skip ahead instead of bursting
            self.next = now;
        }
        self.next += self.interval;
    }
}
