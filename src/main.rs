//! VR Ball entry point
//!
//! Native headless run: drives the interaction core with the scripted demo
//! tracker, paced to the configured frame rate, and logs what happens.
//!
//! Usage: `vr-ball [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Instant;

    use vr_ball::platform::{RecordingScene, SceneObject, ScriptedTracker, demo_camera};
    use vr_ball::sim::InteractionEvent;
    use vr_ball::{FrameClock, FrameOrchestrator, Settings, geometry};

    env_logger::init();
    log::info!("VR Ball (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let room = geometry::room(settings.room_half_extent);
    let racket = geometry::racket(settings.controller_size);
    log::info!(
        "Scene: room {} tris, racket {} tris, ball radius {}",
        room.triangle_count(),
        racket.triangle_count(),
        settings.ball_radius
    );

    let seed = 0x5eed;
    let mut tracker = ScriptedTracker::demo(seed);
    let frames = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(tracker.len());
    let mut scene = RecordingScene::new(demo_camera());
    let mut orchestrator = FrameOrchestrator::new(settings);
    let mut clock = FrameClock::new(orchestrator.settings().frame_interval());

    log::info!("Running {} frames at {} Hz (seed {})", frames, orchestrator.settings().frame_rate, seed);

    let (mut grabs, mut throws, mut hits, mut resets) = (0u32, 0u32, 0u32, 0u32);
    let start = Instant::now();
    for _ in 0..frames {
        clock.wait();
        let output = orchestrator.run_frame(&mut tracker, &mut scene);
        for event in &output.events {
            match event {
                InteractionEvent::Grabbed { position } => {
                    grabs += 1;
                    log::info!("Grabbed ball at {:?}", position);
                }
                InteractionEvent::Released { velocity } => {
                    throws += 1;
                    log::info!("Threw ball with velocity {:?}", velocity);
                }
                InteractionEvent::RacketHit { .. } => hits += 1,
                InteractionEvent::Reset => {
                    resets += 1;
                    log::info!("Ball reset");
                }
            }
        }
    }
    let elapsed = start.elapsed();

    log::info!(
        "Done: {} grabs, {} throws, {} racket contact frames, {} resets",
        grabs,
        throws,
        hits,
        resets
    );
    log::info!(
        "Ran {} frames ({:.2}s nominal) in {:.2}s ({} haptic pulses)",
        frames,
        clock.interval().as_secs_f64() * frames as f64,
        elapsed.as_secs_f64(),
        tracker.pulses.len()
    );

    if let Some(ball) = scene.position(SceneObject::Ball) {
        println!("Final ball position: {:.3} {:.3} {:.3}", ball.x, ball.y, ball.z);
    }
    match serde_json::to_string_pretty(&orchestrator.state().ball) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize final ball state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host application on the web; nothing to run here
}
