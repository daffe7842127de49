//! Curve Kick headless driver
//!
//! Runs the simulation without a window: an autopilot switches routes at
//! random and every completed run is logged and ranked.
//!
//! Usage: `curve-kick [config.json] [runs] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), curve_kick::ConfigError> {
    use curve_kick::sim::{Autopilot, RunEvent, Session};
    use curve_kick::view::ChaseCamera;
    use curve_kick::{Scoreboard, SessionConfig};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Curve Kick (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => SessionConfig::load(&path)?,
        _ => SessionConfig::default(),
    };
    let runs: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut session = Session::new(&config)?;
    let mut pilot = Autopilot::new(seed);
    let mut camera = ChaseCamera::default();
    let mut scoreboard = Scoreboard::new();
    log::info!("Autopilot seed: {}", seed);

    while session.completed_runs() < runs {
        if let Some(direction) = pilot.next_input() {
            session.request_switch(direction);
        }

        let report = session.tick();
        camera.follow(report.position);
        log::trace!(
            "Tick {}: ball {:?}, camera view {:?}",
            session.time_ticks(),
            report.position,
            camera.view_matrix()
        );

        for event in &report.events {
            if let RunEvent::CardShown { marker, kind } = event {
                log::info!("{:?} card {} shown (tick {})", kind, marker, session.time_ticks());
            }
        }

        if let Some(summary) = report.final_score {
            println!(
                "Game Over! Your Fair Play Score is: {:.2}  (run {}, path {}, {} yellow, {} red)",
                summary.score,
                summary.run + 1,
                summary.path,
                summary.minor_cards,
                summary.major_cards
            );
            log::debug!("Camera at {:?} looking at {:?}", camera.eye, camera.target);
            if let Some(rank) = scoreboard.record(summary) {
                log::info!("Run {} placed #{} on the scoreboard", summary.run + 1, rank);
            }
        }
    }

    println!("Best runs:");
    for (i, entry) in scoreboard.entries.iter().enumerate() {
        println!("  {:>2}. {:>6.2}  (run {}, path {})", i + 1, entry.score, entry.run + 1, entry.path);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds drive `Session::tick` from the page's animation frame
}
