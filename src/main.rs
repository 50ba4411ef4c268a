//! Sea Defenders entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary runs the simulation headless with a scripted autopilot,
//! which is handy for soak-testing the core and eyeballing the logs.
//!
//! Usage: `sea-defenders [settings.json] [--json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use sea_defenders::Settings;
    use sea_defenders::consts::SIM_DT;
    use sea_defenders::platform::FrameStats;
    use sea_defenders::sim::{GameEvent, GamePhase, World};

    /// Frames between progress reports
    const REPORT_INTERVAL: u64 = 600;

    env_logger::init();
    log::info!("Sea Defenders (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let print_json = args.iter().any(|a| a == "--json");
    let settings = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(|path| Settings::load_or_default(Path::new(path)))
        .unwrap_or_default();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!(
        "Viewport {}x{}, seed {}, {} frames",
        settings.screen_width,
        settings.screen_height,
        seed,
        settings.headless_frames
    );

    let mut world = World::new(settings.screen_width, settings.screen_height, seed);
    let mut stats = FrameStats::new();
    let mut games_played = 0u32;
    let mut best_score = 0u32;

    // No wall clock to keep pace with, so step as fast as the core allows
    while world.frame < u64::from(settings.headless_frames) {
        let input = autopilot::input_for(&world);
        let started = Instant::now();
        world.update(&input, SIM_DT);
        stats.record(started.elapsed().as_secs_f32() * 1000.0, &world);

        for event in world.events() {
            match event {
                GameEvent::GameStarted => games_played += 1,
                GameEvent::GameOver { score } => {
                    best_score = best_score.max(*score);
                    log::info!(
                        "Run {} ended at frame {} with {} points",
                        games_played,
                        world.frame,
                        score
                    );
                }
                other => log::debug!("frame {}: {:?}", world.frame, other),
            }
        }

        if world.frame % REPORT_INTERVAL == 0 {
            if world.phase == GamePhase::Playing {
                log::info!(
                    "frame {}: score {}, hp {}",
                    world.frame,
                    world.score,
                    world.player.hp
                );
            }
            log::info!("{}", stats);
        }
    }

    if stats.slow_frames > 0 {
        log::warn!(
            "{} of {} frames took longer than {}ms",
            stats.slow_frames,
            stats.total_frames,
            sea_defenders::platform::stats::SLOW_FRAME_MS
        );
    }

    if print_json {
        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    } else {
        println!(
            "Simulated {} frames: {} runs, best score {}, current score {}",
            world.frame,
            games_played,
            best_score.max(world.score),
            world.score
        );
        println!("{}", stats);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use sea_defenders::sim::{GamePhase, TickInput, World};

    /// Frames spent turning each way while weaving
    const SWAY_FRAMES: u64 = 40;

    /// Scripted input: tap fire through menus, weave and shoot while playing
    pub fn input_for(world: &World) -> TickInput {
        let frame = world.frame;
        match world.phase {
            GamePhase::Playing => {
                let turning_left = (frame / SWAY_FRAMES) % 2 == 0;
                TickInput {
                    left: turning_left,
                    right: !turning_left,
                    fire: true,
                }
            }
            _ => TickInput {
                left: false,
                right: false,
                // Menus act on the press, so release every other frame
                fire: frame % 2 == 0,
            },
        }
    }
}
