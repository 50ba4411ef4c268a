//! Browser bridge
//!
//! The page owns the canvas and keyboard; it pushes input here each frame
//! and draws from the JSON snapshot it gets back.

use wasm_bindgen::prelude::*;

use crate::platform::{FixedStep, FrameStats};
use crate::sim::{GameEvent, TickInput, World};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Sea Defenders core loaded");
}

/// Game instance exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    world: World,
    clock: FixedStep,
    stats: FrameStats,
    /// Events from every frame run by the last `update`
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            world: World::new(width, height, seed),
            clock: FixedStep::new(),
            stats: FrameStats::new(),
            events: Vec::new(),
        }
    }

    /// Run as many fixed frames as `dt` seconds cover
    pub fn update(&mut self, left: bool, right: bool, fire: bool, dt: f32) {
        let input = TickInput { left, right, fire };
        self.events.clear();
        for _ in 0..self.clock.advance(dt) {
            self.world.update(&input, crate::consts::SIM_DT);
            self.events.extend_from_slice(self.world.events());
        }
        self.stats.record(dt * 1000.0, &self.world);
    }

    /// Fraction of a frame the clock is holding, for interpolating the draw
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    pub fn pause(&mut self) {
        self.world.pause();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.set_viewport(width, height);
    }

    /// Render state as JSON (empty object if serialization ever fails)
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.world.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            "{}".to_string()
        })
    }

    /// Host frame timing and live entity counts, as JSON
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.stats).unwrap_or_else(|_| "{}".to_string())
    }

    /// Events from the last `update` call, as JSON
    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.events).unwrap_or_else(|_| "[]".to_string())
    }
}
